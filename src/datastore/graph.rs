use {
  serde::{Serialize, Deserialize},
  serde_json::{Map, Value},
  tracing::{debug, warn},
  crate::{
    errors::GraphError as Error,
    ID, TYPE, VALUE, LANGUAGE, GRAPH,
    RdfNode, RdfTriple,
    datastore::resource::{Resource, reference},
    rdf::{RDF_TYPE, XSD_STRING, XSD_INTEGER, XSD_DOUBLE, XSD_BOOLEAN},
  },
};

type Result<T> = std::result::Result<T, Error>;

/* Flattened JSON-LD graph: an ordered list of node objects.
  Identity is the "@id" string, uniqueness is expected but
  not enforced, so every lookup returns all matches in graph order. */
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Graph {
  resources: Vec<Resource>,
}

/* Public */
impl Graph {
  /* Constructors */
  pub fn new() -> Self {
    Graph { resources: Vec::new() }
  }
  pub fn from_json_str(json: &str) -> Result<Self> {
    Self::from_value(serde_json::from_str(json)?)
  }
  /* Accepts a bare node array or a document with an "@graph" array */
  pub fn from_value(value: Value) -> Result<Self> {
    let nodes = match value {
      Value::Array(nodes) => nodes,
      Value::Object(mut document) => match document.remove(GRAPH) {
        Some(Value::Array(nodes)) => nodes,
        _ => return Err(Error::NotAnArray("an object without an \"@graph\" array".into())),
      },
      other => return Err(Error::NotAnArray(kind_of(&other).into())),
    };
    let mut resources = Vec::with_capacity(nodes.len());
    for node in nodes {
      match node {
        Value::Object(map) => resources.push(Resource::from(map)),
        other => warn!(node = %other, "skipping graph entry that is not a node object"),
      }
    }
    Ok(Graph { resources })
  }
  pub fn to_json_string(&self) -> Result<String> {
    Ok(serde_json::to_string(self)?)
  }
  pub fn to_json_string_pretty(&self) -> Result<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }

  /* Collection */
  pub fn len(&self) -> usize {
    self.resources.len()
  }
  pub fn is_empty(&self) -> bool {
    self.resources.is_empty()
  }
  pub fn iter(&self) -> std::slice::Iter<Resource> {
    self.resources.iter()
  }
  pub fn iter_mut(&mut self) -> std::slice::IterMut<Resource> {
    self.resources.iter_mut()
  }
  pub fn get(&self, index: usize) -> Option<&Resource> {
    self.resources.get(index)
  }
  pub fn get_mut(&mut self, index: usize) -> Option<&mut Resource> {
    self.resources.get_mut(index)
  }
  pub fn push(&mut self, resource: Resource) -> usize {
    self.resources.push(resource);
    self.resources.len() - 1
  }

  /* Lookups */
  pub fn contains_id(&self, id: &str) -> bool {
    self.position(id).is_some()
  }
  /* Index of the first resource whose "@id" is exactly id */
  pub fn position(&self, id: &str) -> Option<usize> {
    self.resources.iter().position(|resource| resource.id() == Some(id))
  }
  pub fn find_by_type(&self, type_iri: &str) -> Vec<&Resource> {
    self.resources.iter()
      .filter(|resource| resource.has_type(type_iri))
      .collect()
  }
  pub fn find_by_uri(&self, uri: &str) -> Vec<&Resource> {
    self.resources.iter()
      .filter(|resource| resource.id() == Some(uri))
      .collect()
  }
  pub fn find_by_uri_containing(&self, fragment: &str) -> Vec<&Resource> {
    self.resources.iter()
      .filter(|resource| match resource.id() {
        Some(id) => id.contains(fragment),
        None => false,
      })
      .collect()
  }

  /* Removes the first exact match, references to it are left dangling */
  pub fn delete_by_uri(&mut self, uri: &str) -> Option<Resource> {
    let index = self.position(uri)?;
    debug!(id = uri, "deleting resource");
    Some(self.resources.remove(index))
  }

  /* Triples */
  pub fn to_triples(&self) -> Vec<RdfTriple> {
    let mut triples = Vec::new();
    for resource in &self.resources {
      let subject = match resource.id() {
        Some(id) => RdfNode::from_id(id),
        None => {
          warn!("skipping resource without \"@id\" while building triples");
          continue
        },
      };
      for type_iri in resource.types() {
        triples.push([subject.clone(), RdfNode::from(RDF_TYPE), RdfNode::from_id(type_iri)]);
      }
      for (property, value) in resource.properties() {
        let mut objects = Vec::new();
        value_to_nodes(value, &mut objects);
        for object in objects {
          triples.push([subject.clone(), RdfNode::from(property.as_str()), object]);
        }
      }
    }
    triples
  }
  pub fn from_triples(triples: Vec<RdfTriple>) -> Self {
    let mut graph = Graph::new();
    for [subject, predicate, object] in triples {
      let subject_id = match node_to_id(&subject) {
        Some(id) => id,
        None => {
          warn!(subject = ?subject, "skipping triple with a literal subject");
          continue
        },
      };
      let predicate = match predicate {
        RdfNode::Named{ iri } => iri,
        other => {
          warn!(predicate = ?other, "skipping triple with a non-IRI predicate");
          continue
        },
      };
      let index = match graph.position(&subject_id) {
        Some(index) => index,
        None => graph.push(Resource::with_id(subject_id)),
      };
      let resource = &mut graph.resources[index];
      if predicate == RDF_TYPE {
        if let Some(type_iri) = node_to_id(&object) {
          append_value(resource, TYPE, Value::String(type_iri), true);
          continue
        }
      }
      append_value(resource, &predicate, node_to_value(object), false);
    }
    graph
  }
}
impl std::ops::Index<usize> for Graph {
  type Output = Resource;
  fn index(&self, index: usize) -> &Resource {
    &self.resources[index]
  }
}
impl std::ops::IndexMut<usize> for Graph {
  fn index_mut(&mut self, index: usize) -> &mut Resource {
    &mut self.resources[index]
  }
}
impl From<Vec<Resource>> for Graph {
  fn from(resources: Vec<Resource>) -> Self {
    Graph { resources }
  }
}
impl std::iter::FromIterator<Resource> for Graph {
  fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
    Graph { resources: iter.into_iter().collect() }
  }
}
impl IntoIterator for Graph {
  type Item = Resource;
  type IntoIter = std::vec::IntoIter<Resource>;
  fn into_iter(self) -> Self::IntoIter {
    self.resources.into_iter()
  }
}
impl<'a> IntoIterator for &'a Graph {
  type Item = &'a Resource;
  type IntoIter = std::slice::Iter<'a, Resource>;
  fn into_iter(self) -> Self::IntoIter {
    self.resources.iter()
  }
}

/* Utils */
fn kind_of(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}
fn value_to_nodes(value: &Value, nodes: &mut Vec<RdfNode>) {
  match value {
    Value::Null => {},
    Value::Array(items) => {
      for item in items {
        value_to_nodes(item, nodes);
      }
    },
    Value::String(s) => nodes.push(RdfNode::RawLit{ val: s.clone() }),
    Value::Bool(b) => nodes.push(RdfNode::TypedLit{ val: b.to_string(), datatype: XSD_BOOLEAN.into() }),
    Value::Number(n) => {
      let datatype = if n.is_f64() { XSD_DOUBLE } else { XSD_INTEGER };
      nodes.push(RdfNode::TypedLit{ val: n.to_string(), datatype: datatype.into() });
    },
    Value::Object(map) => {
      if let Some(id) = map.get(ID).and_then(Value::as_str) {
        nodes.push(RdfNode::from_id(id));
      }
      else if let Some(literal) = map.get(VALUE) {
        let val = match literal {
          Value::String(s) => s.clone(),
          other => other.to_string(),
        };
        if let Some(lang) = map.get(LANGUAGE).and_then(Value::as_str) {
          nodes.push(RdfNode::LangTaggedLit{ val, lang: lang.to_string() });
        }
        else if let Some(datatype) = map.get(TYPE).and_then(Value::as_str) {
          nodes.push(RdfNode::TypedLit{ val, datatype: datatype.to_string() });
        }
        else {
          value_to_nodes(literal, nodes);
        }
      }
      else {
        warn!(value = %value, "skipping nested object without \"@id\" or \"@value\"");
      }
    },
  }
}
fn node_to_id(node: &RdfNode) -> Option<String> {
  match node {
    RdfNode::Named{ iri } => Some(iri.clone()),
    RdfNode::Blank{ id } => Some(format!("_:{}", id)),
    _ => None,
  }
}
fn node_to_value(node: RdfNode) -> Value {
  match node {
    RdfNode::Named{ iri } => reference(&iri),
    RdfNode::Blank{ id } => reference(&format!("_:{}", id)),
    RdfNode::RawLit{ val } => Value::String(val),
    RdfNode::LangTaggedLit{ val, lang } => {
      let mut map = Map::new();
      map.insert(VALUE.to_string(), Value::String(val));
      map.insert(LANGUAGE.to_string(), Value::String(lang));
      Value::Object(map)
    },
    RdfNode::TypedLit{ val, datatype } => {
      match datatype.as_str() {
        XSD_STRING => return Value::String(val),
        XSD_INTEGER => if let Ok(n) = val.parse::<i64>() { return Value::from(n) },
        XSD_BOOLEAN => if let Ok(b) = val.parse::<bool>() { return Value::Bool(b) },
        _ => {},
      }
      let mut map = Map::new();
      map.insert(VALUE.to_string(), Value::String(val));
      map.insert(TYPE.to_string(), Value::String(datatype));
      Value::Object(map)
    },
  }
}
/* Single values stay scalar until a second one arrives,
  "@type" is always an array */
fn append_value(resource: &mut Resource, key: &str, value: Value, always_array: bool) {
  match resource.get_mut(key) {
    None if always_array => { resource.insert(key, Value::Array(vec![value])); },
    None => { resource.insert(key, value); },
    Some(Value::Array(items)) => items.push(value),
    Some(existing) => {
      let first = existing.take();
      *existing = Value::Array(vec![first, value]);
    },
  }
}

#[cfg(test)]
mod interface_tests {
  use super::*;
  use serde_json::json;
  fn people() -> Graph {
    Graph::from_value(json!([
      {"@id": "http://x/alice", "@type": ["ns#Person"], "ns#name": "Alice"},
      {"@id": "http://x/alice/address", "@type": ["ns#Address"]},
      {"@id": "http://x/bob", "@type": ["ns#Person", "ns#Admin"]},
    ])).unwrap()
  }
  #[test]
  fn default_constructor() {
    assert_eq!(Graph::new(), Graph::default());
    assert!(Graph::new().is_empty());
  }
  #[test]
  fn from_graph_document() -> Result<()> {
    let graph = Graph::from_json_str(r#"{"@graph": [{"@id": "a"}, 3, {"@id": "b"}]}"#)?;
    assert_eq!(graph.len(), 2);
    assert_eq!(graph[1].id(), Some("b"));
    Ok(())
  }
  #[test]
  fn rejects_non_graphs() {
    assert!(matches!(Graph::from_json_str("\"x\""), Err(Error::NotAnArray(_))));
    assert!(matches!(Graph::from_json_str("{}"), Err(Error::NotAnArray(_))));
    assert!(matches!(Graph::from_json_str("[{"), Err(Error::Serde(_))));
  }
  #[test]
  fn json_round_trip() -> Result<()> {
    let graph = people();
    assert_eq!(Graph::from_json_str(&graph.to_json_string()?)?, graph);
    Ok(())
  }
  #[test]
  fn lookups() {
    let graph = people();
    assert_eq!(graph.find_by_type("ns#Person").len(), 2);
    assert_eq!(graph.find_by_type("ns#Pers").len(), 0);
    assert_eq!(graph.find_by_uri("http://x/alice").len(), 1);
    assert_eq!(graph.find_by_uri_containing("http://x/alice").len(), 2);
    assert_eq!(graph.position("http://x/bob"), Some(2));
    assert!(!graph.contains_id("http://x/carol"));
  }
  #[test]
  fn delete_is_exact() {
    let mut graph = people();
    let removed = graph.delete_by_uri("http://x/alice");
    assert_eq!(removed.and_then(|r| r.id().map(String::from)).as_deref(), Some("http://x/alice"));
    assert!(graph.find_by_uri("http://x/alice").is_empty());
    /* substring lookups still see the address */
    assert_eq!(graph.find_by_uri_containing("http://x/alice").len(), 1);
    assert!(graph.delete_by_uri("http://x/ali").is_none());
    assert_eq!(graph.len(), 2);
  }
  #[test]
  fn repeated_predicates_keep_position() {
    let s = || RdfNode::from("http://x/c");
    let graph = Graph::from_triples(vec![
      [s(), RdfNode::from("ns#tags"), RdfNode::RawLit{ val: "a".into() }],
      [s(), RdfNode::from("ns#host"), RdfNode::RawLit{ val: "h".into() }],
      [s(), RdfNode::from(RDF_TYPE), RdfNode::from("ns#Configuration")],
      [s(), RdfNode::from("ns#tags"), RdfNode::RawLit{ val: "b".into() }],
      [s(), RdfNode::from(RDF_TYPE), RdfNode::from("ns#Job")],
      [s(), RdfNode::from("ns#tags"), RdfNode::RawLit{ val: "c".into() }],
    ]);
    let c = &graph[0];
    let keys: Vec<&String> = c.as_map().keys().collect();
    assert_eq!(keys, vec!["@id", "ns#tags", "ns#host", "@type"]);
    assert_eq!(c.get("ns#tags"), Some(&json!(["a", "b", "c"])));
    assert_eq!(c.get(TYPE), Some(&json!(["ns#Configuration", "ns#Job"])));
  }
  #[test]
  fn triples_round_trip() {
    let graph = Graph::from_value(json!([
      {
        "@id": "http://x/c",
        "@type": ["ns#Configuration"],
        "ns#host": "example.org",
        "ns#port": 22,
        "ns#clear": false,
        "ns#ratio": 0.5,
        "ns#label": {"@value": "Host", "@language": "en"},
        "ns#tags": [{"@value": "a"}, {"@value": "b"}],
        "ns#target": {"@id": "_:t"},
        "ns#nested": {"no": "id"},
      },
      {"ns#orphan": "skipped"},
    ])).unwrap();
    let triples = graph.to_triples();
    assert!(triples.contains(&[
      RdfNode::from("http://x/c"), RdfNode::from(RDF_TYPE), RdfNode::from("ns#Configuration")
    ]));
    assert!(triples.contains(&[
      RdfNode::from("http://x/c"), RdfNode::from("ns#target"), RdfNode::Blank{ id: "t".into() }
    ]));
    assert!(triples.contains(&[
      RdfNode::from("http://x/c"),
      RdfNode::from("ns#port"),
      RdfNode::TypedLit{ val: "22".into(), datatype: XSD_INTEGER.into() }
    ]));
    /* type, host, port, clear, ratio, label, 2 tags, target */
    assert_eq!(triples.len(), 9);

    let rebuilt = Graph::from_triples(triples);
    assert_eq!(rebuilt.len(), 1);
    let c = &rebuilt[0];
    assert_eq!(c.get(TYPE), Some(&json!(["ns#Configuration"])));
    assert_eq!(c.get("ns#host"), Some(&json!("example.org")));
    assert_eq!(c.get("ns#port"), Some(&json!(22)));
    assert_eq!(c.get("ns#clear"), Some(&json!(false)));
    assert_eq!(c.get("ns#ratio"), Some(&json!({"@value": "0.5", "@type": XSD_DOUBLE})));
    assert_eq!(c.get("ns#label"), Some(&json!({"@value": "Host", "@language": "en"})));
    assert_eq!(c.get("ns#tags"), Some(&json!(["a", "b"])));
    assert_eq!(c.get("ns#target"), Some(&json!({"@id": "_:t"})));
  }
}
