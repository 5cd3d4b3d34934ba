/*
  Declarative description of a plugin's configuration dialog:

    {
      "$namespace": "http://plugins.linkedpipes.com/ontology/l-filesToScp#",
      "$type": "Configuration",
      "$options": { "$predicate": "auto", "$control": "auto" },
      "port": { "$type": "int", "$label": "Port number" }
    }

  Every key without a "$" is a field. The rendering side is not
  part of this crate, only the metadata is.
*/

use {
  serde::{Serialize, Deserialize},
  serde_json::{Map, Value},
  crate::{
    errors::DescriptorError as Error,
    rdf::namespace::{Namespace, Term},
  },
};

type Result<T> = std::result::Result<T, Error>;

const NAMESPACE: &str = "$namespace";
const TYPE: &str = "$type";
const OPTIONS: &str = "$options";
const LABEL: &str = "$label";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
  Str,
  Int,
  Bool,
}
impl FieldKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      FieldKind::Str => "str",
      FieldKind::Int => "int",
      FieldKind::Bool => "bool",
    }
  }
  fn parse(kind: &str) -> Option<Self> {
    match kind {
      "str" => Some(FieldKind::Str),
      "int" => Some(FieldKind::Int),
      "bool" => Some(FieldKind::Bool),
      _ => None,
    }
  }
}
impl std::fmt::Display for FieldKind {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogOptions {
  #[serde(rename = "$predicate", default = "auto")]
  pub predicate: String,
  #[serde(rename = "$control", default = "auto")]
  pub control: String,
}
fn auto() -> String {
  "auto".into()
}
impl Default for DialogOptions {
  fn default() -> Self {
    DialogOptions { predicate: auto(), control: auto() }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
  pub name: String,
  pub kind: FieldKind,
  pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogDescriptor {
  pub namespace: Namespace,
  pub type_name: String,
  pub options: DialogOptions,
  /* In declaration order */
  pub fields: Vec<FieldDescriptor>,
}

/* Public */
impl DialogDescriptor {
  pub fn from_json(json: &str) -> Result<Self> {
    Self::from_value(serde_json::from_str(json)?)
  }
  pub fn from_value(value: Value) -> Result<Self> {
    let mut map = match value {
      Value::Object(map) => map,
      _ => return Err(Error::NotAnObject),
    };
    let namespace = take_header(&mut map, NAMESPACE)?;
    let type_name = take_header(&mut map, TYPE)?;
    let options = match map.shift_remove(OPTIONS) {
      Some(options) => serde_json::from_value(options)?,
      None => DialogOptions::default(),
    };
    let mut fields = Vec::with_capacity(map.len());
    for (name, field) in map {
      if name.starts_with('$') {
        return Err(Error::UnknownDirective(name))
      }
      fields.push(parse_field(name, field)?);
    }
    Ok(DialogDescriptor {
      namespace: Namespace::new(namespace),
      type_name,
      options,
      fields,
    })
  }
  pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
    self.fields.iter().find(|field| field.name == name)
  }
  /* "$predicate": "auto" binds each field to namespace + field name */
  pub fn predicate(&self, field: &FieldDescriptor) -> Term {
    self.namespace.term(&field.name)
  }
  pub fn type_term(&self) -> Term {
    self.namespace.term(&self.type_name)
  }
  /* Inverse of from_value */
  pub fn to_value(&self) -> Value {
    let mut map = Map::new();
    map.insert(NAMESPACE.into(), Value::String(self.namespace.prefix().into()));
    map.insert(TYPE.into(), Value::String(self.type_name.clone()));
    map.insert(OPTIONS.into(), serde_json::json!({
      "$predicate": self.options.predicate,
      "$control": self.options.control,
    }));
    for field in &self.fields {
      map.insert(field.name.clone(), serde_json::json!({
        "$type": field.kind.as_str(),
        "$label": field.label,
      }));
    }
    Value::Object(map)
  }
}

/* Utils */
fn take_header(map: &mut Map<String, Value>, key: &'static str) -> Result<String> {
  match map.shift_remove(key) {
    Some(Value::String(value)) => Ok(value),
    _ => Err(Error::MissingHeader(key)),
  }
}
fn parse_field(name: String, field: Value) -> Result<FieldDescriptor> {
  let mut field = match field {
    Value::Object(field) => field,
    _ => return Err(Error::InvalidField(name)),
  };
  let kind = match field.shift_remove(TYPE) {
    Some(Value::String(kind)) => match FieldKind::parse(&kind) {
      Some(kind) => kind,
      None => return Err(Error::UnknownKind{ field: name, kind }),
    },
    _ => return Err(Error::InvalidField(name)),
  };
  let label = match field.shift_remove(LABEL) {
    Some(Value::String(label)) => label,
    _ => return Err(Error::InvalidField(name)),
  };
  if let Some(key) = field.keys().next() {
    return Err(Error::UnknownDirective(format!("{}.{}", name, key)))
  }
  Ok(FieldDescriptor { name, kind, label })
}

#[cfg(test)]
mod interface_tests {
  use super::*;
  use serde_json::json;
  fn endpoint_list() -> Value {
    json!({
      "$namespace": "http://plugins.linkedpipes.com/ontology/e-sparqlEndpointList#",
      "$type": "Configuration",
      "$options": {"$predicate": "auto", "$control": "auto"},
      "threads": {"$type": "int", "$label": "Used threads"},
      "timeLimit": {"$type": "int", "$label": "Query time limit"},
    })
  }
  #[test]
  fn parse_keeps_field_order() -> Result<()> {
    let descriptor = DialogDescriptor::from_value(endpoint_list())?;
    assert_eq!(descriptor.type_name, "Configuration");
    assert_eq!(descriptor.options, DialogOptions::default());
    let names: Vec<&str> = descriptor.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["threads", "timeLimit"]);
    let threads = descriptor.field("threads").unwrap();
    assert_eq!(threads.kind, FieldKind::Int);
    assert_eq!(threads.label, "Used threads");
    assert_eq!(
      descriptor.predicate(threads).iri(),
      "http://plugins.linkedpipes.com/ontology/e-sparqlEndpointList#threads"
    );
    assert_eq!(descriptor.type_term().local(), "Configuration");
    Ok(())
  }
  #[test]
  fn options_default_to_auto() -> Result<()> {
    let descriptor = DialogDescriptor::from_json(
      r#"{"$namespace": "ns#", "$type": "C", "$options": {"$control": "manual"}}"#
    )?;
    assert_eq!(descriptor.options.predicate, "auto");
    assert_eq!(descriptor.options.control, "manual");
    assert!(descriptor.fields.is_empty());
    Ok(())
  }
  #[test]
  fn value_round_trip() -> Result<()> {
    let descriptor = DialogDescriptor::from_value(endpoint_list())?;
    assert_eq!(descriptor.to_value(), endpoint_list());
    Ok(())
  }
  #[test]
  fn invalid_descriptors() {
    assert!(matches!(DialogDescriptor::from_json("[]"), Err(Error::NotAnObject)));
    assert!(matches!(DialogDescriptor::from_json("{"), Err(Error::Serde(_))));
    assert!(matches!(
      DialogDescriptor::from_value(json!({"$type": "C"})),
      Err(Error::MissingHeader("$namespace"))
    ));
    assert!(matches!(
      DialogDescriptor::from_value(json!({"$namespace": "ns#", "$type": "C", "$onLoad": {}})),
      Err(Error::UnknownDirective(_))
    ));
    assert!(matches!(
      DialogDescriptor::from_value(json!({"$namespace": "ns#", "$type": "C", "x": {"$type": "date", "$label": "X"}})),
      Err(Error::UnknownKind{ .. })
    ));
    assert!(matches!(
      DialogDescriptor::from_value(json!({"$namespace": "ns#", "$type": "C", "x": "str"})),
      Err(Error::InvalidField(_))
    ));
    assert!(matches!(
      DialogDescriptor::from_value(json!({"$namespace": "ns#", "$type": "C", "x": {"$type": "str"}})),
      Err(Error::InvalidField(_))
    ));
  }
}
