use {
  chrono::{Datelike, NaiveDate},
  serde::{Serialize, Deserialize},
  serde_json::{Map, Value},
  tracing::warn,
  crate::{
    ID, TYPE, VALUE,
    rdf::{jsonld, namespace::Term},
  },
};

/* One node of a JSON-LD graph: property IRI -> value,
  plus the reserved "@id" and "@type" keys. */
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resource(Map<String, Value>);

/* Public */
impl Resource {
  /* Constructors */
  pub fn new() -> Self {
    Resource(Map::new())
  }
  pub fn with_id(id: impl Into<String>) -> Self {
    let mut map = Map::new();
    map.insert(ID.to_string(), Value::String(id.into()));
    Resource(map)
  }
  pub fn typed(id: impl Into<String>, types: &[&str]) -> Self {
    let mut resource = Self::with_id(id);
    resource.0.insert(
      TYPE.to_string(),
      Value::Array(types.iter().map(|t| Value::String(t.to_string())).collect()),
    );
    resource
  }

  /* Identity */
  pub fn id(&self) -> Option<&str> {
    self.0.get(ID).and_then(Value::as_str)
  }
  pub fn set_id(&mut self, id: impl Into<String>) {
    self.0.insert(ID.to_string(), Value::String(id.into()));
  }
  /* "@type" is normally an array but a single string is accepted */
  pub fn types(&self) -> Vec<&str> {
    match self.0.get(TYPE) {
      Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).collect(),
      Some(Value::String(t)) => vec![t.as_str()],
      _ => Vec::new(),
    }
  }
  pub fn has_type(&self, type_iri: &str) -> bool {
    self.types().contains(&type_iri)
  }

  /* Raw access */
  pub fn get(&self, key: &str) -> Option<&Value> {
    self.0.get(key)
  }
  pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
    self.0.get_mut(key)
  }
  pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
    self.0.insert(key.into(), value)
  }
  /* Remaining keys keep their order */
  pub fn remove(&mut self, key: &str) -> Option<Value> {
    self.0.shift_remove(key)
  }
  pub fn contains(&self, key: &str) -> bool {
    self.0.contains_key(key)
  }
  /* Property entries, reserved keys excluded */
  pub fn properties(&self) -> impl Iterator<Item = (&String, &Value)> {
    self.0.iter().filter(|(key, _)| !key.starts_with('@'))
  }
  pub fn as_map(&self) -> &Map<String, Value> {
    &self.0
  }
  pub fn into_map(self) -> Map<String, Value> {
    self.0
  }

  /* String: absent reads as "", None and "" both store "" */
  pub fn get_string(&self, property: &Term) -> String {
    jsonld::plain_string(self.get(property.iri()))
  }
  pub fn set_string(&mut self, property: &Term, value: Option<&str>) {
    let value = value.unwrap_or_default();
    self.insert(property.iri(), Value::String(value.to_string()));
  }

  /* Integer, boolean and date: None removes the property */
  pub fn get_integer(&self, property: &Term) -> Option<i64> {
    jsonld::integer(self.get(property.iri()))
  }
  pub fn set_integer(&mut self, property: &Term, value: Option<i64>) {
    self.set_or_remove(property, value.map(Value::from));
  }
  pub fn get_boolean(&self, property: &Term) -> Option<bool> {
    jsonld::boolean(self.get(property.iri()))
  }
  pub fn set_boolean(&mut self, property: &Term, value: Option<bool>) {
    self.set_or_remove(property, value.map(Value::Bool));
  }
  pub fn get_date(&self, property: &Term) -> Option<NaiveDate> {
    let value = self.get_string(property);
    if value.is_empty() {
      return None
    }
    let date = parse_date(&value);
    if date.is_none() {
      warn!(property = %property, value = %value, "unparsable date literal");
    }
    date
  }
  pub fn set_date(&mut self, property: &Term, value: Option<NaiveDate>) {
    self.set_or_remove(property, value.map(|date| Value::String(format_date(&date))));
  }

  /* Raw value, None removes */
  pub fn get_value(&self, property: &Term) -> Option<&Value> {
    self.get(property.iri())
  }
  pub fn set_value(&mut self, property: &Term, value: Option<Value>) {
    self.set_or_remove(property, value);
  }

  /* List of literals, stored as [{"@value": ..}, ..] */
  pub fn get_value_list(&self, property: &Term) -> Vec<Value> {
    match self.get(property.iri()) {
      None | Some(Value::Null) => Vec::new(),
      Some(Value::Array(items)) => items.iter().map(|item| unwrap_value(item).clone()).collect(),
      Some(item) => vec![unwrap_value(item).clone()],
    }
  }
  pub fn set_value_list(&mut self, property: &Term, values: &[Value]) {
    if values.is_empty() {
      self.remove(property.iri());
      return
    }
    let list = values.iter()
      .map(|value| {
        let mut wrapper = Map::new();
        wrapper.insert(VALUE.to_string(), value.clone());
        Value::Object(wrapper)
      })
      .collect();
    self.insert(property.iri(), Value::Array(list));
  }

  /* IRI, stored as {"@id": ..} */
  pub fn get_iri(&self, property: &Term) -> Option<String> {
    jsonld::iri(self.get(property.iri()))
  }
  pub fn set_iri(&mut self, property: &Term, value: Option<&str>) {
    self.set_or_remove(property, value.map(reference));
  }

  /* References */
  pub fn references(&self, property: &Term) -> Vec<String> {
    jsonld::read_references(self.get(property.iri()))
  }
  /* Replaces the property with exactly these references,
    referenced resources are left alone */
  pub fn set_objects<S: AsRef<str>>(&mut self, property: &Term, uris: &[S]) {
    let references = uris.iter().map(|uri| reference(uri.as_ref())).collect();
    self.insert(property.iri(), Value::Array(references));
  }
}
impl From<Map<String, Value>> for Resource {
  fn from(map: Map<String, Value>) -> Self {
    Resource(map)
  }
}

/* Private */
impl Resource {
  fn set_or_remove(&mut self, property: &Term, value: Option<Value>) {
    match value {
      Some(value) => { self.insert(property.iri(), value); },
      None => { self.remove(property.iri()); },
    }
  }
}

/* Utils */
pub fn reference(uri: &str) -> Value {
  let mut map = Map::new();
  map.insert(ID.to_string(), Value::String(uri.to_string()));
  Value::Object(map)
}
fn unwrap_value(item: &Value) -> &Value {
  match item {
    Value::Object(map) if map.contains_key(VALUE) => &map[VALUE],
    other => other,
  }
}
pub fn format_date<D: Datelike>(date: &D) -> String {
  format!("{}-{:02}-{:02}", date.year(), date.month(), date.day())
}
/* Accepts "YYYY-MM-DD" and full RFC 3339 timestamps */
pub fn parse_date(value: &str) -> Option<NaiveDate> {
  let value = value.trim();
  NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
    .or_else(|| {
      chrono::DateTime::parse_from_rfc3339(value).ok()
        .map(|timestamp| timestamp.date_naive())
    })
}
