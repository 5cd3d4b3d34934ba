/*
  Readers for JSON-LD values as they appear in a flattened
  node object: a bare scalar, a {"@value": ..} literal wrapper,
  a {"@id": ..} reference, or an array of any of those.
*/

use {
  serde_json::Value,
  tracing::warn,
  crate::{ID, VALUE},
};

/* First element of an array, or the value itself */
pub fn first(value: &Value) -> Option<&Value> {
  match value {
    Value::Array(items) => items.first(),
    other => Some(other),
  }
}

/* Strip a {"@value": ..} wrapper */
pub fn literal(value: &Value) -> &Value {
  match value {
    Value::Object(map) => map.get(VALUE).unwrap_or(value),
    other => other,
  }
}

/// String form of a literal; "" when absent or not a scalar.
pub fn plain_string(value: Option<&Value>) -> String {
  match value.and_then(first).map(literal) {
    Some(Value::String(s)) => s.clone(),
    Some(Value::Number(n)) => n.to_string(),
    Some(Value::Bool(b)) => b.to_string(),
    _ => String::new(),
  }
}

pub fn integer(value: Option<&Value>) -> Option<i64> {
  match value.and_then(first).map(literal)? {
    Value::Number(n) => n.as_i64().or_else(|| {
      n.as_f64()
        .filter(|f| f.fract() == 0.0)
        .map(|f| f as i64)
    }),
    Value::String(s) => s.trim().parse().ok(),
    _ => None,
  }
}

pub fn boolean(value: Option<&Value>) -> Option<bool> {
  match value.and_then(first).map(literal)? {
    Value::Bool(b) => Some(*b),
    Value::String(s) => match s.trim() {
      "true" | "1" => Some(true),
      "false" | "0" => Some(false),
      _ => None,
    },
    _ => None,
  }
}

/// IRI held by a reference object, or a bare string.
pub fn iri(value: Option<&Value>) -> Option<String> {
  match value.and_then(first)? {
    Value::Object(map) => map.get(ID).and_then(Value::as_str).map(String::from),
    Value::String(s) => Some(s.clone()),
    _ => None,
  }
}

/// Flattens a reference value, at any array depth, into the ids it points at.
/// Objects without "@id" contribute nothing and are reported.
pub fn read_references(value: Option<&Value>) -> Vec<String> {
  let mut ids = Vec::new();
  if let Some(value) = value {
    collect_references(value, &mut ids);
  }
  ids
}
fn collect_references(value: &Value, ids: &mut Vec<String>) {
  match value {
    Value::Array(items) => {
      for item in items {
        collect_references(item, ids);
      }
    },
    Value::Object(map) => match map.get(ID).and_then(Value::as_str) {
      Some(id) => ids.push(id.to_string()),
      None if map.contains_key(ID) => warn!(value = %value, "non-string \"@id\" on referenced value"),
      None => warn!(value = %value, "\"@id\" property is missing on referenced value"),
    },
    _ => {},
  }
}
