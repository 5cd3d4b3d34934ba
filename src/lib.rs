/* Exports */

pub mod config;
pub mod datastore;
pub mod dialog;
pub mod errors;
pub mod rdf;
pub mod service;

pub use config::ServiceConfig;
pub use datastore::graph::Graph;
pub use datastore::resource::Resource;
pub use dialog::descriptor::{DialogDescriptor, FieldDescriptor, FieldKind};
pub use rdf::namespace::{Namespace, Term};
pub use service::{ObjectsUpdate, RdfService, ResourceEntry, Single};

/* Common Definitions */

/* Reserved JSON-LD keys */
pub const ID: &str = "@id";
pub const TYPE: &str = "@type";
pub const VALUE: &str = "@value";
pub const LANGUAGE: &str = "@language";
pub const GRAPH: &str = "@graph";

pub type RdfTriple = [RdfNode; 3];

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize, Hash)]
pub enum RdfNode {
  Named{ iri: String },
  Blank{ id: String },
  RawLit{ val: String },
  LangTaggedLit{ val: String, lang: String },
  TypedLit{ val: String, datatype: String },
}
impl RdfNode {
  /* Blank node ids use the "_:" prefix inside a JSON-LD graph */
  pub fn from_id(id: &str) -> Self {
    match id.strip_prefix("_:") {
      Some(label) => Self::Blank{ id: label.to_string() },
      None => Self::Named{ iri: id.to_string() },
    }
  }
  pub fn is_literal(&self) -> bool {
    matches!(self, Self::RawLit{..} | Self::LangTaggedLit{..} | Self::TypedLit{..})
  }
}
impl std::convert::From<&str> for RdfNode {
  fn from(s: &str) -> Self {
    Self::Named{ iri: s.to_string() }
  }
}

#[cfg(test)]
mod unit_tests {
  use super::*;
  #[test]
  fn node_from_id() {
    assert_eq!(RdfNode::from_id("_:b0"), RdfNode::Blank{ id: "b0".into() });
    assert_eq!(RdfNode::from_id("http://x/a"), RdfNode::from("http://x/a"));
    assert!(!RdfNode::from_id("http://x/a").is_literal());
    assert!(RdfNode::RawLit{ val: "a".into() }.is_literal());
  }
}
