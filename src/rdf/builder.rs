use {
  rio_api::{
    formatter::TriplesFormatter,
    model::{NamedNode, BlankNode, NamedOrBlankNode, Literal, Term, Triple as RioTriple},
  },
  rio_turtle::NTriplesFormatter,
  rio_xml::RdfXmlFormatter,
  tracing::warn,
  crate::{
    errors::GraphError as Error,
    RdfNode, RdfTriple,
    datastore::graph::Graph,
  },
};

type Result<T> = std::result::Result<T, Error>;

pub fn to_ntriples(graph: &Graph) -> Result<String> {
  let mut formatter = NTriplesFormatter::new(Vec::<u8>::new());
  for triple in graph.to_triples() {
    if let Some(rio_triple) = to_rio_triple(&triple) {
      formatter.format(&rio_triple)?;
    }
  }
  Ok(String::from_utf8_lossy(&formatter.finish()).into_owned())
}
pub fn to_rdf_xml(graph: &Graph) -> Result<Vec<u8>> {
  let mut formatter = RdfXmlFormatter::new(Vec::<u8>::new())?;
  for triple in graph.to_triples() {
    if let Some(rio_triple) = to_rio_triple(&triple) {
      formatter.format(&rio_triple)?;
    }
  }
  Ok(formatter.finish()?)
}

fn to_rio_triple(triple: &RdfTriple) -> Option<RioTriple> {
  let subject = match &triple[0] {
    RdfNode::Named{ iri } => NamedOrBlankNode::NamedNode(NamedNode{ iri }),
    RdfNode::Blank{ id } => NamedOrBlankNode::BlankNode(BlankNode{ id }),
    literal => {
      warn!(subject = ?literal, "literal subjects cannot be written");
      return None
    },
  };
  let predicate = match &triple[1] {
    RdfNode::Named{ iri } => NamedNode{ iri },
    other => {
      warn!(predicate = ?other, "predicates must be IRIs");
      return None
    },
  };
  let object = match &triple[2] {
    RdfNode::Named{ iri } => Term::NamedNode(NamedNode{ iri }),
    RdfNode::Blank{ id } => Term::BlankNode(BlankNode{ id }),
    RdfNode::RawLit{ val } => Term::Literal(Literal::Simple{ value: val }),
    RdfNode::LangTaggedLit{ val, lang } => Term::Literal(Literal::LanguageTaggedString{
      value: val,
      language: lang,
    }),
    RdfNode::TypedLit{ val, datatype } => Term::Literal(Literal::Typed{
      value: val,
      datatype: NamedNode{ iri: datatype },
    }),
  };
  Some(RioTriple { subject, predicate, object })
}

#[cfg(test)]
mod unit_tests {
  use super::*;
  use serde_json::json;
  use crate::rdf::parser;
  fn configuration() -> Graph {
    Graph::from_value(json!([{
      "@id": "http://x/c",
      "@type": ["http://x/o#Configuration"],
      "http://x/o#host": "example.org",
      "http://x/o#port": 22,
      "http://x/o#createDirectory": true,
    }])).unwrap()
  }
  #[test]
  fn ntriples_output() -> Result<()> {
    let document = to_ntriples(&configuration())?;
    assert!(document.contains(
      "<http://x/c> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://x/o#Configuration> ."
    ));
    assert!(document.contains("<http://x/c> <http://x/o#host> \"example.org\" ."));
    assert!(document.contains("\"22\"^^<http://www.w3.org/2001/XMLSchema#integer>"));
    assert_eq!(document.lines().count(), 4);
    Ok(())
  }
  #[test]
  fn ntriples_read_back() -> Result<()> {
    let graph = configuration();
    let document = to_ntriples(&graph)?;
    assert_eq!(parser::parse_turtle(document.as_bytes(), "http://x/")?, graph);
    Ok(())
  }
  #[test]
  fn rdf_xml_read_back() -> Result<()> {
    let graph = configuration();
    let document = to_rdf_xml(&graph)?;
    assert_eq!(parser::parse_rdf_xml(document.as_slice(), "http://x/")?, graph);
    Ok(())
  }
}
