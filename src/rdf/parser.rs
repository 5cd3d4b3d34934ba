/*
  Reads RDF documents into a JSON-LD graph so a stored
  configuration can be handed to a dialog.
*/

use {
  std::io::BufRead,
  rio_api::{
    parser::TriplesParser,
    model::{
      Triple as RioTriple,
      NamedOrBlankNode,
      NamedNode, BlankNode,
      Term,
      Literal,
    },
  },
  rio_turtle::{TurtleParser, TurtleError},
  rio_xml::{RdfXmlParser, RdfXmlError},
  crate::{
    errors::ParserError as Error,
    RdfNode, RdfTriple,
    datastore::graph::Graph,
  },
};

type Result<T> = std::result::Result<T, Error>;

/* Turtle, which N-Triples is a subset of */
pub fn parse_turtle<R: BufRead>(reader: R, base_iri: &str) -> Result<Graph> {
  let mut triples: Vec<RdfTriple> = Vec::new();
  TurtleParser::new(reader, base_iri)?
    .parse_all(&mut |t| {
      triples.push(to_rdf_triple(&t));
      Ok(()) as std::result::Result<(), TurtleError>
    })?;
  Ok(Graph::from_triples(triples))
}
pub fn parse_rdf_xml<R: BufRead>(reader: R, base_iri: &str) -> Result<Graph> {
  let mut triples: Vec<RdfTriple> = Vec::new();
  RdfXmlParser::new(reader, base_iri)?
    .parse_all(&mut |t| {
      triples.push(to_rdf_triple(&t));
      Ok(()) as std::result::Result<(), RdfXmlError>
    })?;
  Ok(Graph::from_triples(triples))
}

fn to_rdf_triple(t: &RioTriple) -> RdfTriple {
  let s = match &t.subject {
    NamedOrBlankNode::NamedNode(NamedNode{iri}) => RdfNode::Named{iri: iri.to_string()},
    NamedOrBlankNode::BlankNode(BlankNode{id}) => RdfNode::Blank{id: id.to_string()},
  };
  let p = RdfNode::Named{iri: t.predicate.iri.to_string()};
  let o = match &t.object {
    Term::NamedNode(NamedNode{iri}) => RdfNode::Named{iri: iri.to_string()},
    Term::BlankNode(BlankNode{id}) => RdfNode::Blank{id: id.to_string()},
    Term::Literal(lit) => match lit {
      Literal::Simple{value} => RdfNode::RawLit{val: value.to_string()},
      Literal::LanguageTaggedString{value, language} => RdfNode::LangTaggedLit{
        val: value.to_string(),
        lang: language.to_string(),
      },
      Literal::Typed{value, datatype: NamedNode{iri}} => RdfNode::TypedLit{
        val: value.to_string(),
        datatype: iri.to_string(),
      },
    },
  };
  [s, p, o]
}

#[cfg(test)]
mod unit_tests {
  use super::*;
  use serde_json::json;
  #[test]
  fn parse_ntriples() -> Result<()> {
    let document = concat!(
      "<http://x/c> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://x/o#Configuration> .\n",
      "<http://x/c> <http://x/o#port> \"22\"^^<http://www.w3.org/2001/XMLSchema#integer> .\n",
      "<http://x/c> <http://x/o#host> \"example.org\" .\n",
      "<http://x/c> <http://x/o#label> \"Host\"@en .\n",
      "<http://x/c> <http://x/o#target> _:t .\n",
    );
    let graph = parse_turtle(document.as_bytes(), "http://x/")?;
    assert_eq!(graph.len(), 1);
    let c = &graph[0];
    assert_eq!(c.id(), Some("http://x/c"));
    assert!(c.has_type("http://x/o#Configuration"));
    assert_eq!(c.get("http://x/o#port"), Some(&json!(22)));
    assert_eq!(c.get("http://x/o#host"), Some(&json!("example.org")));
    assert_eq!(c.get("http://x/o#label"), Some(&json!({"@value": "Host", "@language": "en"})));
    assert_eq!(c.get("http://x/o#target"), Some(&json!({"@id": "_:t"})));
    Ok(())
  }
  #[test]
  fn parse_turtle_prefixes() -> Result<()> {
    let document = "@prefix o: <http://x/o#> .\n<c> a o:Configuration ; o:threads 4 .\n";
    let graph = parse_turtle(document.as_bytes(), "http://x/")?;
    assert_eq!(graph[0].id(), Some("http://x/c"));
    assert_eq!(graph[0].get("http://x/o#threads"), Some(&json!(4)));
    Ok(())
  }
  #[test]
  fn parse_xml() -> Result<()> {
    let document = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:o="http://x/o#">
  <o:Configuration rdf:about="http://x/c">
    <o:host>example.org</o:host>
  </o:Configuration>
</rdf:RDF>"#;
    let graph = parse_rdf_xml(document.as_bytes(), "http://x/")?;
    assert_eq!(graph.len(), 1);
    assert!(graph[0].has_type("http://x/o#Configuration"));
    assert_eq!(graph[0].get("http://x/o#host"), Some(&json!("example.org")));
    Ok(())
  }
  #[test]
  fn syntax_errors_surface() {
    assert!(matches!(
      parse_turtle("<http://x/c> <http://x/p> .".as_bytes(), "http://x/"),
      Err(Error::Turtle(_))
    ));
  }
}
