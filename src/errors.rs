use thiserror::Error;

type Source<E> = Box<E>;

#[derive(Debug, Error)]
pub enum GraphError {
  #[error("JSON-LD graph must be an array of nodes or an object with an \"@graph\" array, found {0}")]
  NotAnArray(String),
  #[error("no resource with \"@id\" {0} exists in the graph")]
  UnknownResource(String),
  #[error("could not allocate a fresh identifier in {namespace} after {attempts} attempts")]
  IdSpaceExhausted{ namespace: String, attempts: usize },
  #[error("{0}")]
  Serde(#[source] Source<serde_json::Error>),
  #[error("{0}")]
  Parser(#[source] Source<ParserError>),
}
impl From<serde_json::Error> for GraphError {
  fn from(err: serde_json::Error) -> GraphError {
    GraphError::Serde(Box::new(err))
  }
}
impl From<ParserError> for GraphError {
  fn from(err: ParserError) -> GraphError {
    GraphError::Parser(Box::new(err))
  }
}
impl From<rio_xml::RdfXmlError> for GraphError {
  fn from(err: rio_xml::RdfXmlError) -> GraphError {
    GraphError::Parser(Box::new(err.into()))
  }
}
impl From<std::io::Error> for GraphError {
  fn from(err: std::io::Error) -> GraphError {
    GraphError::Parser(Box::new(ParserError::Io(Box::new(err))))
  }
}

#[derive(Debug, Error)]
pub enum ParserError {
  #[error("{0}")]
  Turtle(#[source] Source<rio_turtle::TurtleError>),
  #[error("{0}")]
  RdfXml(#[source] Source<rio_xml::RdfXmlError>),
  #[error("{0}")]
  Io(#[source] Source<std::io::Error>),
}
impl From<rio_turtle::TurtleError> for ParserError {
  fn from(err: rio_turtle::TurtleError) -> ParserError {
    ParserError::Turtle(Box::new(err))
  }
}
impl From<rio_xml::RdfXmlError> for ParserError {
  fn from(err: rio_xml::RdfXmlError) -> ParserError {
    ParserError::RdfXml(Box::new(err))
  }
}

#[derive(Debug, Error)]
pub enum DescriptorError {
  #[error("dialog descriptor must be a JSON object")]
  NotAnObject,
  #[error("dialog descriptor is missing the {0} header")]
  MissingHeader(&'static str),
  #[error("dialog descriptor uses unknown directive {0}")]
  UnknownDirective(String),
  #[error("field {field} has unknown \"$type\" {kind:?}, expected one of \"str\", \"int\", \"bool\"")]
  UnknownKind{ field: String, kind: String },
  #[error("field {0} must be an object with \"$type\" and \"$label\"")]
  InvalidField(String),
  #[error("no built-in dialog descriptor for plugin {0}")]
  UnknownPlugin(String),
  #[error("{0}")]
  Serde(#[source] Source<serde_json::Error>),
}
impl From<serde_json::Error> for DescriptorError {
  fn from(err: serde_json::Error) -> DescriptorError {
    DescriptorError::Serde(Box::new(err))
  }
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read service config at {}: {source}", .path.display())]
  Read{ path: std::path::PathBuf, source: std::io::Error },
  #[error("invalid service config: {0}")]
  Parse(#[source] Source<toml::de::Error>),
}
impl From<toml::de::Error> for ConfigError {
  fn from(err: toml::de::Error) -> ConfigError {
    ConfigError::Parse(Box::new(err))
  }
}

#[cfg(test)]
mod unit_tests {
  use super::*;
  #[test]
  fn writer_errors_land_in_parser() {
    let err = GraphError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
    assert!(matches!(&err, GraphError::Parser(inner) if matches!(**inner, ParserError::Io(_))));
    assert_eq!(err.to_string(), "disk full");
    assert!(std::error::Error::source(&err).is_some());
  }
}
