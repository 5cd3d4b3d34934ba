/* A Namespace is the IRI prefix of an ontology, e.g.
  "http://plugins.linkedpipes.com/ontology/l-filesToScp#".
  Terms pair the namespace with a local name and keep the
  qualified IRI around so accessors never concatenate. */

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace {
  prefix: String,
}
impl Namespace {
  pub fn new(prefix: impl Into<String>) -> Self {
    Namespace { prefix: prefix.into() }
  }
  pub fn prefix(&self) -> &str {
    &self.prefix
  }
  pub fn term(&self, local: &str) -> Term {
    Term {
      iri: format!("{}{}", self.prefix, local),
      split: self.prefix.len(),
    }
  }
  /* The local name of iri if it lives in this namespace */
  pub fn local_name<'a>(&self, iri: &'a str) -> Option<&'a str> {
    iri.strip_prefix(self.prefix.as_str())
  }
}
impl std::fmt::Display for Namespace {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "{}", self.prefix)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Term {
  iri: String,
  split: usize,
}
impl Term {
  pub fn iri(&self) -> &str {
    &self.iri
  }
  pub fn namespace(&self) -> &str {
    &self.iri[..self.split]
  }
  pub fn local(&self) -> &str {
    &self.iri[self.split..]
  }
}
impl AsRef<str> for Term {
  fn as_ref(&self) -> &str {
    &self.iri
  }
}
impl std::fmt::Display for Term {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "{}", self.iri)
  }
}
