use {
  serde::{Serialize, Deserialize},
  crate::errors::ConfigError as Error,
};

type Result<T> = std::result::Result<T, Error>;

/* How fresh identifier suffixes are drawn */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
  Random,
  Sequential,
}
impl Default for IdStrategy {
  fn default() -> Self { IdStrategy::Random }
}

/// Settings of an [`RdfService`](crate::RdfService), persisted as TOML.
/// Every field has a default, so an empty document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
  /// Namespace of resources created by the service.
  #[serde(default = "default_temp_namespace")]
  pub temp_namespace: String,
  /// Namespace used when a referenced object arrives without an "@id".
  #[serde(default = "default_blank_namespace")]
  pub blank_namespace: String,
  /// Number of characters in a generated identifier suffix.
  #[serde(default = "default_id_length")]
  pub id_length: usize,
  /// Candidates tried before giving up on a collision-free identifier.
  #[serde(default = "default_max_id_attempts")]
  pub max_id_attempts: usize,
  #[serde(default)]
  pub id_strategy: IdStrategy,
}

fn default_temp_namespace() -> String {
  "http://localhost/resources/temp/".into()
}
fn default_blank_namespace() -> String {
  "http://localhost/resources/temp/blank/".into()
}
fn default_id_length() -> usize {
  7
}
fn default_max_id_attempts() -> usize {
  64
}

impl Default for ServiceConfig {
  fn default() -> Self {
    ServiceConfig {
      temp_namespace: default_temp_namespace(),
      blank_namespace: default_blank_namespace(),
      id_length: default_id_length(),
      max_id_attempts: default_max_id_attempts(),
      id_strategy: IdStrategy::default(),
    }
  }
}

impl ServiceConfig {
  pub fn from_toml_str(content: &str) -> Result<Self> {
    Ok(toml::from_str(content)?)
  }
  pub fn load(path: &std::path::Path) -> Result<Self> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Read {
      path: path.to_path_buf(),
      source: e,
    })?;
    Self::from_toml_str(&content)
  }
}
