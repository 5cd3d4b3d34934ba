use {
  rand::{Rng, SeedableRng, distributions::Alphanumeric, rngs::StdRng},
  crate::config::{ServiceConfig, IdStrategy},
};

/* Source of identifier suffixes. Uniqueness against a graph is
  checked by the caller, a generator only has to vary its output. */
pub trait IdGenerator: std::fmt::Debug {
  fn next_suffix(&mut self) -> String;
}

/* Characters drawn uniformly, with replacement, from [A-Za-z0-9] */
#[derive(Debug)]
pub struct RandomIds {
  rng: StdRng,
  length: usize,
}
impl RandomIds {
  pub fn new(length: usize) -> Self {
    RandomIds { rng: StdRng::from_entropy(), length }
  }
  pub fn seeded(length: usize, seed: u64) -> Self {
    RandomIds { rng: StdRng::seed_from_u64(seed), length }
  }
}
impl IdGenerator for RandomIds {
  fn next_suffix(&mut self) -> String {
    (&mut self.rng)
      .sample_iter(&Alphanumeric)
      .take(self.length)
      .map(char::from)
      .collect()
  }
}

/* Zero-padded counter: 0000000, 0000001, .. */
#[derive(Debug, Default)]
pub struct SequentialIds {
  next: u64,
  width: usize,
}
impl SequentialIds {
  pub fn new(width: usize) -> Self {
    SequentialIds { next: 0, width }
  }
}
impl IdGenerator for SequentialIds {
  fn next_suffix(&mut self) -> String {
    let suffix = format!("{:0width$}", self.next, width = self.width);
    self.next += 1;
    suffix
  }
}

pub fn from_config(config: &ServiceConfig) -> Box<dyn IdGenerator> {
  match config.id_strategy {
    IdStrategy::Random => Box::new(RandomIds::new(config.id_length)),
    IdStrategy::Sequential => Box::new(SequentialIds::new(config.id_length)),
  }
}

#[cfg(test)]
mod unit_tests {
  use super::*;
  #[test]
  fn random_suffix_shape() {
    let mut ids = RandomIds::new(7);
    for _ in 0..100 {
      let suffix = ids.next_suffix();
      assert_eq!(suffix.len(), 7);
      assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }
  }
  #[test]
  fn seeded_is_reproducible() {
    let mut a = RandomIds::seeded(7, 42);
    let mut b = RandomIds::seeded(7, 42);
    assert_eq!(a.next_suffix(), b.next_suffix());
  }
  #[test]
  fn sequential_counts_up() {
    let mut ids = SequentialIds::new(7);
    assert_eq!(ids.next_suffix(), "0000000");
    assert_eq!(ids.next_suffix(), "0000001");
  }
  #[test]
  fn strategy_from_config() {
    let config = ServiceConfig { id_strategy: IdStrategy::Sequential, ..Default::default() };
    assert_eq!(from_config(&config).next_suffix(), "0000000");
    assert_eq!(from_config(&ServiceConfig::default()).next_suffix().len(), 7);
  }
}
