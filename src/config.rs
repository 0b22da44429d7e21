//! Explicit configuration, replacing the module-level `installpath` constant
//! the original source used to locate its resource files.

use std::path::{Path, PathBuf};

/// Where a dictionary's resource files live on disk: one `<tag>.txt` per
/// dictionary tag, plus an optional rule table for lemmatization.
#[derive(Debug, Clone)]
pub struct DictionaryConfig {
  pub resource_dir: PathBuf,
  pub rule_file: Option<PathBuf>,
}

impl DictionaryConfig {
  pub fn new<P: AsRef<Path>>(resource_dir: P) -> DictionaryConfig {
    DictionaryConfig {
      resource_dir: resource_dir.as_ref().to_path_buf(),
      rule_file: None,
    }
  }

  pub fn with_rule_file<P: AsRef<Path>>(mut self, rule_file: P) -> DictionaryConfig {
    self.rule_file = Some(rule_file.as_ref().to_path_buf());
    self
  }

  pub fn rule_file_path(&self) -> PathBuf {
    self
      .rule_file
      .clone()
      .unwrap_or_else(|| self.resource_dir.join("rules.txt"))
  }
}

/// Decode-time parameters for the beam decoder (spec.md §4.7 defaults).
#[derive(Debug, Clone, Copy)]
pub struct BeamConfig {
  pub beam_size: usize,
  pub max_token_len: usize,
}

impl Default for BeamConfig {
  fn default() -> BeamConfig {
    BeamConfig {
      beam_size: 5,
      max_token_len: 8,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rule_file_defaults_under_resource_dir() {
    let config = DictionaryConfig::new("/tmp/dict");
    assert_eq!(config.rule_file_path(), PathBuf::from("/tmp/dict/rules.txt"));
  }

  #[test]
  fn rule_file_can_be_overridden() {
    let config = DictionaryConfig::new("/tmp/dict").with_rule_file("/tmp/other/rules.json");
    assert_eq!(
      config.rule_file_path(),
      PathBuf::from("/tmp/other/rules.json")
    );
  }

  #[test]
  fn default_beam_config_matches_spec_defaults() {
    let config = BeamConfig::default();
    assert_eq!(config.beam_size, 5);
    assert_eq!(config.max_token_len, 8);
  }
}
