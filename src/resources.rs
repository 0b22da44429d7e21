//! Reads dictionary resource files from disk: one `<tag>.txt` per
//! dictionary tag, plus a rule table in either whitespace-delimited text or
//! JSON. Grounded in `lattice_tagger/dictionary/dictionary.py`'s
//! directory-scanning constructor and the text/JSON rule-table loaders it
//! composes.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use log::warn;
use serde_json::Value;

use crate::config::DictionaryConfig;
use crate::dictionary::{DictionaryBuilder, RuleTable};
use crate::error::Result;
use crate::tagset::Tag;

/// Reads a [`DictionaryConfig`]'s resource directory into the shape
/// [`crate::dictionary::MorphemeDictionary::from_builder`] expects.
pub struct FileDictionaryBuilder {
  config: DictionaryConfig,
}

impl FileDictionaryBuilder {
  pub fn new(config: DictionaryConfig) -> FileDictionaryBuilder {
    FileDictionaryBuilder { config }
  }
}

impl DictionaryBuilder for FileDictionaryBuilder {
  fn tag_to_morphs(&self) -> Result<HashMap<Tag, HashSet<String>>> {
    load_tag_files(&self.config.resource_dir)
  }

  fn rule_table(&self) -> Result<RuleTable> {
    load_rule_table(&self.config.rule_file_path())
  }
}

/// One `HashSet<String>` per `<tag>.txt` file found directly under `dir`,
/// keyed by the tag named in its basename. Files whose basename is not a
/// recognized [`Tag`] are skipped with a warning, since a resource
/// directory may carry other files.
pub fn load_tag_files(dir: &Path) -> Result<HashMap<Tag, HashSet<String>>> {
  let mut tag_to_morphs = HashMap::new();
  if !dir.is_dir() {
    return Ok(tag_to_morphs);
  }

  for entry in fs::read_dir(dir)? {
    let entry = entry?;
    let path = entry.path();
    if path.extension().and_then(|e| e.to_str()) != Some("txt") {
      continue;
    }
    let stem = match path.file_stem().and_then(|s| s.to_str()) {
      Some(s) => s,
      None => continue,
    };
    let tag = match Tag::from_str(stem) {
      Some(tag) => tag,
      None => {
        warn!("skipping resource file with unrecognized tag name: {}", path.display());
        continue;
      }
    };

    let contents = fs::read_to_string(&path)?;
    let morphs: HashSet<String> = contents
      .lines()
      .filter_map(|line| line.split_whitespace().next())
      .map(|morph| morph.to_string())
      .collect();
    tag_to_morphs.insert(tag, morphs);
  }

  Ok(tag_to_morphs)
}

/// Loads a rule table from either a whitespace-delimited text file
/// (`<trigger> <stem-suffix> <ending-prefix>` per line) or a JSON object
/// (`{"<trigger>": ["<stem-suffix>+<ending-prefix>", ...]}`), detected by
/// extension. Malformed lines/entries are logged and skipped rather than
/// treated as a hard error.
pub fn load_rule_table(path: &Path) -> Result<RuleTable> {
  if !path.exists() {
    return Ok(RuleTable::new());
  }
  match path.extension().and_then(|e| e.to_str()) {
    Some("json") => load_rule_table_json(path),
    _ => load_rule_table_text(path),
  }
}

fn load_rule_table_text(path: &Path) -> Result<RuleTable> {
  let contents = fs::read_to_string(path)?;
  let mut table = RuleTable::new();
  for (lineno, line) in contents.lines().enumerate() {
    let line = line.trim();
    if line.is_empty() {
      continue;
    }
    let columns: Vec<&str> = line.split_whitespace().collect();
    if columns.len() != 3 {
      warn!(
        "{}:{}: expected 3 whitespace-delimited columns, found {}; skipping",
        path.display(),
        lineno + 1,
        columns.len()
      );
      continue;
    }
    let (trigger, stem_suffix, ending_prefix) = (columns[0], columns[1], columns[2]);
    table
      .entry(trigger.to_string())
      .or_insert_with(HashSet::new)
      .insert((stem_suffix.to_string(), ending_prefix.to_string()));
  }
  Ok(table)
}

fn load_rule_table_json(path: &Path) -> Result<RuleTable> {
  let contents = fs::read_to_string(path)?;
  let value: Value = serde_json::from_str(&contents)?;
  let object = match value.as_object() {
    Some(object) => object,
    None => {
      warn!("{}: rule table JSON root is not an object; ignoring", path.display());
      return Ok(RuleTable::new());
    }
  };

  let mut table = RuleTable::new();
  for (trigger, rewrites) in object {
    let entries = match rewrites.as_array() {
      Some(entries) => entries,
      None => {
        warn!("{}: rule entry for `{}` is not an array; skipping", path.display(), trigger);
        continue;
      }
    };
    for entry in entries {
      let entry_str = match entry.as_str() {
        Some(s) => s,
        None => {
          warn!("{}: non-string rewrite for trigger `{}`; skipping", path.display(), trigger);
          continue;
        }
      };
      match entry_str.split_once('+') {
        Some((stem_suffix, ending_prefix)) => {
          table
            .entry(trigger.clone())
            .or_insert_with(HashSet::new)
            .insert((stem_suffix.to_string(), ending_prefix.to_string()));
        }
        None => {
          warn!(
            "{}: rewrite `{}` for trigger `{}` is missing a `+` separator; skipping",
            path.display(),
            entry_str,
            trigger
          );
        }
      }
    }
  }
  Ok(table)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;
  use tempfile::tempdir;

  #[test]
  fn load_tag_files_reads_leading_token_per_line() {
    let dir = tempdir().unwrap();
    let mut file = fs::File::create(dir.path().join("Noun.txt")).unwrap();
    writeln!(file, "공연\t# a performance").unwrap();
    writeln!(file, "노래").unwrap();

    let loaded = load_tag_files(dir.path()).unwrap();
    let nouns = loaded.get(&Tag::Noun).unwrap();
    assert!(nouns.contains("공연"));
    assert!(nouns.contains("노래"));
  }

  #[test]
  fn load_tag_files_skips_unrecognized_tag_names() {
    let dir = tempdir().unwrap();
    fs::File::create(dir.path().join("NotATag.txt")).unwrap();
    let loaded = load_tag_files(dir.path()).unwrap();
    assert!(loaded.is_empty());
  }

  #[test]
  fn load_rule_table_text_skips_wrong_column_count() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rules.txt");
    let mut file = fs::File::create(&path).unwrap();
    writeln!(file, "했 하 았").unwrap();
    writeln!(file, "broken line with too many columns here").unwrap();

    let table = load_rule_table(&path).unwrap();
    assert_eq!(table.len(), 1);
    assert!(table["했"].contains(&("하".to_string(), "았".to_string())));
  }

  #[test]
  fn load_rule_table_json_parses_plus_separator() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rules.json");
    let mut file = fs::File::create(&path).unwrap();
    writeln!(file, r#"{{"했": ["하+았"], "입": ["이+ㅂ"]}}"#).unwrap();

    let table = load_rule_table(&path).unwrap();
    assert!(table["했"].contains(&("하".to_string(), "았".to_string())));
    assert!(table["입"].contains(&("이".to_string(), "ㅂ".to_string())));
  }

  #[test]
  fn load_rule_table_missing_file_is_empty_not_error() {
    let table = load_rule_table(Path::new("/nonexistent/rules.txt")).unwrap();
    assert!(table.is_empty());
  }
}
