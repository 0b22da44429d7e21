//! Tag→morpheme-set dictionaries: the base word dictionary and the richer
//! morpheme dictionary that layers lemmatization rules on top.

pub mod lemmatizer;

use std::collections::{HashMap, HashSet};

use crate::error::{ConfigurationError, Result};
use crate::tagset::Tag;
use crate::token::Token;

pub use lemmatizer::RuleTable;

/// Anything that can hand the core a tag→morpheme-set map and a rule table,
/// the seam spec.md §1 describes between the core and external resource
/// loading. `crate::resources` provides the concrete text/JSON file reader.
pub trait DictionaryBuilder {
  fn tag_to_morphs(&self) -> Result<HashMap<Tag, HashSet<String>>>;
  fn rule_table(&self) -> Result<RuleTable>;
}

/// The membership/lookup surface both dictionary flavors share, so the
/// lookup strategies in [`crate::lookup`] can be written once against
/// either one.
pub trait Dictionary {
  fn contains(&self, morph: &str, tag: Tag) -> bool;
  fn lookup(&self, morph: &str, begin: usize, is_l_start: bool) -> Vec<Token>;
}

/// `tag -> set of morphemes`, with membership lookup and mutation.
#[derive(Debug, Clone, Default)]
pub struct WordDictionary {
  tag_to_morphs: HashMap<Tag, HashSet<String>>,
}

impl WordDictionary {
  pub fn new(tag_to_morphs: HashMap<Tag, HashSet<String>>) -> WordDictionary {
    WordDictionary { tag_to_morphs }
  }

  /// Every tag whose set contains `morph`. Order is insertion order of the
  /// underlying map's iteration, stable for a given instance.
  pub fn tags_of(&self, morph: &str) -> Vec<Tag> {
    self
      .tag_to_morphs
      .iter()
      .filter(|(_, morphs)| morphs.contains(morph))
      .map(|(tag, _)| *tag)
      .collect()
  }

  pub fn contains(&self, morph: &str, tag: Tag) -> bool {
    self
      .tag_to_morphs
      .get(&tag)
      .map_or(false, |morphs| morphs.contains(morph))
  }

  pub fn morphs_of(&self, tag: Tag) -> Option<&HashSet<String>> {
    self.tag_to_morphs.get(&tag)
  }

  /// One [`Token`] per tag `morph` is registered under.
  pub fn lookup(&self, morph: &str, begin: usize, is_l_start: bool) -> Vec<Token> {
    self
      .tags_of(morph)
      .into_iter()
      .map(|tag| Token::single(morph, tag, begin, is_l_start))
      .collect()
  }

  pub fn add(
    &mut self,
    morphs: impl IntoIterator<Item = String>,
    tag: Tag,
    force: bool,
  ) -> Result<()> {
    if !force && !self.tag_to_morphs.contains_key(&tag) {
      return Err(ConfigurationError::UnknownTag(tag.as_str().to_string()).into());
    }
    self
      .tag_to_morphs
      .entry(tag)
      .or_insert_with(HashSet::new)
      .extend(morphs);
    Ok(())
  }

  pub fn remove(&mut self, morphs: &[String], tag: Tag) -> Result<()> {
    let set = self
      .tag_to_morphs
      .get_mut(&tag)
      .ok_or(ConfigurationError::EmptyTag(tag))?;
    for morph in morphs {
      set.remove(morph);
    }
    Ok(())
  }
}

impl Dictionary for WordDictionary {
  fn contains(&self, morph: &str, tag: Tag) -> bool {
    WordDictionary::contains(self, morph, tag)
  }

  fn lookup(&self, morph: &str, begin: usize, is_l_start: bool) -> Vec<Token> {
    WordDictionary::lookup(self, morph, begin, is_l_start)
  }
}

/// Layers a lemmatization rule table on top of [`WordDictionary`]. `lookup`
/// additionally emits one [`Token`] per `(stem, ending)` lemmatizer
/// candidate, carrying both morphemes.
#[derive(Debug, Clone)]
pub struct MorphemeDictionary {
  words: WordDictionary,
  rules: RuleTable,
}

impl MorphemeDictionary {
  pub fn new(tag_to_morphs: HashMap<Tag, HashSet<String>>, rules: RuleTable) -> MorphemeDictionary {
    MorphemeDictionary {
      words: WordDictionary::new(tag_to_morphs),
      rules,
    }
  }

  pub fn from_builder(builder: &dyn DictionaryBuilder) -> Result<MorphemeDictionary> {
    Ok(MorphemeDictionary::new(
      builder.tag_to_morphs()?,
      builder.rule_table()?,
    ))
  }

  pub fn tags_of(&self, morph: &str) -> Vec<Tag> {
    self.words.tags_of(morph)
  }

  pub fn contains(&self, morph: &str, tag: Tag) -> bool {
    self.words.contains(morph, tag)
  }

  pub fn add(
    &mut self,
    morphs: impl IntoIterator<Item = String>,
    tag: Tag,
    force: bool,
  ) -> Result<()> {
    self.words.add(morphs, tag, force)
  }

  pub fn remove(&mut self, morphs: &[String], tag: Tag) -> Result<()> {
    self.words.remove(morphs, tag)
  }

  fn empty_set() -> &'static HashSet<String> {
    static EMPTY: std::sync::OnceLock<HashSet<String>> = std::sync::OnceLock::new();
    EMPTY.get_or_init(HashSet::new)
  }

  pub fn verbs(&self) -> &HashSet<String> {
    self.words.morphs_of(Tag::Verb).unwrap_or_else(Self::empty_set)
  }

  pub fn adjectives(&self) -> &HashSet<String> {
    self
      .words
      .morphs_of(Tag::Adjective)
      .unwrap_or_else(Self::empty_set)
  }

  pub fn eomis(&self) -> &HashSet<String> {
    self.words.morphs_of(Tag::Eomi).unwrap_or_else(Self::empty_set)
  }

  pub fn lemmatize(&self, word: &str) -> Vec<(String, Tag, String, Tag)> {
    lemmatizer::lemmatize(word, self.verbs(), self.adjectives(), self.eomis(), &self.rules)
  }

  /// One [`Token`] per tag `morph` is registered under directly, plus one
  /// two-morpheme [`Token`] per lemmatizer candidate.
  pub fn lookup(&self, morph: &str, begin: usize, is_l_start: bool) -> Vec<Token> {
    let mut tokens = self.words.lookup(morph, begin, is_l_start);
    let end = begin + morph.chars().count();
    for (stem, tag0, ending, tag1) in self.lemmatize(morph) {
      tokens.push(Token::split(
        morph, &stem, tag0, &ending, tag1, begin, end, is_l_start,
      ));
    }
    tokens
  }
}

impl Dictionary for MorphemeDictionary {
  fn contains(&self, morph: &str, tag: Tag) -> bool {
    MorphemeDictionary::contains(self, morph, tag)
  }

  fn lookup(&self, morph: &str, begin: usize, is_l_start: bool) -> Vec<Token> {
    MorphemeDictionary::lookup(self, morph, begin, is_l_start)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn demo_dictionary() -> MorphemeDictionary {
    let mut tag_to_morphs: HashMap<Tag, HashSet<String>> = HashMap::new();
    tag_to_morphs.insert(
      Tag::Noun,
      ["아이", "이", "노래", "너무너무너무", "아이오아이", "공연"]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    );
    tag_to_morphs.insert(
      Tag::Josa,
      ["는", "의", "을"].iter().map(|s| s.to_string()).collect(),
    );
    tag_to_morphs.insert(Tag::Verb, ["하"].iter().map(|s| s.to_string()).collect());
    tag_to_morphs.insert(
      Tag::Adjective,
      ["있", "이"].iter().map(|s| s.to_string()).collect(),
    );
    tag_to_morphs.insert(
      Tag::Eomi,
      ["ㅂ니다", "다", "ㅆ다", "았다"]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    );

    let mut rules: RuleTable = HashMap::new();
    rules.insert(
      "했".to_string(),
      [("하".to_string(), "았".to_string())].into_iter().collect(),
    );
    rules.insert(
      "입".to_string(),
      [("이".to_string(), "ㅂ".to_string())].into_iter().collect(),
    );

    MorphemeDictionary::new(tag_to_morphs, rules)
  }

  #[test]
  fn closure_after_add_then_remove() {
    let mut dict = demo_dictionary();
    dict.add(vec!["춤".to_string()], Tag::Noun, false).unwrap();
    assert!(dict.contains("춤", Tag::Noun));
    dict.remove(&["춤".to_string()], Tag::Noun).unwrap();
    assert!(!dict.contains("춤", Tag::Noun));
  }

  #[test]
  fn add_with_unknown_tag_requires_force() {
    let mut dict = demo_dictionary();
    let err = dict.add(vec!["하나".to_string()], Tag::Number, false);
    assert!(err.is_err());
    dict.add(vec!["하나".to_string()], Tag::Number, true).unwrap();
    assert!(dict.contains("하나", Tag::Number));
  }

  #[test]
  fn remove_from_tag_with_no_entries_is_an_error() {
    let mut dict = demo_dictionary();
    assert!(dict.remove(&["하나".to_string()], Tag::Number).is_err());
  }

  #[test]
  fn lookup_emits_lemmatized_split_tokens() {
    let dict = demo_dictionary();
    let tokens = dict.lookup("했다", 3, false);
    assert!(tokens
      .iter()
      .any(|t| t.morph0 == "하" && t.tag0 == Tag::Verb && t.morph1.as_deref() == Some("았다")));
  }

  #[test]
  fn lookup_exact_word_returns_single_morpheme_token() {
    let dict = demo_dictionary();
    let tokens = dict.lookup("아이오아이", 5, true);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].begin, 5);
    assert_eq!(tokens[0].end, 10);
    assert!(tokens[0].is_l_start);
  }
}
