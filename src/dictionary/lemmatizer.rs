//! Inverse-conjugation lemmatization: recovering `(stem, ending)` candidates
//! for a conjugated surface form. Ported from
//! `lattice_tagger/dictionary/lemmatizer.py::analyze_morphology` /
//! `get_lemma_candidates`.

use std::collections::{HashMap, HashSet};

use crate::tagset::Tag;

/// `trigger syllable(s) -> set of (stem-suffix, ending-prefix)` rewrite
/// pairs, loaded from the rule-table resource described in spec.md §6.
pub type RuleTable = HashMap<String, HashSet<(String, String)>>;

/// Every `(stem, stem_tag, ending, Eomi)` candidate for `word`, such that
/// `ending` is a known eomi and `stem` is a known verb or adjective (both may
/// apply, yielding two candidates for the same split).
///
/// Two kinds of split are tried at every position: the identity split (no
/// rewrite, both halves looked up as-is) and every rule whose trigger
/// (length 1-3) starts at that position, where the rewrite consumes the
/// entire matched trigger window from the surface.
pub fn lemmatize(
  word: &str,
  verbs: &HashSet<String>,
  adjectives: &HashSet<String>,
  eomis: &HashSet<String>,
  rules: &RuleTable,
) -> Vec<(String, Tag, String, Tag)> {
  let chars: Vec<char> = word.chars().collect();
  let n = chars.len();
  let mut candidates = Vec::new();

  let mut push_if_valid = |stem: String, ending: String, candidates: &mut Vec<_>| {
    if !eomis.contains(&ending) {
      return;
    }
    if adjectives.contains(&stem) {
      candidates.push((stem.clone(), Tag::Adjective, ending.clone(), Tag::Eomi));
    }
    if verbs.contains(&stem) {
      candidates.push((stem, Tag::Verb, ending, Tag::Eomi));
    }
  };

  // Identity split: both halves as-is, for every internal split point.
  for i in 1..n {
    let stem: String = chars[..i].iter().collect();
    let ending: String = chars[i..].iter().collect();
    push_if_valid(stem, ending, &mut candidates);
  }

  // Rule-based splits: every trigger of length 1-3 starting at every position.
  for i in 0..n {
    for trigger_len in 1..=3usize {
      if i + trigger_len > n {
        break;
      }
      let trigger: String = chars[i..i + trigger_len].iter().collect();
      let rewrites = match rules.get(&trigger) {
        Some(r) => r,
        None => continue,
      };
      let prefix: String = chars[..i].iter().collect();
      let suffix: String = chars[i + trigger_len..].iter().collect();
      for (stem_suffix, ending_prefix) in rewrites {
        let stem = format!("{}{}", prefix, stem_suffix);
        let ending = format!("{}{}", ending_prefix, suffix);
        push_if_valid(stem, ending, &mut candidates);
      }
    }
  }

  candidates
}

#[cfg(test)]
mod tests {
  use super::*;

  fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
  }

  fn rules(entries: &[(&str, &str, &str)]) -> RuleTable {
    let mut table: RuleTable = HashMap::new();
    for (trigger, stem_suffix, ending_prefix) in entries {
      table
        .entry(trigger.to_string())
        .or_insert_with(HashSet::new)
        .insert((stem_suffix.to_string(), ending_prefix.to_string()));
    }
    table
  }

  #[test]
  fn issda_yields_both_identity_and_rule_candidates() {
    let verbs = set(&[]);
    let adjectives = set(&["있", "이"]);
    let eomis = set(&["다", "ㅆ다"]);
    let rules = rules(&[("있", "이", "ㅆ")]);

    let mut found = lemmatize("있다", &verbs, &adjectives, &eomis, &rules);
    found.sort();
    let mut expected = vec![
      ("있".to_string(), Tag::Adjective, "다".to_string(), Tag::Eomi),
      ("이".to_string(), Tag::Adjective, "ㅆ다".to_string(), Tag::Eomi),
    ];
    expected.sort();
    assert_eq!(found, expected);
  }

  #[test]
  fn gongyeoneul_haessda_uses_one_syllable_rule() {
    let verbs = set(&["하"]);
    let adjectives = set(&[]);
    let eomis = set(&["았다"]);
    let rules = rules(&[("했", "하", "았")]);

    let found = lemmatize("했다", &verbs, &adjectives, &eomis, &rules);
    assert_eq!(
      found,
      vec![("하".to_string(), Tag::Verb, "았다".to_string(), Tag::Eomi)]
    );
  }

  #[test]
  fn parassda_uses_rule_on_non_initial_trigger() {
    let verbs = set(&[]);
    let adjectives = set(&["파랗"]);
    let eomis = set(&["았다"]);
    let rules = rules(&[("랬", "랗", "았")]);

    let found = lemmatize("파랬다", &verbs, &adjectives, &eomis, &rules);
    assert_eq!(
      found,
      vec![("파랗".to_string(), Tag::Adjective, "았다".to_string(), Tag::Eomi)]
    );
  }

  #[test]
  fn every_candidate_is_sound() {
    let verbs = set(&["하", "추"]);
    let adjectives = set(&["있", "이", "춥"]);
    let eomis = set(&["다", "ㅆ다", "았다", "은"]);
    let rules = rules(&[("있", "이", "ㅆ"), ("했", "하", "았"), ("추운", "춥", "은")]);

    for (stem, tag, ending, _) in lemmatize("있다", &verbs, &adjectives, &eomis, &rules) {
      assert!(eomis.contains(&ending));
      match tag {
        Tag::Verb => assert!(verbs.contains(&stem)),
        Tag::Adjective => assert!(adjectives.contains(&stem)),
        _ => panic!("lemmatize only produces Verb/Adjective stems"),
      }
    }
  }
}
