//! Sentence-level lookup: splitting on whitespace, running the eojeol
//! lookup at each running offset, and bucketing the resulting tokens by
//! begin-position for the decoder. Ported from
//! `lattice_tagger/dictionary/lookup.py::sentence_lookup` and
//! `sentence_lookup_as_begin_index`.

use crate::lookup::EojeolLookup;
use crate::token::Token;

/// All tokens the dictionary produces for `sentence`, plus `bindex`: tokens
/// bucketed by begin-offset over `[0, sentence_len)`, where `sentence_len`
/// counts characters with whitespace removed (the sentence offsets are over
/// the concatenated eojeols, not the raw string).
pub struct SentenceLookup {
  pub tokens: Vec<Token>,
  pub bindex: Vec<Vec<Token>>,
  pub len: usize,
}

/// Runs `lookup` over every whitespace-separated eojeol in `sentence`,
/// advancing the offset by each eojeol's character count (not its byte
/// count, and not including the space).
pub fn sentence_lookup(sentence: &str, lookup: &dyn EojeolLookup) -> Vec<Token> {
  let mut offset = 0;
  let mut tokens = Vec::new();
  for eojeol in sentence.split_whitespace() {
    tokens.extend(lookup.lookup(eojeol, offset));
    offset += eojeol.chars().count();
  }
  tokens
}

/// [`sentence_lookup`], additionally bucketed by begin-offset. `bindex[b]`
/// holds every token whose `begin == b`; sentinels (BOS/EOS) are excluded
/// from the index, since the decoder treats them specially.
pub fn sentence_lookup_as_begin_index(sentence: &str, lookup: &dyn EojeolLookup) -> SentenceLookup {
  let len = sentence.chars().filter(|c| !c.is_whitespace()).count();
  let tokens = sentence_lookup(sentence, lookup);

  let mut bindex: Vec<Vec<Token>> = (0..len).map(|_| Vec::new()).collect();
  for token in &tokens {
    if token.is_sentinel() {
      continue;
    }
    if token.begin < len {
      bindex[token.begin].push(token.clone());
    }
  }

  SentenceLookup { tokens, bindex, len }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::dictionary::MorphemeDictionary;
  use crate::lookup::MorphemeLookup;
  use crate::tagset::Tag;
  use std::collections::HashMap;
  use std::collections::HashSet;

  fn demo_dictionary() -> MorphemeDictionary {
    let mut tag_to_morphs: HashMap<Tag, HashSet<String>> = HashMap::new();
    tag_to_morphs.insert(Tag::Noun, ["공연"].iter().map(|s| s.to_string()).collect());
    tag_to_morphs.insert(Tag::Josa, ["을"].iter().map(|s| s.to_string()).collect());
    tag_to_morphs.insert(Tag::Verb, ["하"].iter().map(|s| s.to_string()).collect());
    tag_to_morphs.insert(Tag::Eomi, ["았다"].iter().map(|s| s.to_string()).collect());

    let mut rules = crate::dictionary::RuleTable::new();
    rules.insert(
      "했".to_string(),
      [("하".to_string(), "았".to_string())].into_iter().collect(),
    );

    MorphemeDictionary::new(tag_to_morphs, rules)
  }

  #[test]
  fn bindex_buckets_by_begin_offset_across_eojeols() {
    let dict = demo_dictionary();
    let lookup = MorphemeLookup::new(&dict);
    let result = sentence_lookup_as_begin_index("공연을 했다", &lookup);

    assert_eq!(result.len, 5);
    assert!(!result.bindex[0].is_empty());
    assert!(result.bindex[0].iter().any(|t| t.morph0 == "공연"));
    assert!(result.bindex[3]
      .iter()
      .any(|t| t.morph0 == "하" && t.morph1.as_deref() == Some("았다")));
  }

  #[test]
  fn empty_sentence_yields_empty_bindex() {
    let dict = demo_dictionary();
    let lookup = MorphemeLookup::new(&dict);
    let result = sentence_lookup_as_begin_index("", &lookup);
    assert_eq!(result.len, 0);
    assert!(result.bindex.is_empty());
  }
}
