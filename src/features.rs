//! Trigram feature extraction over a decoded sequence: turning the window
//! `(word_i, word_j, word_k)` around the token currently being scored into a
//! small set of categorical feature tuples. Ported from
//! `lattice_tagger/features/feature.py::trigram_encoder` and
//! `SimpleTrigramEncoder`.

use std::collections::HashMap;

use crate::error::{Result, StateError};
use crate::tagset::Tag;
use crate::token::Token;

/// One categorical feature tuple. The leading number in each variant's doc
/// comment matches the feature class number in the original encoder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Feature {
  /// 0: disambiguates `word_k`'s surface by its own tag, conditioned on the
  /// previous token's surface (e.g. 이/Josa vs 이/Adjective).
  PrevSurfaceCurrSurfaceTag(String, String, Tag),
  /// 1: previous surface, current tag.
  PrevSurfaceCurrTag(String, Tag),
  /// 2: previous tag, current surface, current tag.
  PrevTagCurrSurfaceTag(Tag, String, Tag),
  /// 3: previous tag, current tag (the plain bigram tag feature).
  PrevTagCurrTag(Tag, Tag),
  /// 4: current token's surface length.
  CurrLen(usize),
  /// 5: current token's morph0, tag0, and whether it starts the eojeol.
  CurrMorphTagIsL(String, Tag, bool),
  /// 6: when the previous token is Unknown, its clamped length.
  PrevUnknownLen(usize),
  /// 7: the full trigram of surfaces, when a token two back exists.
  Trigram(String, String, String),
  /// 8: when i/j/k are all in `{Noun, Adverb, Adjective, Verb}`, the nearer
  /// preceding morph0 paired with the current one.
  Contextual(String, String),
}

impl Feature {
  /// The feature-class number (0-8) this tuple belongs to, used to group
  /// and order a trained feature index.
  pub fn class(&self) -> u8 {
    match self {
      Feature::PrevSurfaceCurrSurfaceTag(..) => 0,
      Feature::PrevSurfaceCurrTag(..) => 1,
      Feature::PrevTagCurrSurfaceTag(..) => 2,
      Feature::PrevTagCurrTag(..) => 3,
      Feature::CurrLen(..) => 4,
      Feature::CurrMorphTagIsL(..) => 5,
      Feature::PrevUnknownLen(..) => 6,
      Feature::Trigram(..) => 7,
      Feature::Contextual(..) => 8,
    }
  }
}

const CONTEXTUAL_TAGS: [Tag; 4] = [Tag::Noun, Tag::Adverb, Tag::Adjective, Tag::Verb];

fn is_contextual(tag: Tag) -> bool {
  CONTEXTUAL_TAGS.contains(&tag)
}

/// Every feature for token `k`, given its two predecessors in the decoded
/// sequence (`word_i` may be absent when `word_j` is the sequence's first
/// element, i.e. BOS).
pub fn transform_word(word_i: Option<&Token>, word_j: &Token, word_k: &Token) -> Vec<Feature> {
  let mut features = vec![
    Feature::PrevSurfaceCurrSurfaceTag(word_j.surface.clone(), word_k.surface.clone(), word_k.tag0),
    Feature::PrevSurfaceCurrTag(word_j.surface.clone(), word_k.tag0),
    Feature::PrevTagCurrSurfaceTag(word_j.tag0, word_k.surface.clone(), word_k.tag0),
    Feature::PrevTagCurrTag(word_j.tag0, word_k.tag0),
    Feature::CurrLen(word_k.length),
    Feature::CurrMorphTagIsL(word_k.morph0.clone(), word_k.tag0, word_k.is_l_start),
  ];

  if word_j.tag0 == Tag::Unknown {
    features.push(Feature::PrevUnknownLen(word_j.length.min(8)));
  }

  if let Some(word_i) = word_i {
    features.push(Feature::Trigram(
      word_i.surface.clone(),
      word_j.surface.clone(),
      word_k.surface.clone(),
    ));
  }

  if is_contextual(word_k.tag0) {
    if is_contextual(word_j.tag0) {
      features.push(Feature::Contextual(word_j.morph0.clone(), word_k.morph0.clone()));
    } else if word_i.map_or(false, |w| is_contextual(w.tag0)) {
      features.push(Feature::Contextual(
        word_i.unwrap().morph0.clone(),
        word_k.morph0.clone(),
      ));
    }
  }

  features
}

/// One feature set per token in `sequence` excluding the trailing EOS:
/// `sequence` is expected to be `[BOS, tok_1, .., tok_n, EOS]`, and this
/// returns `n` feature sets, one per `tok_1..tok_n`.
pub fn transform_sequence(sequence: &[Token]) -> Vec<Vec<Feature>> {
  if sequence.len() < 2 {
    return Vec::new();
  }
  let count = sequence.len() - 2;
  let mut result = Vec::with_capacity(count);
  for k in 1..=count {
    let word_i = if k >= 2 { Some(&sequence[k - 2]) } else { None };
    let word_j = &sequence[k - 1];
    let word_k = &sequence[k];
    result.push(transform_word(word_i, word_j, word_k));
  }
  result
}

/// Maps [`Feature`] tuples to trained integer indices. Until
/// [`SimpleTrigramEncoder::with_feature_dic`] installs a map, `encode_*`
/// calls fail with [`StateError::EncoderNotTrained`] (the encoder can still
/// be used untrained via `transform_*`, e.g. during training-time feature
/// scanning).
#[derive(Debug, Clone, Default)]
pub struct SimpleTrigramEncoder {
  feature_dic: Option<HashMap<Feature, usize>>,
}

impl SimpleTrigramEncoder {
  pub fn new() -> SimpleTrigramEncoder {
    SimpleTrigramEncoder { feature_dic: None }
  }

  pub fn with_feature_dic(feature_dic: HashMap<Feature, usize>) -> SimpleTrigramEncoder {
    SimpleTrigramEncoder {
      feature_dic: Some(feature_dic),
    }
  }

  pub fn is_trained(&self) -> bool {
    self.feature_dic.is_some()
  }

  pub fn transform_word(&self, word_i: Option<&Token>, word_j: &Token, word_k: &Token) -> Vec<Feature> {
    let mut features = transform_word(word_i, word_j, word_k);
    if let Some(dic) = &self.feature_dic {
      features.retain(|f| dic.contains_key(f));
    }
    features
  }

  pub fn transform_sequence(&self, sequence: &[Token]) -> Vec<Vec<Feature>> {
    let mut feature_seq = transform_sequence(sequence);
    if let Some(dic) = &self.feature_dic {
      for features in &mut feature_seq {
        features.retain(|f| dic.contains_key(f));
      }
    }
    feature_seq
  }

  pub fn encode_word(&self, word_i: Option<&Token>, word_j: &Token, word_k: &Token) -> Result<Vec<usize>> {
    let dic = self.feature_dic.as_ref().ok_or(StateError::EncoderNotTrained)?;
    Ok(
      transform_word(word_i, word_j, word_k)
        .into_iter()
        .filter_map(|f| dic.get(&f).copied())
        .collect(),
    )
  }

  pub fn encode_sequence(&self, sequence: &[Token]) -> Result<Vec<Vec<usize>>> {
    let dic = self.feature_dic.as_ref().ok_or(StateError::EncoderNotTrained)?;
    Ok(
      transform_sequence(sequence)
        .into_iter()
        .map(|features| features.into_iter().filter_map(|f| dic.get(&f).copied()).collect())
        .collect(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn transform_word_without_predecessor_omits_trigram_feature() {
    let bos = Token::bos();
    let tok = Token::single("공연", Tag::Noun, 0, true);
    let features = transform_word(None, &bos, &tok);
    assert!(!features.iter().any(|f| matches!(f, Feature::Trigram(..))));
  }

  #[test]
  fn transform_word_with_predecessor_includes_trigram_feature() {
    let a = Token::single("너무", Tag::Adverb, 0, true);
    let b = Token::single("공연", Tag::Noun, 2, false);
    let c = Token::single("을", Tag::Josa, 4, false);
    let features = transform_word(Some(&a), &b, &c);
    assert!(features.contains(&Feature::Trigram(
      "너무".to_string(),
      "공연".to_string(),
      "을".to_string()
    )));
  }

  #[test]
  fn unknown_predecessor_adds_clamped_length_feature() {
    let unk = Token::unknown("xyz", 0);
    let tok = Token::single("공연", Tag::Noun, 3, false);
    let bos = Token::bos();
    let features = transform_word(Some(&bos), &unk, &tok);
    assert!(features.contains(&Feature::PrevUnknownLen(3)));
  }

  #[test]
  fn contextual_feature_needs_both_tags_in_contextual_set() {
    let noun = Token::single("공연", Tag::Noun, 0, true);
    let verb = Token::single("하", Tag::Verb, 2, false);
    let josa = Token::single("을", Tag::Josa, 2, false);

    let with_context = transform_word(None, &noun, &verb);
    assert!(with_context
      .iter()
      .any(|f| matches!(f, Feature::Contextual(a, b) if a == "공연" && b == "하")));

    let without_context = transform_word(None, &josa, &verb);
    assert!(!without_context.iter().any(|f| matches!(f, Feature::Contextual(..))));
  }

  #[test]
  fn encode_without_training_fails() {
    let encoder = SimpleTrigramEncoder::new();
    let bos = Token::bos();
    let tok = Token::single("공연", Tag::Noun, 0, true);
    assert!(encoder.encode_word(None, &bos, &tok).is_err());
  }

  #[test]
  fn encode_filters_to_known_features_after_training() {
    let bos = Token::bos();
    let tok = Token::single("공연", Tag::Noun, 0, true);
    let all_features = transform_word(None, &bos, &tok);

    let mut dic = HashMap::new();
    dic.insert(all_features[0].clone(), 0usize);
    let encoder = SimpleTrigramEncoder::with_feature_dic(dic);

    let encoded = encoder.encode_word(None, &bos, &tok).unwrap();
    assert_eq!(encoded, vec![0]);
  }

  #[test]
  fn transform_sequence_covers_one_feature_set_per_token_excluding_eos() {
    let bos = Token::bos();
    let a = Token::single("공연", Tag::Noun, 0, true);
    let b = Token::single("을", Tag::Josa, 2, false);
    let eos = Token::eos(3);
    let seq = vec![bos, a, b, eos];
    let feature_seq = transform_sequence(&seq);
    assert_eq!(feature_seq.len(), 2);
  }
}
