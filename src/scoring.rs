//! Composable score functions the beam decoder sums to rank partial
//! sequences. Ported from `lattice_tagger/beam/score_funcs.py`. A closed enum
//! stands in for the original's ad hoc `BeamScoreFunction` subclassing, so a
//! `CompositeScore` can sum a fixed `Vec<ScoreFunction>` without dynamic
//! dispatch.

use std::collections::HashMap;

use crate::features::SimpleTrigramEncoder;
use crate::tagset::Tag;
use crate::token::Token;

/// Per-token constant adjustments: a flat penalty for Unknown tokens, a
/// per-character reward for known tokens, and an extra penalty for
/// single-syllable Nouns (which are disproportionately likely to be
/// incidental substrings rather than real standalone words).
#[derive(Debug, Clone, Copy)]
pub struct RegularizationScore {
  pub unknown_penalty: f64,
  pub known_preference: f64,
  pub syllable_penalty: f64,
}

impl Default for RegularizationScore {
  fn default() -> RegularizationScore {
    RegularizationScore {
      unknown_penalty: -0.1,
      known_preference: 0.1,
      syllable_penalty: -0.2,
    }
  }
}

impl RegularizationScore {
  fn score(&self, word_k: &Token) -> f64 {
    let mut value = if word_k.tag0 == Tag::Unknown {
      self.unknown_penalty
    } else {
      self.known_preference * word_k.length as f64
    };
    if word_k.length == 1 && word_k.tag0 == Tag::Noun {
      value += self.syllable_penalty;
    }
    value
  }
}

/// Per-`(tag, morph0/morph1)` bonuses, looked up by primary and (if present)
/// secondary morpheme.
#[derive(Debug, Clone, Default)]
pub struct MorphemePreferenceScore {
  pub tag_to_morph: HashMap<Tag, HashMap<String, f64>>,
}

impl MorphemePreferenceScore {
  pub fn new(tag_to_morph: HashMap<Tag, HashMap<String, f64>>) -> MorphemePreferenceScore {
    MorphemePreferenceScore { tag_to_morph }
  }

  fn lookup(&self, tag: Tag, morph: &str) -> f64 {
    self
      .tag_to_morph
      .get(&tag)
      .and_then(|morphs| morphs.get(morph))
      .copied()
      .unwrap_or(0.0)
  }

  fn score(&self, word_k: &Token) -> f64 {
    let mut score = self.lookup(word_k.tag0, &word_k.morph0);
    if let (Some(tag1), Some(morph1)) = (word_k.tag1, &word_k.morph1) {
      score += self.lookup(tag1, morph1);
    }
    score
  }
}

/// Per-`(tag0, surface)` bonuses: unlike [`MorphemePreferenceScore`], this
/// keys on the token's full surface form rather than its morpheme(s).
#[derive(Debug, Clone, Default)]
pub struct WordPreferenceScore {
  pub tag_to_word: HashMap<Tag, HashMap<String, f64>>,
}

impl WordPreferenceScore {
  pub fn new(tag_to_word: HashMap<Tag, HashMap<String, f64>>) -> WordPreferenceScore {
    WordPreferenceScore { tag_to_word }
  }

  fn score(&self, word_k: &Token) -> f64 {
    self
      .tag_to_word
      .get(&word_k.tag0)
      .and_then(|words| words.get(&word_k.surface))
      .copied()
      .unwrap_or(0.0)
  }
}

/// A trained log-linear score over [`crate::features::Feature`] indices:
/// encodes the trigram `(word_i, word_j, word_k)` and sums the
/// corresponding coefficients.
#[derive(Debug, Clone)]
pub struct TrigramFeatureScore {
  pub encoder: SimpleTrigramEncoder,
  pub coefficients: Vec<f64>,
}

impl TrigramFeatureScore {
  pub fn new(encoder: SimpleTrigramEncoder, coefficients: Vec<f64>) -> TrigramFeatureScore {
    TrigramFeatureScore { encoder, coefficients }
  }

  fn score(&self, word_i: Option<&Token>, word_j: &Token, word_k: &Token) -> f64 {
    match self.encoder.encode_word(word_i, word_j, word_k) {
      Ok(idxs) => idxs
        .into_iter()
        .filter_map(|idx| self.coefficients.get(idx))
        .sum(),
      Err(_) => 0.0,
    }
  }
}

/// One scoring component. A closed sum type rather than a trait object,
/// since the set of score functions is fixed and known at compile time.
#[derive(Debug, Clone)]
pub enum ScoreFunction {
  Regularization(RegularizationScore),
  MorphemePreference(MorphemePreferenceScore),
  WordPreference(WordPreferenceScore),
  TrigramFeature(TrigramFeatureScore),
}

impl ScoreFunction {
  /// The score increment for appending `word_k` after `word_i, word_j`
  /// (`word_i` is `None` when `word_j` is the sequence's first token, BOS).
  pub fn score(&self, word_i: Option<&Token>, word_j: &Token, word_k: &Token) -> f64 {
    match self {
      ScoreFunction::Regularization(f) => f.score(word_k),
      ScoreFunction::MorphemePreference(f) => f.score(word_k),
      ScoreFunction::WordPreference(f) => f.score(word_k),
      ScoreFunction::TrigramFeature(f) => f.score(word_i, word_j, word_k),
    }
  }
}

/// Sums every component's score increment for one candidate append.
#[derive(Debug, Clone, Default)]
pub struct CompositeScore {
  pub functions: Vec<ScoreFunction>,
}

impl CompositeScore {
  pub fn new(functions: Vec<ScoreFunction>) -> CompositeScore {
    CompositeScore { functions }
  }

  pub fn score(&self, word_i: Option<&Token>, word_j: &Token, word_k: &Token) -> f64 {
    self.functions.iter().map(|f| f.score(word_i, word_j, word_k)).sum()
  }

  /// The total score of a complete token sequence, recomputed increment by
  /// increment rather than trusted from a running total.
  pub fn evaluate(&self, sequence: &[Token]) -> f64 {
    let mut total = 0.0;
    for k in 0..sequence.len() {
      let word_k = &sequence[k];
      if word_k.is_sentinel() {
        continue;
      }
      let word_j = &sequence[k - 1];
      let word_i = if k >= 2 { Some(&sequence[k - 2]) } else { None };
      total += self.score(word_i, word_j, word_k);
    }
    total
  }
}
