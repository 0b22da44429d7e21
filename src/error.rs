//! Crate-wide error kinds, per the error handling design: configuration
//! errors, input errors and state errors all surface to the caller
//! immediately. The core never silently corrupts a lattice or a sequence.

use thiserror::Error;

use crate::tagset::Tag;

#[derive(Error, Debug)]
pub enum ConfigurationError {
  #[error("tag {0} is not a known dictionary tag; pass force=true to add it anyway")]
  UnknownTag(String),
  #[error("tag {0:?} has no entries to remove")]
  EmptyTag(Tag),
  #[error("feature index map has {map_len} entries but coefficient vector has {coef_len}")]
  CoefficientSizeMismatch { map_len: usize, coef_len: usize },
  #[error("beam size must be at least 1")]
  InvalidBeamSize,
  #[error("max_token_len must be at least 1")]
  InvalidMaxTokenLen,
}

#[derive(Error, Debug)]
pub enum InputError {
  #[error("word `{word}` has {count} morphemes; at most two are supported")]
  TooManyMorphemes { word: String, count: usize },
  #[error("word_text and morph_text disagree on eojeol count ({word_count} vs {morph_count})")]
  MismatchedEojeolCount {
    word_count: usize,
    morph_count: usize,
  },
}

#[derive(Error, Debug)]
pub enum StateError {
  #[error("encoder must be trained (feature_dic installed) before encode_word is called")]
  EncoderNotTrained,
  #[error("parameter fitting is not implemented: the source's fit_parameter is a stub and the \
  estimation algorithm (perceptron? margin-based? gradient?) is unspecified")]
  ParameterFittingUnimplemented,
  #[error("decoder produced no sequence: max_token_len is too small for this lattice")]
  NoTiling,
}

#[derive(Error, Debug)]
pub enum TaggerError {
  #[error(transparent)]
  Configuration(#[from] ConfigurationError),
  #[error(transparent)]
  Input(#[from] InputError),
  #[error(transparent)]
  State(#[from] StateError),
  #[error(transparent)]
  Io(#[from] std::io::Error),
  #[error(transparent)]
  Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TaggerError>;
