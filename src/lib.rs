//! ```
//! use hangul_lattice_tagger::prelude::*;
//! use std::collections::{HashMap, HashSet};
//!
//! let mut tag_to_morphs: HashMap<Tag, HashSet<String>> = HashMap::new();
//! tag_to_morphs.insert(Tag::Noun, ["노래".to_string()].into_iter().collect());
//! tag_to_morphs.insert(Tag::Josa, ["는".to_string()].into_iter().collect());
//!
//! let dictionary = MorphemeDictionary::new(tag_to_morphs, RuleTable::new());
//! let scorer = CompositeScore::new(vec![ScoreFunction::Regularization(RegularizationScore::default())]);
//! let tagger = Tagger::new(dictionary, BeamConfig::default(), scorer).unwrap();
//!
//! let tagged = tagger.tag("노래는").unwrap();
//! for token in tagged.tokens.iter().filter(|t| !t.is_sentinel()) {
//!     println!("{}", token);
//! }
//! // => 노래/Noun
//! // => 는/Josa
//! ```

#![crate_name = "hangul_lattice_tagger"]
#![crate_type = "dylib"]
#![crate_type = "rlib"]

pub mod config;
pub mod corpus;
pub mod decoder;
pub mod dictionary;
pub mod error;
pub mod features;
pub mod lookup;
pub mod resources;
pub mod scoring;
pub mod sentence;
pub mod tagger;
pub mod tagset;
pub mod token;
pub mod trainer;

pub mod prelude {
  pub use crate::config::{BeamConfig, DictionaryConfig};
  pub use crate::decoder::{Beam, BeamDecoder, Sequence};
  pub use crate::dictionary::{Dictionary, DictionaryBuilder, MorphemeDictionary, RuleTable, WordDictionary};
  pub use crate::error::{ConfigurationError, InputError, Result, StateError, TaggerError};
  pub use crate::features::{Feature, SimpleTrigramEncoder};
  pub use crate::lookup::{EojeolLookup, LrLookup, MorphemeLookup, SubwordLookup};
  pub use crate::resources::FileDictionaryBuilder;
  pub use crate::scoring::{
    CompositeScore, MorphemePreferenceScore, RegularizationScore, ScoreFunction, TrigramFeatureScore,
    WordPreferenceScore,
  };
  pub use crate::tagger::Tagger;
  pub use crate::tagset::Tag;
  pub use crate::token::Token;
}
