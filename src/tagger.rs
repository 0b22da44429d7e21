//! The public entry point tying dictionary, lookup, and beam decoder
//! together into one `tag(sentence)` call. Ported from
//! `lattice_tagger/tagger/tagger.py::Tagger`.

use crate::config::BeamConfig;
use crate::decoder::{BeamDecoder, Sequence};
use crate::dictionary::MorphemeDictionary;
use crate::error::Result;
use crate::lookup::MorphemeLookup;
use crate::scoring::CompositeScore;
use crate::sentence::sentence_lookup_as_begin_index;

/// A ready-to-use tagger: a dictionary snapshot, the beam decoder bound to
/// it, and the composite scorer the decoder ranks sequences with.
pub struct Tagger {
  dictionary: MorphemeDictionary,
  decoder: BeamDecoder,
}

impl Tagger {
  pub fn new(dictionary: MorphemeDictionary, beam_config: BeamConfig, scorer: CompositeScore) -> Result<Tagger> {
    Ok(Tagger {
      dictionary,
      decoder: BeamDecoder::new(beam_config, scorer)?,
    })
  }

  pub fn dictionary(&self) -> &MorphemeDictionary {
    &self.dictionary
  }

  pub fn dictionary_mut(&mut self) -> &mut MorphemeDictionary {
    &mut self.dictionary
  }

  /// Tags one sentence: whitespace-splits into eojeols, looks up every
  /// candidate token via [`MorphemeLookup`], and returns the
  /// highest-scoring complete [`Sequence`] the beam decoder finds.
  pub fn tag(&self, sentence: &str) -> Result<Sequence> {
    let lookup = MorphemeLookup::new(&self.dictionary);
    let lookup_result = sentence_lookup_as_begin_index(sentence, &lookup);
    let chars: Vec<char> = sentence.chars().filter(|c| !c.is_whitespace()).collect();
    self.decoder.best(&lookup_result.bindex, &chars)
  }
}
