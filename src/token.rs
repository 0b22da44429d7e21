//! The immutable candidate-segment record produced by lookup and consumed by
//! the beam decoder.

use std::fmt;

use crate::tagset::Tag;

/// Conjoining jamo (sub-syllable consonant markers, U+3131..U+314E) fuse into
/// the preceding syllable and contribute no surface character of their own;
/// `is_l_part` checks whether an ending begins with one.
fn starts_with_conjoining_jamo(s: &str) -> bool {
  matches!(s.chars().next(), Some(c) if ('\u{3131}'..='\u{314E}').contains(&c))
}

/// One candidate segment in the lattice: either a single morpheme, or an
/// L+R decomposition (Noun+Josa, stem+Eomi) of at most two morphemes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  pub surface: String,
  pub morph0: String,
  pub tag0: Tag,
  pub morph1: Option<String>,
  pub tag1: Option<Tag>,
  pub length: usize,
  pub begin: usize,
  pub end: usize,
  pub is_l_start: bool,
}

impl Token {
  pub fn bos() -> Token {
    Token {
      surface: String::from("BOS"),
      morph0: String::from("BOS"),
      tag0: Tag::Bos,
      morph1: None,
      tag1: None,
      length: 0,
      begin: 0,
      end: 0,
      is_l_start: false,
    }
  }

  pub fn eos(at: usize) -> Token {
    Token {
      surface: String::from("EOS"),
      morph0: String::from("EOS"),
      tag0: Tag::Eos,
      morph1: None,
      tag1: None,
      length: 0,
      begin: at,
      end: at,
      is_l_start: false,
    }
  }

  /// A single-morpheme token covering `[begin, begin + surface.chars().count())`.
  pub fn single(surface: &str, tag0: Tag, begin: usize, is_l_start: bool) -> Token {
    let length = surface.chars().count();
    Token {
      surface: surface.to_string(),
      morph0: surface.to_string(),
      tag0,
      morph1: None,
      tag1: None,
      length,
      begin,
      end: begin + length,
      is_l_start,
    }
  }

  /// An Unknown token synthesized by the decoder to cover a gap with no
  /// dictionary candidate.
  pub fn unknown(surface: &str, begin: usize) -> Token {
    let length = surface.chars().count();
    Token {
      surface: surface.to_string(),
      morph0: surface.to_string(),
      tag0: Tag::Unknown,
      morph1: None,
      tag1: None,
      length,
      begin,
      end: begin + length,
      is_l_start: false,
    }
  }

  /// An L+R decomposition token (Noun+Josa, or a lemmatized stem+Eomi).
  /// `begin`/`end` are the span in the concatenated sentence; `length` is
  /// always `end - begin`, which may be smaller than
  /// `morph0.chars().count() + morph1.chars().count()` when `morph1` begins
  /// with a conjoining jamo that fuses into the preceding syllable instead
  /// of contributing its own surface position.
  pub fn split(
    surface: &str,
    morph0: &str,
    tag0: Tag,
    morph1: &str,
    tag1: Tag,
    begin: usize,
    end: usize,
    is_l_start: bool,
  ) -> Token {
    debug_assert!(end >= begin);
    Token {
      surface: surface.to_string(),
      morph0: morph0.to_string(),
      tag0,
      morph1: Some(morph1.to_string()),
      tag1: Some(tag1),
      length: end - begin,
      begin,
      end,
      is_l_start,
    }
  }

  pub fn is_sentinel(&self) -> bool {
    matches!(self.tag0, Tag::Bos | Tag::Eos)
  }

  pub fn is_single_syllable_noun(&self) -> bool {
    self.tag0 == Tag::Noun && self.length == 1
  }

  pub fn ends_with_fused_jamo(&self) -> bool {
    self
      .morph1
      .as_deref()
      .map(starts_with_conjoining_jamo)
      .unwrap_or(false)
  }
}

impl fmt::Display for Token {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match (&self.morph1, self.tag1) {
      (Some(morph1), Some(tag1)) => write!(
        f,
        "{}/{}+{}/{}",
        self.morph0, self.tag0, morph1, tag1
      ),
      _ => write!(f, "{}/{}", self.morph0, self.tag0),
    }
  }
}
