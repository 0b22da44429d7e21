//! The closed set of morpheme tags, plus the BOS/EOS/Unknown sentinels.

use std::fmt;

/// A morpheme tag. Tag equality is identity: two tags are equal iff they are
/// the same variant, and tags are never mutated once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
  Bos,
  Eos,
  Unknown,
  Noun,
  Pronoun,
  Number,
  Josa,
  Adjective,
  Verb,
  Eomi,
  Adverb,
  Determiner,
  Exclamation,
}

impl Tag {
  /// All tags a dictionary resource directory may name a `<tag>.txt` file
  /// after (excludes the sentinels, which are never loaded from disk).
  pub const DICTIONARY_TAGS: [Tag; 10] = [
    Tag::Noun,
    Tag::Pronoun,
    Tag::Number,
    Tag::Josa,
    Tag::Adjective,
    Tag::Verb,
    Tag::Eomi,
    Tag::Adverb,
    Tag::Determiner,
    Tag::Exclamation,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Tag::Bos => "BOS",
      Tag::Eos => "EOS",
      Tag::Unknown => "Unknown",
      Tag::Noun => "Noun",
      Tag::Pronoun => "Pronoun",
      Tag::Number => "Number",
      Tag::Josa => "Josa",
      Tag::Adjective => "Adjective",
      Tag::Verb => "Verb",
      Tag::Eomi => "Eomi",
      Tag::Adverb => "Adverb",
      Tag::Determiner => "Determiner",
      Tag::Exclamation => "Exclamation",
    }
  }

  pub fn from_str(s: &str) -> Option<Tag> {
    Some(match s {
      "BOS" => Tag::Bos,
      "EOS" => Tag::Eos,
      "Unknown" => Tag::Unknown,
      "Noun" => Tag::Noun,
      "Pronoun" => Tag::Pronoun,
      "Number" => Tag::Number,
      "Josa" => Tag::Josa,
      "Adjective" => Tag::Adjective,
      "Verb" => Tag::Verb,
      "Eomi" => Tag::Eomi,
      "Adverb" => Tag::Adverb,
      "Determiner" => Tag::Determiner,
      "Exclamation" => Tag::Exclamation,
      _ => return None,
    })
  }
}

impl fmt::Display for Tag {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
