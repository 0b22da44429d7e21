//! Eojeol-level lookup strategies: turning one whitespace-delimited word of
//! the input sentence into the set of candidate [`Token`]s a lattice bucket
//! at that offset should hold. Ported from
//! `lattice_tagger/dictionary/lookup.py`'s `lr_lookup`, `subword_lookup` and
//! `word_lookup`.

use std::collections::HashSet;

use crate::dictionary::{Dictionary, MorphemeDictionary};
use crate::tagset::Tag;
use crate::token::Token;

/// Turns one eojeol at a known sentence offset into candidate [`Token`]s.
pub trait EojeolLookup {
  fn lookup(&self, eojeol: &str, offset: usize) -> Vec<Token>;
}

/// Splits the eojeol into exactly two halves: `Noun+Josa`, or (failing that)
/// whatever pair of halves the dictionary independently recognizes.
pub struct LrLookup<'d, D: Dictionary> {
  dictionary: &'d D,
  prefer_exact_match: bool,
}

impl<'d, D: Dictionary> LrLookup<'d, D> {
  pub fn new(dictionary: &'d D) -> LrLookup<'d, D> {
    LrLookup {
      dictionary,
      prefer_exact_match: true,
    }
  }

  pub fn with_exact_match(dictionary: &'d D, prefer_exact_match: bool) -> LrLookup<'d, D> {
    LrLookup {
      dictionary,
      prefer_exact_match,
    }
  }
}

impl<'d, D: Dictionary> EojeolLookup for LrLookup<'d, D> {
  fn lookup(&self, eojeol: &str, offset: usize) -> Vec<Token> {
    let mut tokens = self.dictionary.lookup(eojeol, offset, true);
    if self.prefer_exact_match && !tokens.is_empty() {
      return tokens;
    }

    let chars: Vec<char> = eojeol.chars().collect();
    let n = chars.len();

    for i in 1..n {
      let l: String = chars[..i].iter().collect();
      let r: String = chars[i..].iter().collect();

      if self.dictionary.contains(&l, Tag::Noun) && self.dictionary.contains(&r, Tag::Josa) {
        tokens.push(Token::split(
          eojeol,
          &l,
          Tag::Noun,
          &r,
          Tag::Josa,
          offset,
          offset + n,
          true,
        ));
        continue;
      }

      let l_tokens = self.dictionary.lookup(&l, offset, true);
      let r_tokens = self.dictionary.lookup(&r, offset + i, false);
      if l_tokens.is_empty() || r_tokens.is_empty() {
        continue;
      }
      tokens.extend(l_tokens);
      tokens.extend(r_tokens);
    }

    tokens
  }
}

/// Tries every substring of the eojeol against the dictionary, independent
/// of any left/right pairing.
pub struct SubwordLookup<'d, D: Dictionary> {
  dictionary: &'d D,
  prefer_exact_match: bool,
}

impl<'d, D: Dictionary> SubwordLookup<'d, D> {
  pub fn new(dictionary: &'d D) -> SubwordLookup<'d, D> {
    SubwordLookup {
      dictionary,
      prefer_exact_match: true,
    }
  }

  pub fn with_exact_match(dictionary: &'d D, prefer_exact_match: bool) -> SubwordLookup<'d, D> {
    SubwordLookup {
      dictionary,
      prefer_exact_match,
    }
  }
}

impl<'d, D: Dictionary> EojeolLookup for SubwordLookup<'d, D> {
  fn lookup(&self, eojeol: &str, offset: usize) -> Vec<Token> {
    let mut tokens = self.dictionary.lookup(eojeol, offset, true);
    if self.prefer_exact_match && !tokens.is_empty() {
      return tokens;
    }

    let chars: Vec<char> = eojeol.chars().collect();
    let n = chars.len();

    for b in 0..n {
      let is_l_start = b == 0;
      for e in (b + 1)..=n {
        let sub: String = chars[b..e].iter().collect();
        tokens.extend(self.dictionary.lookup(&sub, offset + b, is_l_start));
      }
    }

    tokens
  }
}

/// The richest strategy: standalone tags, Noun+Josa continuations and
/// lemmatized stem+ending splits, tried at every substring. This is the
/// strategy the default tagger uses.
pub struct MorphemeLookup<'d> {
  dictionary: &'d MorphemeDictionary,
  prefer_exact_match: bool,
  standalones: Vec<Tag>,
  max_len: usize,
}

impl<'d> MorphemeLookup<'d> {
  pub fn new(dictionary: &'d MorphemeDictionary) -> MorphemeLookup<'d> {
    let standalones = vec![
      Tag::Noun,
      Tag::Adverb,
      Tag::Exclamation,
      Tag::Determiner,
      Tag::Number,
    ];
    let max_len = Self::find_max_len(dictionary, &standalones);
    MorphemeLookup {
      dictionary,
      prefer_exact_match: true,
      standalones,
      max_len,
    }
  }

  pub fn with_max_len(dictionary: &'d MorphemeDictionary, max_len: usize) -> MorphemeLookup<'d> {
    let mut lookup = MorphemeLookup::new(dictionary);
    lookup.max_len = max_len;
    lookup
  }

  fn find_max_len(dictionary: &MorphemeDictionary, standalones: &[Tag]) -> usize {
    let mut tags = standalones.to_vec();
    tags.push(Tag::Verb);
    tags.push(Tag::Adjective);

    let mut max_len = 1;
    for tag in tags {
      if let Some(set) = dictionary.morphs_of(tag) {
        for morph in set {
          max_len = max_len.max(morph.chars().count());
        }
      }
    }
    max_len
  }
}

impl<'d> EojeolLookup for MorphemeLookup<'d> {
  fn lookup(&self, eojeol: &str, offset: usize) -> Vec<Token> {
    let mut tokens = self.dictionary.lookup(eojeol, offset, true);
    if self.prefer_exact_match && !tokens.is_empty() {
      return tokens;
    }

    let chars: Vec<char> = eojeol.chars().collect();
    let n = chars.len();
    let mut noun_ends: HashSet<usize> = HashSet::new();

    for b in 0..n {
      let is_l_start = b == 0;
      let max_e = (b + self.max_len).min(n);

      for e in (b + 1)..=max_e {
        let s: String = chars[b..e].iter().collect();

        for tag in &self.standalones {
          if self.dictionary.contains(&s, *tag) {
            tokens.push(Token::single(&s, *tag, offset + b, is_l_start));
            if *tag == Tag::Noun {
              noun_ends.insert(e);
            }
          }
        }

        if noun_ends.contains(&b) && self.dictionary.contains(&s, Tag::Josa) {
          tokens.push(Token::single(&s, Tag::Josa, offset + b, is_l_start));
        }

        for (stem, tag0, ending, tag1) in self.dictionary.lemmatize(&s) {
          tokens.push(Token::split(
            &s,
            &stem,
            tag0,
            &ending,
            tag1,
            offset + b,
            offset + e,
            is_l_start,
          ));
        }
      }
    }

    tokens
  }
}
