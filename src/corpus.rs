//! Corpus parsing for training-time feature scans: blank-line-delimited
//! sentences of tab-separated `<eojeol>\t<morph-annotation>` lines. Ported
//! from `lattice_tagger/utils.py::WordMorphemePairs`,
//! `lattice_tagger/dictionary/dictionary.py::text_to_words`/`flatten_words`,
//! and `lattice_tagger/utils.py::left_space_tag`.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{InputError, Result};
use crate::tagset::Tag;
use crate::token::Token;

/// Splits `sent` into a whitespace-removed character string and a
/// per-character flag marking which characters start a whitespace-separated
/// eojeol (position 0 always starts one).
pub fn left_space_tag(sent: &str) -> (String, Vec<bool>) {
  let chars: String = sent.chars().filter(|c| !c.is_whitespace()).collect();
  let mut starts = vec![false; chars.chars().count()];
  let mut pos = 0usize;
  let mut after_space = true;
  for c in sent.chars() {
    if c.is_whitespace() {
      after_space = true;
      continue;
    }
    if after_space {
      starts[pos] = true;
    }
    after_space = false;
    pos += 1;
  }

  (chars, starts)
}

fn str_to_morphtag(annotation: &str) -> Vec<(&str, &str)> {
  annotation
    .split('+')
    .filter_map(|part| part.split_once('/'))
    .collect()
}

/// Parses one `(word_text, morph_text)` eojeol-aligned pair, per
/// `text_to_words`, into `[BOS, ..tokens.., EOS]`. `word_text`/`morph_text`
/// both use a double space between eojeols and a single space between
/// sub-words inside one eojeol.
pub fn text_to_words(word_text: &str, morph_text: &str) -> Result<Vec<Token>> {
  let word_eojeols: Vec<&str> = word_text.split("  ").collect();
  let morph_eojeols: Vec<&str> = morph_text.split("  ").collect();

  if word_eojeols.len() != morph_eojeols.len() {
    return Err(
      InputError::MismatchedEojeolCount {
        word_count: word_eojeols.len(),
        morph_count: morph_eojeols.len(),
      }
      .into(),
    );
  }

  let sent = word_eojeols
    .iter()
    .map(|eojeol| eojeol.chars().filter(|c| !c.is_whitespace()).collect::<String>())
    .collect::<Vec<_>>()
    .join(" ");
  let (_, is_l_start) = left_space_tag(&sent);

  let mut tokens = vec![Token::bos()];
  let mut begin = 0usize;

  for (word_eojeol, morph_eojeol) in word_eojeols.iter().zip(morph_eojeols.iter()) {
    for (word, morph) in word_eojeol.split_whitespace().zip(morph_eojeol.split_whitespace()) {
      let morphtags = str_to_morphtag(morph);
      let n = word.chars().count();
      let end = begin + n;
      let is_l = is_l_start.get(begin).copied().unwrap_or(false);

      let token = match morphtags.as_slice() {
        [(morph0, tag0)] => {
          let tag0 = Tag::from_str(tag0).unwrap_or(Tag::Unknown);
          Token::single(morph0, tag0, begin, is_l)
        }
        [(morph0, tag0), (morph1, tag1)] => {
          let tag0 = Tag::from_str(tag0).unwrap_or(Tag::Unknown);
          let tag1 = Tag::from_str(tag1).unwrap_or(Tag::Unknown);
          Token::split(word, morph0, tag0, morph1, tag1, begin, end, is_l)
        }
        _ => {
          return Err(
            InputError::TooManyMorphemes {
              word: word.to_string(),
              count: morphtags.len(),
            }
            .into(),
          )
        }
      };

      begin = end;
      tokens.push(token);
    }
  }

  tokens.push(Token::eos(begin));
  Ok(tokens)
}

/// Splits every two-morpheme token in `tokens` into two single-morpheme
/// tokens, applying the conjoining-jamo length adjustment at the split
/// point. Sentinels and already-single-morpheme tokens pass through
/// unchanged.
pub fn flatten_words(tokens: &[Token]) -> Vec<Token> {
  let mut flattened = Vec::with_capacity(tokens.len());
  for token in tokens {
    let (morph1, tag1) = match (&token.morph1, token.tag1) {
      (Some(morph1), Some(tag1)) => (morph1, tag1),
      _ => {
        flattened.push(token.clone());
        continue;
      }
    };

    let len0 = token.morph0.chars().count();
    let split_at = (token.begin + len0).min(token.end);

    flattened.push(Token::single(&token.morph0, token.tag0, token.begin, token.is_l_start));
    flattened.push(Token {
      surface: morph1.clone(),
      morph0: morph1.clone(),
      tag0: tag1,
      morph1: None,
      tag1: None,
      length: token.end - split_at,
      begin: split_at,
      end: token.end,
      is_l_start: false,
    });
  }
  flattened
}

/// Iterates a tab-separated corpus file, one `(char_str, morph_str)` pair
/// per blank-line-delimited sentence, each joined back with a double space
/// between eojeols (the `text_to_words` input shape). Lines with fewer
/// columns than `morph_column + 1`, or whose morph-annotation column is
/// shorter than 3 characters, are skipped, per the source's corpus reader.
pub struct WordMorphemePairs {
  lines: io::Lines<BufReader<File>>,
  morph_column: usize,
}

impl WordMorphemePairs {
  pub fn open<P: AsRef<Path>>(path: P) -> Result<WordMorphemePairs> {
    WordMorphemePairs::with_morph_column(path, 1)
  }

  pub fn with_morph_column<P: AsRef<Path>>(path: P, morph_column: usize) -> Result<WordMorphemePairs> {
    let file = File::open(path)?;
    Ok(WordMorphemePairs {
      lines: BufReader::new(file).lines(),
      morph_column,
    })
  }
}

impl Iterator for WordMorphemePairs {
  type Item = io::Result<(String, String)>;

  fn next(&mut self) -> Option<Self::Item> {
    let mut eojeols: Vec<String> = Vec::new();
    let mut morphs: Vec<String> = Vec::new();

    loop {
      let line = match self.lines.next() {
        Some(Ok(line)) => line,
        Some(Err(e)) => return Some(Err(e)),
        None => {
          return if eojeols.is_empty() {
            None
          } else {
            Some(Ok((eojeols.join("  "), morphs.join("  "))))
          };
        }
      };

      if line.trim().is_empty() {
        if !eojeols.is_empty() {
          return Some(Ok((eojeols.join("  "), morphs.join("  "))));
        }
        continue;
      }

      let columns: Vec<&str> = line.split('\t').collect();
      if columns.len() <= self.morph_column {
        continue;
      }
      let eojeol = columns[0];
      let morph = columns[self.morph_column];
      if !eojeol.trim().is_empty() && morph.trim().chars().count() >= 3 {
        eojeols.push(eojeol.to_string());
        morphs.push(morph.to_string());
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;
  use tempfile::NamedTempFile;

  #[test]
  fn left_space_tag_marks_eojeol_starts() {
    let (chars, starts) = left_space_tag("아이 오아이");
    assert_eq!(chars, "아이오아이");
    assert_eq!(starts, vec![true, false, true, false]);
  }

  #[test]
  fn text_to_words_parses_noun_josa_and_split_stem() {
    let word_text = "너무너무너무 는  아이오아이 의  노래  입니다";
    let morph_text = "너무너무너무/Noun 는/Josa  아이오아이/Noun 의/Josa  노래/Noun  이/Adjective+ㅂ니다/Eomi";

    let tokens = text_to_words(word_text, morph_text).unwrap();
    assert_eq!(tokens.first().unwrap().tag0, Tag::Bos);
    assert_eq!(tokens.last().unwrap().tag0, Tag::Eos);
    assert!(tokens
      .iter()
      .any(|t| t.morph0 == "너무너무너무" && t.tag0 == Tag::Noun && t.is_l_start));
    assert!(tokens
      .iter()
      .any(|t| t.morph0 == "이" && t.tag0 == Tag::Adjective && t.morph1.as_deref() == Some("ㅂ니다")));
  }

  #[test]
  fn text_to_words_rejects_mismatched_eojeol_counts() {
    let err = text_to_words("하나  둘", "하나/Noun");
    assert!(err.is_err());
  }

  #[test]
  fn text_to_words_rejects_three_or_more_morphemes() {
    let err = text_to_words("가나다", "가/Noun+나/Josa+다/Eomi");
    assert!(err.is_err());
  }

  #[test]
  fn flatten_words_splits_two_morpheme_tokens() {
    let tokens = vec![Token::split("했다", "하", Tag::Verb, "았다", Tag::Eomi, 0, 2, true)];
    let flattened = flatten_words(&tokens);
    assert_eq!(flattened.len(), 2);
    assert_eq!(flattened[0].morph0, "하");
    assert_eq!(flattened[1].morph0, "았다");
    assert!(flattened[0].is_l_start);
    assert!(!flattened[1].is_l_start);
  }

  #[test]
  fn flatten_words_adjusts_length_for_conjoining_jamo() {
    let tokens = vec![Token::split("간", "가", Tag::Verb, "ㄴ", Tag::Eomi, 3, 4, false)];
    let flattened = flatten_words(&tokens);
    assert_eq!(flattened[1].length, 0);
  }

  #[test]
  fn word_morpheme_pairs_groups_blank_line_delimited_sentences() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "너무너무너무\t너무너무너무/Noun").unwrap();
    writeln!(file, "는\t는/Josa").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "노래\t노래/Noun").unwrap();

    let pairs: Vec<_> = WordMorphemePairs::open(file.path())
      .unwrap()
      .collect::<io::Result<Vec<_>>>()
      .unwrap();

    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].0, "너무너무너무  는");
    assert_eq!(pairs[0].1, "너무너무너무/Noun  는/Josa");
    assert_eq!(pairs[1].0, "노래");
  }
}
