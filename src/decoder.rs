//! Left-to-right beam search over the lattice. Ported from
//! `lattice_tagger/beam/beam.py`'s `Beam`/`Sequence` plus the `beam_search`
//! sweep (folded here into `BeamDecoder::decode`, rather than kept as a
//! free function, so the beam size and scorer are bound once).

use crate::config::BeamConfig;
use crate::error::{ConfigurationError, Result, StateError};
use crate::scoring::CompositeScore;
use crate::tagset::Tag;
use crate::token::Token;

/// A partial or complete tiling of the sentence: tokens whose spans are
/// contiguous starting from BOS, a running score, and the length of the
/// trailing run of Unknown tokens (reset to 0 whenever a non-Unknown token
/// is appended).
#[derive(Debug, Clone)]
pub struct Sequence {
  pub tokens: Vec<Token>,
  pub score: f64,
  pub trailing_unknowns: usize,
}

impl Sequence {
  fn seed() -> Sequence {
    Sequence {
      tokens: vec![Token::bos()],
      score: 0.0,
      trailing_unknowns: 0,
    }
  }

  fn last(&self) -> &Token {
    self.tokens.last().expect("a Sequence always has at least BOS")
  }

  fn prev(&self) -> Option<&Token> {
    if self.tokens.len() >= 2 {
      Some(&self.tokens[self.tokens.len() - 2])
    } else {
      None
    }
  }

  fn append(&self, token: Token, score_increment: f64) -> Sequence {
    let trailing_unknowns = if token.tag0 == Tag::Unknown {
      self.trailing_unknowns + 1
    } else {
      0
    };
    let mut tokens = self.tokens.clone();
    tokens.push(token);
    Sequence {
      tokens,
      score: self.score + score_increment,
      trailing_unknowns,
    }
  }
}

/// Per-end-position top-`k` beams, `B[0..=N]`.
#[derive(Debug, Clone)]
pub struct Beam {
  pub k: usize,
  pub slots: Vec<Vec<Sequence>>,
}

/// Runs the position-sweep beam search described in spec.md §4.7: at each
/// end-position `e`, every immature sequence in the admissible begin-range
/// is grown by every dictionary token (or a synthesized Unknown, if the
/// dictionary has none) ending at `e`, then the top `k` survive into `B[e]`.
pub struct BeamDecoder {
  config: BeamConfig,
  scorer: CompositeScore,
}

impl BeamDecoder {
  pub fn new(config: BeamConfig, scorer: CompositeScore) -> Result<BeamDecoder> {
    if config.beam_size == 0 {
      return Err(ConfigurationError::InvalidBeamSize.into());
    }
    if config.max_token_len == 0 {
      return Err(ConfigurationError::InvalidMaxTokenLen.into());
    }
    Ok(BeamDecoder { config, scorer })
  }

  /// `bindex[b]` is every candidate token beginning at `b`; `chars` is the
  /// whitespace-removed sentence, one `char` per position, `chars.len() ==
  /// bindex.len() == N`. Every surviving sequence in the returned `slots[N]`
  /// has a final `Token::eos(N)` appended, so a complete decode always reads
  /// `[BOS, ..tokens.., EOS]`.
  pub fn decode(&self, bindex: &[Vec<Token>], chars: &[char]) -> Result<Beam> {
    let n = bindex.len();
    let mut slots: Vec<Vec<Sequence>> = vec![Vec::new(); n + 1];
    slots[0] = vec![Sequence::seed()];

    for e in 1..=n {
      let lower = e.saturating_sub(self.config.max_token_len);
      let mut candidates: Vec<Sequence> = Vec::new();

      for b in lower..e {
        for immature in &slots[b] {
          let raw: Vec<Token> = bindex[b].iter().filter(|w| w.end == e).cloned().collect();
          let expansions = if raw.is_empty() {
            let surface: String = chars[b..e].iter().collect();
            vec![Token::unknown(&surface, b)]
          } else {
            raw
          };

          for expansion in expansions {
            if immature.trailing_unknowns > 0 && expansion.tag0 == Tag::Unknown && b > lower {
              continue;
            }
            let increment = self.scorer.score(immature.prev(), immature.last(), &expansion);
            candidates.push(immature.append(expansion, increment));
          }
        }
      }

      candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
      candidates.truncate(self.config.beam_size);
      slots[e] = candidates;
    }

    if slots[n].is_empty() {
      return Err(StateError::NoTiling.into());
    }

    for seq in &mut slots[n] {
      *seq = seq.append(Token::eos(n), 0.0);
    }

    Ok(Beam {
      k: self.config.beam_size,
      slots,
    })
  }

  /// The single highest-scoring complete sequence.
  pub fn best(&self, bindex: &[Vec<Token>], chars: &[char]) -> Result<Sequence> {
    let beam = self.decode(bindex, chars)?;
    let n = beam.slots.len() - 1;
    Ok(beam.slots[n][0].clone())
  }
}
