//! Training-time feature indexing and parameter fitting. Ported from
//! `lattice_tagger/features/utils.py::scan_features`/`indexing` and
//! `lattice_tagger/trainer/train.py::fit_parameter`.

use std::collections::HashMap;

use log::info;

use crate::corpus::{flatten_words, left_space_tag, text_to_words};
use crate::error::{Result, StateError};
use crate::features::{transform_sequence, Feature};

/// A trained feature index: every feature seen at least `min_count` times
/// across the scanned corpus, ordered by `(feature class, descending
/// count)`, matching the source's `indexing` function.
pub struct FeatureIndex {
  pub idx_to_feature: Vec<Feature>,
  pub feature_to_idx: HashMap<Feature, usize>,
  pub idx_to_count: Vec<usize>,
}

/// Scans `(word_text, morph_text)` pairs and counts every [`Feature`]
/// produced by flattening and feature-transforming each sentence, keeping
/// only features seen at least `min_count` times. A malformed pair (eojeol
/// count mismatch, three-or-more morphemes) is logged and skipped rather
/// than aborting the whole scan, matching the source's per-sentence
/// try/except.
pub fn scan_features<I>(pairs: I, min_count: usize) -> FeatureIndex
where
  I: IntoIterator<Item = (String, String)>,
{
  let mut counter: HashMap<Feature, usize> = HashMap::new();

  for (i, (sent, morph_text)) in pairs.into_iter().enumerate() {
    let words = match text_to_words(&sent, &morph_text) {
      Ok(words) => flatten_words(&words),
      Err(e) => {
        info!("skipping pair {} while scanning features: {}", i, e);
        continue;
      }
    };
    let (_, _is_l_tag) = left_space_tag(&sent);

    for features in transform_sequence(&words) {
      for feature in features {
        *counter.entry(feature).or_insert(0) += 1;
      }
    }
  }

  counter.retain(|_, count| *count >= min_count);
  index_features(counter)
}

fn index_features(counter: HashMap<Feature, usize>) -> FeatureIndex {
  let mut entries: Vec<(Feature, usize)> = counter.into_iter().collect();
  entries.sort_by(|(fa, ca), (fb, cb)| fa.class().cmp(&fb.class()).then(cb.cmp(ca)));

  let idx_to_count: Vec<usize> = entries.iter().map(|(_, count)| *count).collect();
  let idx_to_feature: Vec<Feature> = entries.into_iter().map(|(feature, _)| feature).collect();
  let feature_to_idx: HashMap<Feature, usize> = idx_to_feature
    .iter()
    .cloned()
    .enumerate()
    .map(|(idx, feature)| (feature, idx))
    .collect();

  FeatureIndex {
    idx_to_feature,
    feature_to_idx,
    idx_to_count,
  }
}

/// Estimating `coefficients` from a trained [`FeatureIndex`] and a corpus is
/// unimplemented: the source's `fit_parameter`/`train_epoch` is a stub
/// (`train_epoch` has a bare `# TODO` and returns its input coefficients
/// unchanged every epoch), and which estimation algorithm it was meant to
/// converge to (perceptron, margin-based, gradient) is not recoverable from
/// the source. Callers that need a scorer today must supply hand-picked
/// coefficients directly to `TrigramFeatureScore::new`, as the worked
/// examples do.
pub fn fit_parameters(_feature_index: &FeatureIndex, _max_epochs: usize) -> Result<Vec<f64>> {
  Err(StateError::ParameterFittingUnimplemented.into())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::features::Feature;

  #[test]
  fn scan_features_counts_and_orders_by_class_then_frequency() {
    let pairs = vec![
      (
        "너무너무너무 는  아이오아이 의".to_string(),
        "너무너무너무/Noun 는/Josa  아이오아이/Noun 의/Josa".to_string(),
      ),
      (
        "공연 을".to_string(),
        "공연/Noun 을/Josa".to_string(),
      ),
    ];

    let index = scan_features(pairs, 1);
    assert!(!index.idx_to_feature.is_empty());
    assert_eq!(index.idx_to_feature.len(), index.idx_to_count.len());
    assert_eq!(index.idx_to_feature.len(), index.feature_to_idx.len());

    let classes: Vec<u8> = index.idx_to_feature.iter().map(Feature::class).collect();
    let mut sorted = classes.clone();
    sorted.sort();
    assert_eq!(classes, sorted);
  }

  #[test]
  fn scan_features_skips_malformed_pairs() {
    let pairs = vec![("하나  둘".to_string(), "하나/Noun".to_string())];
    let index = scan_features(pairs, 1);
    assert!(index.idx_to_feature.is_empty());
  }

  #[test]
  fn scan_features_applies_minimum_count_filter() {
    let pairs = vec![
      ("공연 을".to_string(), "공연/Noun 을/Josa".to_string()),
      ("공연 을".to_string(), "공연/Noun 을/Josa".to_string()),
    ];
    let index_low = scan_features(pairs.clone(), 1);
    let index_high = scan_features(pairs, 10);
    assert!(index_low.idx_to_feature.len() > index_high.idx_to_feature.len());
  }

  #[test]
  fn fit_parameters_is_unimplemented() {
    let index = scan_features(Vec::new(), 1);
    assert!(fit_parameters(&index, 10).is_err());
  }
}
