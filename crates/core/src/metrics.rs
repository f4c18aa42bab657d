//! Confusion matrix and the classification metrics derived from it.
//!
//! Positive means "alias". Every ratio whose denominator is zero is defined as
//! 0.0 rather than NaN, so the metrics always land in `[0, 1]`.

use serde::{Deserialize, Serialize};

use crate::matcher::OutcomeBucket;

/// Bucket counts over the classified identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
  /// Runtime alias, static alias
  pub true_positives: usize,
  /// Runtime no-alias, static no-alias
  pub true_negatives: usize,
  /// Runtime no-alias, static alias (imprecision)
  pub false_positives: usize,
  /// Runtime alias, static no-alias (unsoundness)
  pub false_negatives: usize,
}

impl ConfusionMatrix {
  pub fn new(true_positives: usize, true_negatives: usize, false_positives: usize, false_negatives: usize) -> Self {
    Self {
      true_positives,
      true_negatives,
      false_positives,
      false_negatives,
    }
  }

  /// Count one classified identifier.
  pub fn record(&mut self, bucket: OutcomeBucket) {
    match bucket {
      OutcomeBucket::TruePositive => self.true_positives += 1,
      OutcomeBucket::TrueNegative => self.true_negatives += 1,
      OutcomeBucket::FalsePositive => self.false_positives += 1,
      OutcomeBucket::FalseNegative => self.false_negatives += 1,
    }
  }

  pub fn count(&self, bucket: OutcomeBucket) -> usize {
    match bucket {
      OutcomeBucket::TruePositive => self.true_positives,
      OutcomeBucket::TrueNegative => self.true_negatives,
      OutcomeBucket::FalsePositive => self.false_positives,
      OutcomeBucket::FalseNegative => self.false_negatives,
    }
  }

  pub fn total(&self) -> usize {
    self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
  }

  pub fn is_empty(&self) -> bool {
    self.total() == 0
  }
}

impl FromIterator<OutcomeBucket> for ConfusionMatrix {
  fn from_iter<I: IntoIterator<Item = OutcomeBucket>>(iter: I) -> Self {
    let mut matrix = Self::default();
    for bucket in iter {
      matrix.record(bucket);
    }
    matrix
  }
}

/// Summary scores for the static analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
  /// (TP + TN) / total
  pub accuracy: f64,
  /// TP / (TP + FP): how many predicted aliases were real
  pub precision: f64,
  /// TP / (TP + FN): how many real aliases were found
  pub recall: f64,
  /// Harmonic mean of precision and recall
  pub f1: f64,
}

impl Metrics {
  /// Derive the metrics, or `None` when the matrix is empty.
  pub fn from_matrix(matrix: &ConfusionMatrix) -> Option<Self> {
    let total = matrix.total();
    if total == 0 {
      return None;
    }

    let precision = ratio(matrix.true_positives, matrix.true_positives + matrix.false_positives);
    let recall = ratio(matrix.true_positives, matrix.true_positives + matrix.false_negatives);

    Some(Self {
      accuracy: ratio(matrix.true_positives + matrix.true_negatives, total),
      precision,
      recall,
      f1: f1_score(precision, recall),
    })
  }
}

/// `num / den`, or 0.0 when `den` is zero.
fn ratio(num: usize, den: usize) -> f64 {
  if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

fn f1_score(precision: f64, recall: f64) -> f64 {
  let sum = precision + recall;
  if sum > 0.0 { 2.0 * precision * recall / sum } else { 0.0 }
}
