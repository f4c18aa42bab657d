//! Join the runtime and static mappings on shared identifiers.

use serde::{Deserialize, Serialize};

use crate::{aggregate::AggregatedMapping, metrics::ConfusionMatrix};

/// Outcome of one identifier judged by both logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeBucket {
  /// Both say alias
  TruePositive,
  /// Both say no alias
  TrueNegative,
  /// Static says alias, runtime never saw one
  FalsePositive,
  /// Runtime saw an alias the static analyzer missed
  FalseNegative,
}

/// Bucket a `(truth, prediction)` verdict pair.
///
/// Pairs involving a value other than 0 or 1 have no bucket.
pub fn classify(truth: u64, prediction: u64) -> Option<OutcomeBucket> {
  match (truth, prediction) {
    (1, 1) => Some(OutcomeBucket::TruePositive),
    (0, 0) => Some(OutcomeBucket::TrueNegative),
    (0, 1) => Some(OutcomeBucket::FalsePositive),
    (1, 0) => Some(OutcomeBucket::FalseNegative),
    _ => None,
  }
}

/// Result of joining two mappings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Comparison {
  /// Identifiers present in both logs
  pub common_ids: usize,
  /// Identifiers only the runtime log reported
  pub runtime_only: usize,
  /// Identifiers only the static log reported
  pub static_only: usize,
  /// Common identifiers whose verdict pair is not binary
  pub unclassified: usize,
  pub matrix: ConfusionMatrix,
  /// Ascending
  pub false_positive_ids: Vec<u64>,
  /// Ascending
  pub false_negative_ids: Vec<u64>,
}

impl Comparison {
  /// Whether any identifier could be scored.
  pub fn is_comparable(&self) -> bool {
    !self.matrix.is_empty()
  }
}

/// Classify every identifier present in both `truth` and `prediction`.
pub fn compare(truth: &AggregatedMapping, prediction: &AggregatedMapping) -> Comparison {
  let mut comparison = Comparison::default();

  for (id, truth_verdict) in truth.iter() {
    let Some(predicted) = prediction.get(id) else {
      comparison.runtime_only += 1;
      continue;
    };
    comparison.common_ids += 1;

    match classify(truth_verdict, predicted) {
      Some(bucket) => {
        comparison.matrix.record(bucket);
        match bucket {
          OutcomeBucket::FalsePositive => comparison.false_positive_ids.push(id),
          OutcomeBucket::FalseNegative => comparison.false_negative_ids.push(id),
          OutcomeBucket::TruePositive | OutcomeBucket::TrueNegative => {}
        }
      }
      None => comparison.unclassified += 1,
    }
  }

  comparison.static_only = prediction.len() - comparison.common_ids;
  comparison
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::{
    aggregate::{MergeMode, aggregate},
    record::Record,
  };

  fn mapping(pairs: &[(u64, u64)]) -> AggregatedMapping {
    aggregate(pairs.iter().map(|&(id, result)| Record::new(id, result)), MergeMode::LastWins)
  }

  #[test]
  fn test_classify_table() {
    assert_eq!(classify(1, 1), Some(OutcomeBucket::TruePositive));
    assert_eq!(classify(0, 0), Some(OutcomeBucket::TrueNegative));
    assert_eq!(classify(0, 1), Some(OutcomeBucket::FalsePositive));
    assert_eq!(classify(1, 0), Some(OutcomeBucket::FalseNegative));
    assert_eq!(classify(2, 1), None);
    assert_eq!(classify(0, 5), None);
  }

  #[test]
  fn test_reference_example() {
    let truth = mapping(&[(1, 1), (2, 0)]);
    let prediction = mapping(&[(1, 1), (2, 1)]);

    let comparison = compare(&truth, &prediction);
    assert_eq!(comparison.common_ids, 2);
    assert_eq!(comparison.matrix, ConfusionMatrix::new(1, 0, 1, 0));
    assert_eq!(comparison.false_positive_ids, vec![2]);
    assert!(comparison.false_negative_ids.is_empty());
    assert!(comparison.is_comparable());
  }

  #[test]
  fn test_disjoint_logs_are_not_comparable() {
    let truth = mapping(&[(1, 1), (2, 0)]);
    let prediction = mapping(&[(3, 1), (4, 0), (5, 0)]);

    let comparison = compare(&truth, &prediction);
    assert_eq!(comparison.common_ids, 0);
    assert_eq!(comparison.runtime_only, 2);
    assert_eq!(comparison.static_only, 3);
    assert!(!comparison.is_comparable());
  }

  #[test]
  fn test_bucket_total_matches_intersection() {
    let truth = mapping(&[(1, 1), (2, 0), (3, 1), (4, 0), (5, 1), (8, 0)]);
    let prediction = mapping(&[(1, 0), (2, 0), (3, 1), (4, 1), (6, 1), (7, 0)]);

    let comparison = compare(&truth, &prediction);
    assert_eq!(comparison.common_ids, 4);
    assert_eq!(comparison.matrix.total(), comparison.common_ids);
    assert_eq!(comparison.runtime_only, 2);
    assert_eq!(comparison.static_only, 2);
    assert_eq!(comparison.false_negative_ids, vec![1]);
    assert_eq!(comparison.false_positive_ids, vec![4]);
  }

  #[test]
  fn test_opaque_verdicts_are_unclassified() {
    let truth = mapping(&[(1, 1), (2, 3)]);
    let prediction = mapping(&[(1, 1), (2, 1)]);

    let comparison = compare(&truth, &prediction);
    assert_eq!(comparison.common_ids, 2);
    assert_eq!(comparison.unclassified, 1);
    assert_eq!(comparison.matrix.total() + comparison.unclassified, comparison.common_ids);
  }

  #[test]
  fn test_empty_mappings() {
    let comparison = compare(&AggregatedMapping::new(), &AggregatedMapping::new());
    assert_eq!(comparison, Comparison::default());
  }
}
