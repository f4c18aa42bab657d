//! Console summary.

use std::fmt::{self, Write as _};

use super::format_metric;
use crate::{Evaluation, aggregate::LoadedLog, config::ReportConfig};

/// Plain-text report written to stdout.
pub struct TextReport {
  content: String,
}

impl TextReport {
  pub fn from_evaluation(evaluation: &Evaluation, config: &ReportConfig) -> Self {
    let mut content = String::new();

    Self::write_loads(&mut content, &[&evaluation.runtime, &evaluation.static_log]);
    Self::write_intersection(&mut content, evaluation);

    if let Some(metrics) = &evaluation.metrics {
      Self::write_buckets(&mut content, evaluation);
      let d = config.decimals;
      let _ = writeln!(content);
      let _ = writeln!(content, "Accuracy:  {}", format_metric(metrics.accuracy, d));
      let _ = writeln!(
        content,
        "Precision: {} (How many predicted aliases were real?)",
        format_metric(metrics.precision, d)
      );
      let _ = writeln!(
        content,
        "Recall:    {}    (How many real aliases did we find?)",
        format_metric(metrics.recall, d)
      );
      let _ = writeln!(content, "F1 Score:  {}", format_metric(metrics.f1, d));

      if config.show_mismatches {
        Self::write_mismatches(&mut content, evaluation);
      }
    } else if evaluation.comparison.common_ids == 0 {
      let _ = writeln!(content, "No intersection found between logs.");
    } else {
      let _ = writeln!(content, "No classifiable pairs among the common IDs.");
    }

    Self { content }
  }

  pub fn as_str(&self) -> &str {
    &self.content
  }

  fn write_loads(out: &mut String, logs: &[&LoadedLog]) {
    for log in logs {
      let _ = writeln!(out, "Loaded {} unique IDs from {} log.", log.unique_ids(), log.kind);
    }
  }

  fn write_intersection(out: &mut String, evaluation: &Evaluation) {
    let comparison = &evaluation.comparison;
    let _ = writeln!(out);
    let _ = writeln!(out, "Analyzing {} common IDs...", comparison.common_ids);
    if comparison.runtime_only > 0 || comparison.static_only > 0 {
      let _ = writeln!(
        out,
        "Not compared: {} only in Runtime log, {} only in Static log",
        comparison.runtime_only, comparison.static_only
      );
    }
  }

  fn write_buckets(out: &mut String, evaluation: &Evaluation) {
    let comparison = &evaluation.comparison;
    let matrix = &comparison.matrix;

    let _ = writeln!(out);
    let _ = writeln!(out, "=== Results ===");
    let _ = writeln!(out, "Total Analyzed Pairs: {}", matrix.total());
    let _ = writeln!(out, "True Positives  (Both Alias):    {}", matrix.true_positives);
    let _ = writeln!(out, "True Negatives  (Both NoAlias):  {}", matrix.true_negatives);
    let _ = writeln!(out, "False Positives (Static Over):   {} (Imprecision)", matrix.false_positives);
    let _ = writeln!(out, "False Negatives (Static Under):  {} (Unsoundness/Bug)", matrix.false_negatives);
    if comparison.unclassified > 0 {
      let _ = writeln!(out, "Unclassified    (Non-binary):    {}", comparison.unclassified);
    }
  }

  fn write_mismatches(out: &mut String, evaluation: &Evaluation) {
    let comparison = &evaluation.comparison;
    let _ = writeln!(out);
    let _ = writeln!(out, "False Positive IDs: {}", join_ids(&comparison.false_positive_ids));
    let _ = writeln!(out, "False Negative IDs: {}", join_ids(&comparison.false_negative_ids));
  }
}

impl fmt::Display for TextReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.content)
  }
}

fn join_ids(ids: &[u64]) -> String {
  if ids.is_empty() {
    return "-".to_string();
  }
  ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
}
