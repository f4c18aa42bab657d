//! Markdown report generation.

use std::{fmt::Write as _, path::Path};

use chrono::Utc;

use super::{format_metric, write_report};
use crate::{Evaluation, Result, aggregate::LoadedLog, config::ReportConfig};

/// Markdown report generator.
pub struct MarkdownReport {
  content: String,
}

impl MarkdownReport {
  /// Create a markdown report from an evaluation.
  pub fn from_evaluation(evaluation: &Evaluation, config: &ReportConfig) -> Self {
    let mut content = String::new();

    Self::write_header(&mut content);
    Self::write_inputs(&mut content, &[&evaluation.runtime, &evaluation.static_log]);
    Self::write_matrix(&mut content, evaluation);
    Self::write_metrics(&mut content, evaluation, config.decimals);
    if config.show_mismatches {
      Self::write_mismatches(&mut content, evaluation);
    }

    Self { content }
  }

  pub fn as_str(&self) -> &str {
    &self.content
  }

  /// Save report to a file.
  pub fn save(&self, path: &Path) -> Result<()> {
    write_report(path, &self.content)
  }

  fn write_header(out: &mut String) {
    let _ = writeln!(out, "# Alias Analysis Accuracy Report");
    let _ = writeln!(out);
    let _ = writeln!(out, "**Generated:** {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out, "**Version:** {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(out);
  }

  fn write_inputs(out: &mut String, logs: &[&LoadedLog]) {
    let _ = writeln!(out, "## Inputs");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Log | Path | Merge | Lines | Records | Unique IDs |");
    let _ = writeln!(out, "|-----|------|-------|-------|---------|------------|");
    for log in logs {
      let _ = writeln!(
        out,
        "| {} | `{}` | {:?} | {} | {} | {} |",
        log.kind,
        log.path.display(),
        log.mode,
        log.stats.lines_scanned,
        log.stats.records_matched,
        log.unique_ids()
      );
    }
    let _ = writeln!(out);
  }

  fn write_matrix(out: &mut String, evaluation: &Evaluation) {
    let comparison = &evaluation.comparison;
    let matrix = &comparison.matrix;

    let _ = writeln!(out, "## Confusion Matrix");
    let _ = writeln!(out);
    let _ = writeln!(
      out,
      "**Common IDs:** {} (runtime only: {}, static only: {})",
      comparison.common_ids, comparison.runtime_only, comparison.static_only
    );
    let _ = writeln!(out);

    if !comparison.is_comparable() {
      let _ = writeln!(out, "_No comparable pairs between the logs._");
      let _ = writeln!(out);
      return;
    }

    let _ = writeln!(out, "| | Static: Alias | Static: NoAlias |");
    let _ = writeln!(out, "|---|---|---|");
    let _ = writeln!(
      out,
      "| **Runtime: Alias** | TP {} | FN {} |",
      matrix.true_positives, matrix.false_negatives
    );
    let _ = writeln!(
      out,
      "| **Runtime: NoAlias** | FP {} | TN {} |",
      matrix.false_positives, matrix.true_negatives
    );
    if comparison.unclassified > 0 {
      let _ = writeln!(out);
      let _ = writeln!(out, "{} common IDs had non-binary verdicts.", comparison.unclassified);
    }
    let _ = writeln!(out);
  }

  fn write_metrics(out: &mut String, evaluation: &Evaluation, decimals: usize) {
    let Some(metrics) = &evaluation.metrics else {
      return;
    };

    let _ = writeln!(out, "## Metrics");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Metric | Value |");
    let _ = writeln!(out, "|--------|-------|");
    let _ = writeln!(out, "| Accuracy | {} |", format_metric(metrics.accuracy, decimals));
    let _ = writeln!(out, "| Precision | {} |", format_metric(metrics.precision, decimals));
    let _ = writeln!(out, "| Recall | {} |", format_metric(metrics.recall, decimals));
    let _ = writeln!(out, "| F1 | {} |", format_metric(metrics.f1, decimals));
    let _ = writeln!(out);
  }

  fn write_mismatches(out: &mut String, evaluation: &Evaluation) {
    let comparison = &evaluation.comparison;
    if comparison.false_negative_ids.is_empty() && comparison.false_positive_ids.is_empty() {
      return;
    }

    let _ = writeln!(out, "## Mismatches");
    let _ = writeln!(out);
    // Unsoundness before imprecision
    for id in &comparison.false_negative_ids {
      let _ = writeln!(out, "- ❌ `{}` missed alias (false negative)", id);
    }
    for id in &comparison.false_positive_ids {
      let _ = writeln!(out, "- ⚠️ `{}` spurious alias (false positive)", id);
    }
    let _ = writeln!(out);
  }
}
