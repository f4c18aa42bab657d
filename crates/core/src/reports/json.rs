//! JSON report format for evaluation results.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::write_report;
use crate::{
  Evaluation, Result,
  aggregate::{LoadedLog, LogKind, MergeMode},
  matcher::Comparison,
  metrics::Metrics,
};

/// Complete evaluation report in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
  /// Report metadata
  pub metadata: ReportMetadata,
  /// Runtime log first, static log second
  pub logs: Vec<LogSummary>,
  /// Join and bucket counts
  pub comparison: Comparison,
  /// Null when nothing could be compared
  pub metrics: Option<Metrics>,
}

/// Report metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
  /// Report generation timestamp
  pub timestamp: DateTime<Utc>,
  /// alias-eval version
  pub version: String,
}

/// What was loaded from one log.
#[derive(Debug, Clone, Serialize)]
pub struct LogSummary {
  pub kind: LogKind,
  pub path: PathBuf,
  pub merge: MergeMode,
  pub unique_ids: usize,
  pub lines_scanned: usize,
  pub records_matched: usize,
}

impl From<&LoadedLog> for LogSummary {
  fn from(log: &LoadedLog) -> Self {
    Self {
      kind: log.kind,
      path: log.path.clone(),
      merge: log.mode,
      unique_ids: log.unique_ids(),
      lines_scanned: log.stats.lines_scanned,
      records_matched: log.stats.records_matched,
    }
  }
}

impl EvaluationReport {
  /// Create a report from an evaluation.
  pub fn from_evaluation(evaluation: &Evaluation) -> Self {
    Self {
      metadata: ReportMetadata {
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
      },
      logs: vec![
        LogSummary::from(&evaluation.runtime),
        LogSummary::from(&evaluation.static_log),
      ],
      comparison: evaluation.comparison.clone(),
      metrics: evaluation.metrics,
    }
  }

  pub fn to_json(&self) -> Result<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }

  /// Save report to a file.
  pub fn save(&self, path: &Path) -> Result<()> {
    write_report(path, &self.to_json()?)
  }
}
