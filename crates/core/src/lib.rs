//! Accuracy evaluation for static alias analysis.
//!
//! Compares a runtime alias log (ground truth) against a static analyzer's log
//! and scores the analyzer with a confusion matrix.
//!
//! ## Pipeline
//!
//! - **Record**: `ID:<id> RES:<res>` lines extracted from raw log text
//! - **Aggregate**: one verdict per identifier, merged under a [`MergeMode`]
//! - **Matcher**: join both mappings on shared identifiers and bucket each pair
//! - **Metrics**: accuracy, precision, recall and F1 with zero-denominator guards
//! - **Reports**: console text, JSON and Markdown renderings of the result

pub mod aggregate;
pub mod config;
pub mod matcher;
pub mod metrics;
pub mod record;
pub mod reports;

use std::path::{Path, PathBuf};

pub use aggregate::{AggregatedMapping, LoadedLog, LogKind, MergeMode, ScanStats, aggregate, aggregate_reader, load_log};
pub use config::Config;
pub use matcher::{Comparison, OutcomeBucket, classify, compare};
pub use metrics::{ConfusionMatrix, Metrics};
pub use record::{Record, parse_line};
pub use reports::{EvaluationReport, MarkdownReport, TextReport};

use thiserror::Error;

/// Evaluation errors
#[derive(Debug, Error)]
pub enum Error {
  #[error("cannot open {}: {source}", path.display())]
  FileAccess {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed reading {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid config {}: {source}", path.display())]
  Config {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("cannot write report {}: {source}", path.display())]
  ReportWrite {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Everything produced by one evaluation run.
#[derive(Debug, Clone)]
pub struct Evaluation {
  pub runtime: LoadedLog,
  pub static_log: LoadedLog,
  pub comparison: Comparison,
  /// `None` when the logs share no classifiable identifiers
  pub metrics: Option<Metrics>,
}

/// Load both logs with the configured merge modes and score the static log.
pub fn evaluate(runtime_path: &Path, static_path: &Path, config: &Config) -> Result<Evaluation> {
  let runtime = load_log(runtime_path, LogKind::Runtime, config.merge_mode(LogKind::Runtime))?;
  let static_log = load_log(static_path, LogKind::Static, config.merge_mode(LogKind::Static))?;

  let comparison = compare(&runtime.mapping, &static_log.mapping);
  let metrics = Metrics::from_matrix(&comparison.matrix);

  Ok(Evaluation {
    runtime,
    static_log,
    comparison,
    metrics,
  })
}
