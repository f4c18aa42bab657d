//! Report generation for evaluation results.
//!
//! - Text: console summary printed on every run
//! - JSON: machine-readable record of the run
//! - Markdown: human-readable tables for sharing

mod json;
mod markdown;
mod text;

use std::path::Path;

pub use json::{EvaluationReport, LogSummary, ReportMetadata};
pub use markdown::MarkdownReport;
pub use text::TextReport;

use crate::{Error, Result};

/// Write a rendered report to disk.
fn write_report(path: &Path, content: &str) -> Result<()> {
  std::fs::write(path, content).map_err(|source| Error::ReportWrite {
    path: path.to_path_buf(),
    source,
  })
}

/// Format a metric with a fixed number of decimals.
fn format_metric(value: f64, decimals: usize) -> String {
  format!("{:.*}", decimals, value)
}
