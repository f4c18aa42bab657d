//! Line-level record extraction.
//!
//! Both logs share one grammar: somewhere on the line an `ID:<digits>` field,
//! then whitespace, then `RES:<digits>`. Anything else on the line is ignored,
//! which lets the runtime logger append the compared addresses.

use std::sync::LazyLock;

use regex::Regex;

static RECORD_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"ID:(\d+)\s+RES:(\d+)").expect("record pattern is a valid regex"));

/// One alias judgment pulled from a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Record {
  pub id: u64,
  /// Usually 0 (no alias) or 1 (alias); other values are kept opaque
  pub result: u64,
}

impl Record {
  pub fn new(id: u64, result: u64) -> Self {
    Self { id, result }
  }
}

/// Extract a record from a line, or `None` if the line has no record.
///
/// Digit runs too large for `u64` are treated as a non-match.
pub fn parse_line(line: &str) -> Option<Record> {
  let caps = RECORD_PATTERN.captures(line)?;
  let id = caps.get(1)?.as_str().parse().ok()?;
  let result = caps.get(2)?.as_str().parse().ok()?;
  Some(Record { id, result })
}
