//! Per-identifier verdict aggregation.
//!
//! A log may report the same identifier many times (the runtime checker fires
//! on every execution of an instrumented site). [`MergeMode`] decides how the
//! repeated observations collapse into a single verdict.

use std::{
  collections::BTreeMap,
  fmt,
  fs::File,
  io::{BufRead, BufReader},
  path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
  Error, Result,
  record::{Record, parse_line},
};

/// How repeated records for one identifier are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeMode {
  /// The most recent record overwrites earlier ones
  LastWins,
  /// A single alias observation (1) is sticky; everything else leaves the verdict alone
  AnyPositiveWins,
}

/// Which side of the comparison a log belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogKind {
  /// Observed during execution, treated as ground truth
  Runtime,
  /// Produced by the static analyzer
  #[default]
  Static,
}

impl LogKind {
  pub fn default_merge_mode(self) -> MergeMode {
    match self {
      LogKind::Runtime => MergeMode::AnyPositiveWins,
      LogKind::Static => MergeMode::LastWins,
    }
  }
}

impl fmt::Display for LogKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      LogKind::Runtime => f.write_str("Runtime"),
      LogKind::Static => f.write_str("Static"),
    }
  }
}

/// Identifier to verdict, one entry per distinct identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedMapping {
  verdicts: BTreeMap<u64, u64>,
}

impl AggregatedMapping {
  pub fn new() -> Self {
    Self::default()
  }

  /// Fold one record into the mapping under `mode`.
  pub fn insert(&mut self, record: Record, mode: MergeMode) {
    match mode {
      MergeMode::LastWins => {
        self.verdicts.insert(record.id, record.result);
      }
      MergeMode::AnyPositiveWins => {
        let verdict = self.verdicts.entry(record.id).or_insert(0);
        if record.result == 1 {
          *verdict = 1;
        }
      }
    }
  }

  pub fn get(&self, id: u64) -> Option<u64> {
    self.verdicts.get(&id).copied()
  }

  pub fn contains(&self, id: u64) -> bool {
    self.verdicts.contains_key(&id)
  }

  pub fn len(&self) -> usize {
    self.verdicts.len()
  }

  pub fn is_empty(&self) -> bool {
    self.verdicts.is_empty()
  }

  /// Iterate `(id, verdict)` in ascending identifier order.
  pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
    self.verdicts.iter().map(|(&id, &verdict)| (id, verdict))
  }
}

/// Build a mapping from an in-memory record sequence.
pub fn aggregate(records: impl IntoIterator<Item = Record>, mode: MergeMode) -> AggregatedMapping {
  let mut mapping = AggregatedMapping::new();
  for record in records {
    mapping.insert(record, mode);
  }
  mapping
}

/// Line counters for one scanned source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
  pub lines_scanned: usize,
  pub records_matched: usize,
}

/// Drain a reader, aggregating every line that carries a record.
///
/// Lines without a record are skipped. Invalid UTF-8 is decoded lossily so a
/// stray binary line never stops the scan.
pub fn aggregate_reader<R: BufRead>(
  mut reader: R,
  mode: MergeMode,
) -> std::io::Result<(AggregatedMapping, ScanStats)> {
  let mut mapping = AggregatedMapping::new();
  let mut stats = ScanStats::default();
  let mut buf = Vec::new();

  loop {
    buf.clear();
    if reader.read_until(b'\n', &mut buf)? == 0 {
      break;
    }
    stats.lines_scanned += 1;

    let line = String::from_utf8_lossy(&buf);
    if let Some(record) = parse_line(&line) {
      stats.records_matched += 1;
      mapping.insert(record, mode);
    }
  }

  Ok((mapping, stats))
}

/// A fully aggregated log file.
#[derive(Debug, Clone)]
pub struct LoadedLog {
  pub path: PathBuf,
  pub kind: LogKind,
  pub mode: MergeMode,
  pub mapping: AggregatedMapping,
  pub stats: ScanStats,
}

impl LoadedLog {
  /// Number of distinct identifiers in the log.
  pub fn unique_ids(&self) -> usize {
    self.mapping.len()
  }
}

/// Open, drain and close one log file.
pub fn load_log(path: &Path, kind: LogKind, mode: MergeMode) -> Result<LoadedLog> {
  debug!("Parsing {} log: {}", kind, path.display());

  let file = File::open(path).map_err(|source| Error::FileAccess {
    path: path.to_path_buf(),
    source,
  })?;

  let (mapping, stats) = aggregate_reader(BufReader::new(file), mode).map_err(|source| Error::Read {
    path: path.to_path_buf(),
    source,
  })?;

  debug!(
    lines = stats.lines_scanned,
    records = stats.records_matched,
    ?mode,
    "Scanned {} log",
    kind
  );
  debug!("Loaded {} unique IDs from {} log", mapping.len(), kind);

  Ok(LoadedLog {
    path: path.to_path_buf(),
    kind,
    mode,
    mapping,
    stats,
  })
}
