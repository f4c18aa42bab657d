//! Configuration for alias-eval.
//!
//! Config priority: `--config` path > `$ALIAS_EVAL_CONFIG` > `./alias-eval.toml` > defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{
  Error, Result,
  aggregate::{LogKind, MergeMode},
};

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "alias-eval.toml";

/// Environment variable naming a config file
pub const CONFIG_ENV_VAR: &str = "ALIAS_EVAL_CONFIG";

// ============================================================================
// Log Configuration
// ============================================================================

/// Per-log aggregation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
  /// How repeated identifiers are merged
  pub merge: MergeMode,
}

impl LogConfig {
  pub fn for_kind(kind: LogKind) -> Self {
    Self {
      merge: kind.default_merge_mode(),
    }
  }
}

fn runtime_log_config() -> LogConfig {
  LogConfig::for_kind(LogKind::Runtime)
}

fn static_log_config() -> LogConfig {
  LogConfig::for_kind(LogKind::Static)
}

// ============================================================================
// Report Configuration
// ============================================================================

/// Report rendering settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
  /// Decimal places for metrics
  pub decimals: usize,

  /// List false positive / false negative identifiers
  pub show_mismatches: bool,
}

impl Default for ReportConfig {
  fn default() -> Self {
    Self {
      decimals: 4,
      show_mismatches: false,
    }
  }
}

// ============================================================================
// Logging Configuration
// ============================================================================

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
  /// Log level: off, error, warn, info, debug, trace
  pub level: String,
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      level: "info".to_string(),
    }
  }
}

// ============================================================================
// Main Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  #[serde(default = "runtime_log_config")]
  pub runtime: LogConfig,

  #[serde(rename = "static", default = "static_log_config")]
  pub static_log: LogConfig,

  pub report: ReportConfig,

  pub logging: LoggingConfig,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      runtime: runtime_log_config(),
      static_log: static_log_config(),
      report: ReportConfig::default(),
      logging: LoggingConfig::default(),
    }
  }
}

impl Config {
  /// Load config for a run started in `cwd`.
  ///
  /// Returns the config and the file it came from, if any.
  pub fn load(cwd: &Path, explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
    let env_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    match Self::resolve_path(cwd, explicit, env_path) {
      Some(path) => {
        let config = Self::load_file(&path)?;
        Ok((config, Some(path)))
      }
      None => Ok((Self::default(), None)),
    }
  }

  /// Pick the config file to read, if any.
  ///
  /// Explicit and environment paths are returned even when missing so the
  /// caller reports them; the working-directory file only when it exists.
  pub fn resolve_path(cwd: &Path, explicit: Option<&Path>, env_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = explicit {
      return Some(path.to_path_buf());
    }

    if let Some(path) = env_path
      && !path.as_os_str().is_empty()
    {
      return Some(path);
    }

    let local = cwd.join(CONFIG_FILE_NAME);
    local.is_file().then_some(local)
  }

  /// Read and parse one config file.
  pub fn load_file(path: &Path) -> Result<Self> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::FileAccess {
      path: path.to_path_buf(),
      source,
    })?;
    toml::from_str(&content).map_err(|source| Error::Config {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Merge mode configured for a log kind.
  pub fn merge_mode(&self, kind: LogKind) -> MergeMode {
    match kind {
      LogKind::Runtime => self.runtime.merge,
      LogKind::Static => self.static_log.merge,
    }
  }
}
