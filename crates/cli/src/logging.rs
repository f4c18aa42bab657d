//! Logging setup for the CLI

use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Parse log level from config string
fn parse_log_level(level: &str) -> Option<tracing::Level> {
  match level.to_lowercase().as_str() {
    "off" => None,
    "error" => Some(tracing::Level::ERROR),
    "warn" => Some(tracing::Level::WARN),
    "info" => Some(tracing::Level::INFO),
    "debug" => Some(tracing::Level::DEBUG),
    "trace" => Some(tracing::Level::TRACE),
    _ => Some(tracing::Level::INFO),
  }
}

/// Build the filter: `--verbose` wins over the config level, `RUST_LOG` over both.
fn build_filter(config_level: &str, verbose: bool) -> EnvFilter {
  let level = if verbose {
    LevelFilter::DEBUG
  } else {
    LevelFilter::from(parse_log_level(config_level))
  };

  EnvFilter::builder()
    .with_default_directive(level.into())
    .from_env_lossy()
}

/// Initialize console logging on stderr so stdout carries only the report
pub fn init_logging(config_level: &str, verbose: bool) {
  tracing_subscriber::fmt()
    .with_env_filter(build_filter(config_level, verbose))
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_log_level() {
    assert_eq!(parse_log_level("DEBUG"), Some(tracing::Level::DEBUG));
    assert_eq!(parse_log_level("warn"), Some(tracing::Level::WARN));
    assert_eq!(parse_log_level("off"), None);
    assert_eq!(parse_log_level("loud"), Some(tracing::Level::INFO));
  }
}
