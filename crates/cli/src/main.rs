//! alias-eval - Score a static alias analysis against runtime observations

use std::path::{Path, PathBuf};

use alias_core::{Config, EvaluationReport, MarkdownReport, TextReport, evaluate};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

mod logging;

use logging::init_logging;

#[derive(Parser)]
#[command(name = "alias-eval")]
#[command(about = "Compare a runtime alias log (ground truth) with a static analyzer's log")]
#[command(version)]
#[command(after_help = "\
Both logs are scanned for lines containing `ID:<n> RES:<0|1>`; other lines are ignored.
Runtime IDs are aliases if any observation aliased; static IDs keep their last verdict.")]
struct Cli {
  /// Runtime log (ground truth)
  runtime_log: PathBuf,

  /// Static analyzer log (prediction)
  static_log: PathBuf,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,

  /// Config file (default: $ALIAS_EVAL_CONFIG or ./alias-eval.toml)
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Also write a JSON report
  #[arg(long, value_name = "FILE")]
  json: Option<PathBuf>,

  /// Also write a Markdown report
  #[arg(long, value_name = "FILE")]
  markdown: Option<PathBuf>,

  /// List false positive and false negative IDs
  #[arg(long)]
  show_mismatches: bool,

  /// Decimal places for metrics
  #[arg(long, value_name = "N")]
  decimals: Option<usize>,
}

fn main() -> Result<()> {
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(err) => {
      // Help and version go to stdout with status 0; usage errors exit 1
      let code = if err.use_stderr() { 1 } else { 0 };
      let _ = err.print();
      std::process::exit(code);
    }
  };

  let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
  let loaded = Config::load(&cwd, cli.config.as_deref());

  let log_level = match &loaded {
    Ok((config, _)) => config.logging.level.clone(),
    Err(_) => "info".to_string(),
  };
  init_logging(&log_level, cli.verbose);

  let (mut config, config_path) = loaded.context("Failed to load configuration")?;
  if let Some(path) = &config_path {
    info!("Using config: {}", path.display());
  }
  apply_overrides(&mut config, &cli);

  run(&cli.runtime_log, &cli.static_log, &config, cli.json.as_deref(), cli.markdown.as_deref())
}

/// Command-line flags take precedence over config values.
fn apply_overrides(config: &mut Config, cli: &Cli) {
  if cli.show_mismatches {
    config.report.show_mismatches = true;
  }
  if let Some(decimals) = cli.decimals {
    config.report.decimals = decimals;
  }
}

fn run(
  runtime_log: &Path,
  static_log: &Path,
  config: &Config,
  json: Option<&Path>,
  markdown: Option<&Path>,
) -> Result<()> {
  let evaluation = evaluate(runtime_log, static_log, config)?;

  print!("{}", TextReport::from_evaluation(&evaluation, &config.report));

  if let Some(path) = json {
    EvaluationReport::from_evaluation(&evaluation).save(path)?;
    info!("JSON report saved to: {}", path.display());
  }

  if let Some(path) = markdown {
    MarkdownReport::from_evaluation(&evaluation, &config.report).save(path)?;
    info!("Markdown report saved to: {}", path.display());
  }

  Ok(())
}
