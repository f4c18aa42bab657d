// End-to-end tests for the `alias-eval` binary.
// Run with: cargo test -p alias-cli --test cli_tests

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn alias_eval(cwd: &Path, args: &[&str]) -> Output {
  Command::new(env!("CARGO_BIN_EXE_alias-eval"))
    .current_dir(cwd)
    .env_remove("ALIAS_EVAL_CONFIG")
    .env_remove("RUST_LOG")
    .args(args)
    .output()
    .expect("run alias-eval")
}

fn write_log(dir: &Path, name: &str, lines: &[&str]) -> String {
  let path = dir.join(name);
  std::fs::write(&path, lines.join("\n")).unwrap();
  path.to_string_lossy().into_owned()
}

fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_reference_report() {
  let temp = TempDir::new().unwrap();
  let runtime = write_log(
    temp.path(),
    "runtime.log",
    &["ID:1 RES:1 (0x10 vs 0x10)", "ID:1 RES:0 (0x10 vs 0x20)", "garbage text no pattern", "ID:2 RES:0"],
  );
  let static_log = write_log(temp.path(), "static.log", &["ID:1 RES:1", "ID:2 RES:1"]);

  let output = alias_eval(temp.path(), &[&runtime, &static_log]);
  assert_eq!(output.status.code(), Some(0));

  let out = stdout(&output);
  assert!(out.contains("Loaded 2 unique IDs from Runtime log."));
  assert!(out.contains("Loaded 2 unique IDs from Static log."));
  assert!(out.contains("Analyzing 2 common IDs..."));
  assert!(out.contains("True Positives  (Both Alias):    1"));
  assert!(out.contains("False Positives (Static Over):   1 (Imprecision)"));
  assert!(out.contains("False Negatives (Static Under):  0 (Unsoundness/Bug)"));
  assert!(out.contains("Accuracy:  0.5000"));
  assert!(out.contains("F1 Score:  0.6667"));
}

#[test]
fn test_no_intersection_exits_zero() {
  let temp = TempDir::new().unwrap();
  let runtime = write_log(temp.path(), "runtime.log", &["ID:1 RES:1"]);
  let static_log = write_log(temp.path(), "static.log", &["ID:2 RES:1"]);

  let output = alias_eval(temp.path(), &[&runtime, &static_log]);
  assert_eq!(output.status.code(), Some(0));
  assert!(stdout(&output).contains("No intersection found between logs."));
  assert!(!stdout(&output).contains("Accuracy"));
}

#[test]
fn test_missing_log_exits_one() {
  let temp = TempDir::new().unwrap();
  let static_log = write_log(temp.path(), "static.log", &["ID:1 RES:1"]);

  let output = alias_eval(temp.path(), &["does-not-exist.log", &static_log]);
  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("does-not-exist.log"));
}

#[test]
fn test_bad_usage_exits_one() {
  let temp = TempDir::new().unwrap();

  let output = alias_eval(temp.path(), &[]);
  assert_eq!(output.status.code(), Some(1));

  let output = alias_eval(temp.path(), &["only-one.log"]);
  assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_help_exits_zero() {
  let temp = TempDir::new().unwrap();
  let output = alias_eval(temp.path(), &["--help"]);
  assert_eq!(output.status.code(), Some(0));
  assert!(stdout(&output).contains("RUNTIME_LOG"));
}

#[test]
fn test_report_files_and_local_config() {
  let temp = TempDir::new().unwrap();
  std::fs::write(
    temp.path().join("alias-eval.toml"),
    "[report]\ndecimals = 2\nshow_mismatches = true\n",
  )
  .unwrap();
  let runtime = write_log(temp.path(), "runtime.log", &["ID:1 RES:1", "ID:2 RES:1", "ID:3 RES:0"]);
  let static_log = write_log(temp.path(), "static.log", &["ID:1 RES:1", "ID:2 RES:0", "ID:3 RES:0"]);

  let json = temp.path().join("report.json");
  let markdown = temp.path().join("report.md");
  let output = alias_eval(
    temp.path(),
    &[
      &runtime,
      &static_log,
      "--json",
      json.to_str().unwrap(),
      "--markdown",
      markdown.to_str().unwrap(),
    ],
  );
  assert_eq!(output.status.code(), Some(0));

  let out = stdout(&output);
  assert!(out.contains("Recall:    0.50"));
  assert!(out.contains("False Negative IDs: 2"));

  let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
  assert_eq!(value["comparison"]["matrix"]["false_negatives"], 1);
  assert!(std::fs::read_to_string(&markdown).unwrap().contains("## Metrics"));
}

#[test]
fn test_invalid_config_exits_one() {
  let temp = TempDir::new().unwrap();
  let config = write_log(temp.path(), "bad.toml", &["[runtime]", "merge = \"sometimes\""]);
  let runtime = write_log(temp.path(), "runtime.log", &["ID:1 RES:1"]);
  let static_log = write_log(temp.path(), "static.log", &["ID:1 RES:1"]);

  let output = alias_eval(temp.path(), &["--config", &config, &runtime, &static_log]);
  assert_eq!(output.status.code(), Some(1));
}
