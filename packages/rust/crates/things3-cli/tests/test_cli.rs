//! End-to-end tests for the `things3` binary with a `sh` stub interpreter.

#![cfg(unix)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn write_settings(dir: &Path, program: &str) -> PathBuf {
    let path = dir.join("settings.yaml");
    let yaml = format!(
        "interpreter: sh\ninterpreter_args:\n  - \"-c\"\n  - {}\n  - stub\ntimeout_secs: 10\n",
        serde_json::to_string(program).unwrap()
    );
    std::fs::write(&path, yaml).unwrap();
    path
}

fn things3(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_things3"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_areas_printed_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_settings(dir.path(), r#"echo '[{"title":"Home"},{"title":"Work"}]'"#);

    let output = things3(&config, &["areas"]);
    assert!(output.status.success());

    let printed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        printed,
        serde_json::json!([{"title": "Home"}, {"title": "Work"}])
    );
}

#[test]
fn test_inbox_fills_missing_fields() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_settings(dir.path(), r#"echo '[{"title":"Buy milk"}]'"#);

    let output = things3(&config, &["inbox"]);
    assert!(output.status.success());

    let printed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed[0]["title"], "Buy milk");
    assert_eq!(printed[0]["due_date"], "");
    assert!(printed[0].get("start_date").is_none());
}

#[test]
fn test_mutation_prints_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_settings(dir.path(), "exit 0");

    let output = things3(
        &config,
        &["assign-project", "--task", "Buy milk", "--project", "Groceries"],
    );
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_failure_exits_non_zero_with_reason() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_settings(dir.path(), "echo 'Things3 got an error' >&2; exit 1");

    let output = things3(&config, &["set-tags", "--task", "Buy milk", "Errand"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to set tags"));
    assert!(stderr.contains("Things3 got an error"));
}

#[test]
fn test_print_script_does_not_run_interpreter() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_settings(dir.path(), "exit 7");

    let output = things3(
        &config,
        &["--print-script", "assign-area", "--task", r#"a "quoted" title"#, "--area", "Home"],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("todo.area = area;"));
    assert!(stdout.contains(r#"// argv: ["a \"quoted\" title","Home"]"#));
}
