//! Configuration integration tests.
//!
//! These tests verify config discovery, format parsing, and precedence
//! from an end-to-end perspective using the compiled binary. Tests use
//! `info --json` to assert actual config values, not just process success.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// Run `info --json` from a directory and parse the JSON output.
fn info_json(dir: &std::path::Path) -> Value {
    let output = cmd()
        .args(["-C", dir.to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

// =============================================================================
// Discovery and Precedence
// =============================================================================

/// Write a config file, creating parent directories as needed.
fn write_config(path: &std::path::Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

#[test]
fn defaults_without_config_file() {
    let tmp = TempDir::new().unwrap();
    let json = info_json(tmp.path());

    assert!(json["config"]["config_file"].is_null());
    assert_eq!(json["config"]["reading_wpm"], 225);
    assert_eq!(json["config"]["max_input_bytes"], 5 * 1024 * 1024);
}

#[test]
fn finds_config_in_parent_directory() {
    let tmp = TempDir::new().unwrap();
    write_config(&tmp.path().join("textstat.yaml"), "reading_wpm: 150
");
    let nested = tmp.path().join("notes/drafts");
    fs::create_dir_all(&nested).unwrap();

    let json = info_json(&nested);

    assert_eq!(json["config"]["reading_wpm"], 150);
    assert!(
        json["config"]["config_file"]
            .as_str()
            .is_some_and(|path| path.ends_with("textstat.yaml"))
    );
}

#[test]
fn nearest_directory_wins() {
    let tmp = TempDir::new().unwrap();
    write_config(&tmp.path().join(".textstat.toml"), "reading_wpm = 100
");
    let child = tmp.path().join("child");
    write_config(&child.join(".textstat.toml"), "reading_wpm = 300
");

    assert_eq!(info_json(&child)["config"]["reading_wpm"], 300);
}

#[test]
fn regular_name_beats_dotfile() {
    let tmp = TempDir::new().unwrap();
    write_config(&tmp.path().join(".textstat.toml"), "max_input_bytes = 100
");
    write_config(&tmp.path().join("textstat.toml"), "max_input_bytes = 200
");

    assert_eq!(info_json(tmp.path())["config"]["max_input_bytes"], 200);
}

#[test]
fn git_boundary_stops_search() {
    let tmp = TempDir::new().unwrap();
    write_config(&tmp.path().join(".textstat.toml"), "reading_wpm = 60
");
    let repo = tmp.path().join("repo");
    fs::create_dir_all(repo.join(".git")).unwrap();

    let json = info_json(&repo);

    assert_eq!(json["config"]["reading_wpm"], 225);
    assert!(json["config"]["config_file"].is_null());
}

#[test]
fn json_config_is_read() {
    let tmp = TempDir::new().unwrap();
    write_config(
        &tmp.path().join(".textstat.json"),
        r#"{"reading_wpm": 90, "max_input_bytes": 4096}"#,
    );

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["reading_wpm"], 90);
    assert_eq!(json["config"]["max_input_bytes"], 4096);
}

#[test]
fn explicit_config_beats_project_config() {
    let tmp = TempDir::new().unwrap();
    write_config(&tmp.path().join(".textstat.toml"), "reading_wpm = 60
");
    let explicit = tmp.path().join("elsewhere/custom.toml");
    write_config(&explicit, "reading_wpm = 400
");

    let output = cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .args(["--config", explicit.to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["reading_wpm"], 400);
}

#[test]
fn environment_beats_config_file() {
    let tmp = TempDir::new().unwrap();
    write_config(&tmp.path().join(".textstat.toml"), "reading_wpm = 60
");

    let output = cmd()
        .env("TEXTSTAT_READING_WPM", "250")
        .args(["-C", tmp.path().to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["reading_wpm"], 250);
}

#[test]
fn invalid_config_value_fails() {
    let tmp = TempDir::new().unwrap();
    write_config(&tmp.path().join(".textstat.toml"), r#"reading_wpm = "fast""#);

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

// =============================================================================
// Reading Rate
// =============================================================================

/// Run `stats --json` on `text` from a directory and parse the JSON output.
fn stats_json(dir: &std::path::Path, text: &str, extra: &[&str]) -> Value {
    let output = cmd()
        .args(["-C", dir.to_str().unwrap(), "stats", "--json"])
        .args(extra)
        .write_stdin(text)
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

#[test]
fn reading_rate_from_config_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".textstat.toml"), "reading_wpm = 60\n").unwrap();

    assert_eq!(info_json(tmp.path())["config"]["reading_wpm"], 60);
    let json = stats_json(tmp.path(), "one two three", &[]);
    assert_eq!(json["reading_time_seconds"], 3);
}

#[test]
fn wpm_flag_overrides_config_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".textstat.toml"), "reading_wpm = 60\n").unwrap();

    let json = stats_json(tmp.path(), "one two three", &["--wpm", "180"]);
    assert_eq!(json["reading_time_seconds"], 1);
}

#[test]
fn reading_rate_from_environment() {
    let tmp = TempDir::new().unwrap();
    let output = cmd()
        .env("TEXTSTAT_READING_WPM", "30")
        .args(["-C", tmp.path().to_str().unwrap(), "stats", "--json"])
        .write_stdin("one")
        .output()
        .expect("failed to run command");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["reading_time_seconds"], 2);
}

#[test]
fn input_limit_from_config_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".textstat.toml"), "max_input_bytes = 8\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "stats"])
        .write_stdin("this is longer than eight bytes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

#[test]
fn disabled_input_limit_is_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".textstat.toml"),
        "max_input_bytes = 8\ndisable_input_limit = true\n",
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert!(json["config"]["max_input_bytes"].is_null());
    let json = stats_json(tmp.path(), "this is longer than eight bytes", &[]);
    assert_eq!(json["words"], 6);
}
