//! Integration tests for the `roguewatch` binary.
//!
//! Every scan comes from captured `netsh` dumps under `tests/fixtures`, so
//! the suite runs on any host.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Build a command for the `roguewatch` binary with env isolation.
///
/// Config and data directories point into `home`, and every
/// `ROGUEWATCH_*` override is cleared, so tests never touch the user's
/// real configuration or baseline.
fn roguewatch_cmd(home: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("roguewatch");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("ROGUEWATCH_CONFIG")
        .env_remove("ROGUEWATCH_INTERVAL_SECS")
        .env_remove("ROGUEWATCH_SCAN_TIMEOUT_SECS")
        .env_remove("ROGUEWATCH_SIMILARITY_THRESHOLD")
        .env_remove("ROGUEWATCH_LEARN")
        .env_remove("ROGUEWATCH_BASELINE_PATH")
        .env_remove("ROGUEWATCH_ALERT_COOLDOWN_SECS")
        .env_remove("ROGUEWATCH_WARMUP");
    cmd
}

/// A command replaying the connected interface plus the given scan, with
/// the baseline kept inside `home`.
fn replay_cmd(home: &TempDir, scan: &str) -> assert_cmd::Command {
    let mut cmd = roguewatch_cmd(home);
    cmd.arg("--baseline")
        .arg(baseline_path(home))
        .arg("--interfaces-file")
        .arg(fixture("interfaces_corp.txt"))
        .arg("--scan-file")
        .arg(fixture(scan));
    cmd
}

fn baseline_path(home: &TempDir) -> PathBuf {
    home.path().join("baseline")
}

fn learn_corp(home: &TempDir) {
    replay_cmd(home, "scan_clean.txt")
        .args(["--setup", "--once"])
        .assert()
        .success();
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    let home = TempDir::new().unwrap();
    roguewatch_cmd(&home).arg("--help").assert().success().stdout(
        predicate::str::contains("--interval")
            .and(predicate::str::contains("--once"))
            .and(predicate::str::contains("--setup")),
    );
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    roguewatch_cmd(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("roguewatch"));
}

#[test]
fn test_completions_zsh() {
    let home = TempDir::new().unwrap();
    roguewatch_cmd(&home)
        .args(["--completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Setup ───────────────────────────────────────────────────────────

#[test]
fn test_setup_once_writes_baseline() {
    let home = TempDir::new().unwrap();
    replay_cmd(&home, "scan_clean.txt")
        .args(["--setup", "--once"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Trusted SSID: CorpWiFi")
                .and(predicate::str::contains("Known BSSIDs: 2")),
        );

    let saved = std::fs::read_to_string(baseline_path(&home)).unwrap();
    assert_eq!(saved, "CorpWiFi\nAA:BB:CC:DD:EE:01\nAA:BB:CC:DD:EE:02\n");
}

#[test]
fn test_setup_without_connection_adopts_first_network() {
    let home = TempDir::new().unwrap();
    roguewatch_cmd(&home)
        .arg("--baseline")
        .arg(baseline_path(&home))
        .arg("--scan-file")
        .arg(fixture("scan_clean.txt"))
        .args(["--setup", "--once", "--output", "json"])
        .assert()
        .success();

    let saved = std::fs::read_to_string(baseline_path(&home)).unwrap();
    assert!(saved.starts_with("CorpWiFi\n"), "baseline was:\n{saved}");
}

#[test]
fn test_setup_with_nothing_visible_leaves_baseline_alone() {
    let home = TempDir::new().unwrap();
    let empty = home.path().join("empty.txt");
    std::fs::write(&empty, "There are 0 networks currently visible.\n").unwrap();

    roguewatch_cmd(&home)
        .arg("--baseline")
        .arg(baseline_path(&home))
        .arg("--scan-file")
        .arg(&empty)
        .args(["--setup", "--once"])
        .assert()
        .success()
        .stderr(predicate::str::contains("baseline left unchanged"));
    assert!(!baseline_path(&home).exists());
}

// ── Single cycle ────────────────────────────────────────────────────

#[test]
fn test_once_without_baseline_hints_at_setup() {
    let home = TempDir::new().unwrap();
    replay_cmd(&home, "scan_attack.txt")
        .arg("--once")
        .assert()
        .success()
        .stderr(predicate::str::contains("--setup --once"));
}

#[test]
fn test_once_json_without_baseline_skips_cycle() {
    let home = TempDir::new().unwrap();
    replay_cmd(&home, "scan_attack.txt")
        .args(["--once", "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--setup --once"));
    assert!(!baseline_path(&home).exists());
}

#[test]
fn test_once_clean_scan_reports_nothing() {
    let home = TempDir::new().unwrap();
    learn_corp(&home);

    replay_cmd(&home, "scan_clean.txt")
        .arg("--once")
        .assert()
        .success()
        .stdout(predicate::str::contains("No threats detected (2 networks scanned)."));
}

#[test]
fn test_once_detects_rogue_and_look_alike() {
    let home = TempDir::new().unwrap();
    learn_corp(&home);

    let output = replay_cmd(&home, "scan_attack.txt").arg("--once").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Found unknown AP: SSID CorpWiFi with BSSID DE:AD:BE:EF:00:01"),
        "stdout was:\n{stdout}"
    );
    assert!(
        stdout.contains("Found similar SSID: 'CorpWifi' (similar to 'CorpWiFi')"),
        "stdout was:\n{stdout}"
    );
    assert!(!stdout.contains("Starbucks"), "stdout was:\n{stdout}");
    assert!(!stdout.contains("66:55:44:33:22:11"), "stdout was:\n{stdout}");
    assert!(stdout.contains("2 finding(s)"), "stdout was:\n{stdout}");
}

#[test]
fn test_once_json_report() {
    let home = TempDir::new().unwrap();
    learn_corp(&home);

    let output = replay_cmd(&home, "scan_attack.txt")
        .args(["--once", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["connected"], "CorpWiFi");
    assert_eq!(report["baseline_changed"], false);
    let events = report["events"].as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["kind"], "rogue_bssid");
    assert_eq!(events[0]["bssid"], "DE:AD:BE:EF:00:01");
    assert_eq!(events[0]["source"], "scan");
    assert_eq!(events[1]["kind"], "similar_ssid");
    assert_eq!(events[1]["observed"], "CorpWifi");
}

#[test]
fn test_learning_cycle_does_not_trust_scan_rogues() {
    let home = TempDir::new().unwrap();
    learn_corp(&home);
    let before = std::fs::read_to_string(baseline_path(&home)).unwrap();

    replay_cmd(&home, "scan_attack.txt")
        .env("ROGUEWATCH_LEARN", "true")
        .args(["--once", "--quiet"])
        .assert()
        .success();

    let after = std::fs::read_to_string(baseline_path(&home)).unwrap();
    assert_eq!(after, before);
}

#[test]
fn test_quiet_suppresses_stdout() {
    let home = TempDir::new().unwrap();
    learn_corp(&home);
    replay_cmd(&home, "scan_attack.txt")
        .args(["--once", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn test_write_config_then_load_it() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("rw.toml");

    roguewatch_cmd(&home)
        .arg("--config")
        .arg(&config)
        .args(["--write-config", "--interval", "30", "--cooldown", "600"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let text = std::fs::read_to_string(&config).unwrap();
    assert!(text.contains("interval_secs = 30"), "config was:\n{text}");
    assert!(text.contains("alert_cooldown_secs = 600"), "config was:\n{text}");
    assert!(!text.contains("learn = true"), "config was:\n{text}");
}

#[test]
fn test_env_threshold_override_is_validated() {
    let home = TempDir::new().unwrap();
    let output = replay_cmd(&home, "scan_clean.txt")
        .env("ROGUEWATCH_SIMILARITY_THRESHOLD", "7")
        .arg("--once")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("similarity_threshold"));
}

#[test]
fn test_invalid_threshold_flag() {
    let home = TempDir::new().unwrap();
    let output = replay_cmd(&home, "scan_clean.txt")
        .args(["--once", "--threshold", "1.5"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(text.contains("similarity_threshold"), "output was:\n{text}");
}

#[test]
fn test_malformed_config_file() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("bad.toml");
    std::fs::write(&config, "interval_secs = \"often\"\n").unwrap();

    let output = replay_cmd(&home, "scan_clean.txt")
        .arg("--config")
        .arg(&config)
        .arg("--once")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(combined_output(&output).contains("configuration"));
}

#[test]
fn test_invalid_output_format() {
    let home = TempDir::new().unwrap();
    let output = roguewatch_cmd(&home)
        .args(["--output", "yaml", "--once"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(text.contains("invalid value"), "output was:\n{text}");
}

#[test]
fn test_zero_interval_rejected() {
    let home = TempDir::new().unwrap();
    roguewatch_cmd(&home)
        .args(["--interval", "0", "--once"])
        .assert()
        .failure()
        .code(2);
}
