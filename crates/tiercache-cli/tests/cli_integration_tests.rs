//! CLI Integration Tests
//!
//! Tests for `tiercache` CLI commands using `assert_cmd`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get the CLI binary command
#[allow(deprecated)]
fn tiercache_cmd() -> Command {
    let mut cmd = Command::cargo_bin("tiercache").unwrap();
    cmd.env_remove("TIERCACHE_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// Help & Version Tests
// =============================================================================

#[test]
fn test_help_displays_usage() {
    tiercache_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("TierCache CLI"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_displays_version() {
    tiercache_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tiercache"));
}

#[test]
fn test_invalid_command_shows_error() {
    tiercache_cmd()
        .arg("invalid_command_xyz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// =============================================================================
// Demo Tests
// =============================================================================

#[test]
fn test_demo_prints_reference_output() {
    let temp_dir = TempDir::new().unwrap();

    tiercache_cmd()
        .current_dir(temp_dir.path())
        .arg("demo")
        .assert()
        .success()
        .stdout("Get A: 1\nGet C: 3\nL1 Cache: [A: 1, D: 4, C: 3]\nL2 Cache: []\n");
}

// =============================================================================
// Run Tests
// =============================================================================

#[test]
fn test_run_script() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_file(
        &temp_dir,
        "script.txt",
        "# two levels\nadd-level 2 LRU\nadd-level 2 LFU\n\nput A 1\nget A\nget Z\ndisplay\n",
    );

    tiercache_cmd()
        .current_dir(temp_dir.path())
        .arg("run")
        .arg(&script)
        .assert()
        .success()
        .stdout("Get A: 1\nGet Z: null\nL1 Cache: [A: 1]\nL2 Cache: []\n");
}

#[test]
fn test_run_script_with_config_levels() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_file(
        &temp_dir,
        "levels.toml",
        "[[levels]]\ncapacity = 1\npolicy = \"LRU\"\n\n[logging]\nlevel = \"error\"\n",
    );
    let script = write_file(&temp_dir, "script.txt", "put A 1\nput B 2\ndisplay\n");

    tiercache_cmd()
        .current_dir(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .arg("run")
        .arg(&script)
        .assert()
        .success()
        .stdout("L1 Cache: [B: 2]\n");
}

#[test]
fn test_run_script_reports_out_of_range() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_file(&temp_dir, "script.txt", "add-level 2 LRU\nremove-level 1\n");

    tiercache_cmd()
        .current_dir(temp_dir.path())
        .arg("run")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("script.txt:2"))
        .stderr(predicate::str::contains("TIER-002"));
}

#[test]
fn test_run_script_reports_negative_index_as_out_of_range() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_file(
        &temp_dir,
        "script.txt",
        "add-level 2 LRU\nremove-level -1\n",
    );

    tiercache_cmd()
        .current_dir(temp_dir.path())
        .arg("run")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("script.txt:2"))
        .stderr(predicate::str::contains("TIER-002"))
        .stderr(predicate::str::contains("Cache level -1 does not exist"));
}

#[test]
fn test_run_script_reports_unknown_policy() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_file(&temp_dir, "script.txt", "add-level 2 MRU\n");

    tiercache_cmd()
        .current_dir(temp_dir.path())
        .arg("run")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("TIER-001"));
}

#[test]
fn test_run_missing_script() {
    let temp_dir = TempDir::new().unwrap();

    tiercache_cmd()
        .current_dir(temp_dir.path())
        .arg("run")
        .arg(temp_dir.path().join("missing.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read script"));
}

#[test]
fn test_invalid_config_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_file(
        &temp_dir,
        "bad.toml",
        "[[levels]]\ncapacity = 0\npolicy = \"LRU\"\n",
    );

    tiercache_cmd()
        .current_dir(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .arg("demo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("levels[0].capacity"));
}
