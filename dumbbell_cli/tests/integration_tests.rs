//! Integration tests for the dumbbell binary.
//!
//! These tests verify end-to-end behavior including:
//! - Plan display and setting overrides
//! - Complete sessions recorded to history
//! - Interactive input handling (complete, skip, cancel)
//! - History and library listings

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory with an empty config file
fn setup_test_dir() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("config.toml"), "").expect("Failed to write config");
    temp_dir
}

/// Helper to get the CLI binary, isolated from the user's config and data
fn cli(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("dumbbell"));
    cmd.arg("--config")
        .arg(dir.join("config.toml"))
        .arg("--data-dir")
        .arg(dir.join("data"));
    cmd
}

fn read_history(dir: &Path) -> Vec<serde_json::Value> {
    let raw = fs::read_to_string(dir.join("data/workoutHistory.json"))
        .expect("Failed to read history");
    serde_json::from_str(&raw).expect("History is not a JSON list")
}

#[test]
fn test_cli_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("dumbbell"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Dumbbell workout planner and session tracker",
        ));
}

#[test]
fn test_plan_for_monday() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["plan", "--day", "monday"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monday workout"))
        .stdout(predicate::str::contains("Bicep Curls"))
        .stdout(predicate::str::contains("Zottman Curls"))
        .stdout(predicate::str::contains("25 lbs"))
        .stdout(predicate::str::contains("20 lbs"));
}

#[test]
fn test_plan_recovery_day_is_bodyweight() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["plan", "--day", "sunday"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Foam Rolling"))
        .stdout(predicate::str::contains("Bodyweight"))
        .stdout(predicate::str::contains("N/A"))
        .stdout(predicate::str::contains("25 lbs").not());
}

#[test]
fn test_plan_unknown_day_is_empty() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["plan", "--day", "caturday"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No exercises scheduled for 'caturday'"));
}

#[test]
fn test_plan_invalid_weight_falls_back_to_default() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["plan", "--day", "monday", "--weight", "heavy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("base 20 lbs"));
}

#[test]
fn test_plan_huge_weight_falls_back_to_default() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["plan", "--day", "tuesday", "--weight", "4294967295"])
        .assert()
        .success()
        .stdout(predicate::str::contains("base 20 lbs"));
}

#[test]
fn test_config_rejects_huge_weight() {
    let temp_dir = setup_test_dir();
    fs::write(
        temp_dir.path().join("config.toml"),
        "[workout]\nbase_weight = 4294967295\n",
    )
    .unwrap();

    cli(temp_dir.path())
        .args(["plan", "--day", "monday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("base_weight"));
}

#[test]
fn test_plan_with_overrides_and_instructions() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args([
            "plan",
            "--day",
            "monday",
            "--weight",
            "30",
            "--difficulty",
            "advanced",
            "--instructions",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Advanced"))
        // (30 + 5) * 1.2
        .stdout(predicate::str::contains("42 lbs"))
        .stdout(predicate::str::contains("elbows close to your torso"));
}

#[test]
fn test_config_sets_default_day() {
    let temp_dir = setup_test_dir();
    fs::write(
        temp_dir.path().join("config.toml"),
        "[workout]\nday = \"Tuesday\"\n",
    )
    .unwrap();

    cli(temp_dir.path())
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goblet Squats"));
}

#[test]
fn test_auto_complete_session_recorded() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["start", "--day", "monday", "--auto-complete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout complete"))
        .stdout(predicate::str::contains("Exercises: 4"))
        .stdout(predicate::str::contains("Sets: 4"));

    let history = read_history(temp_dir.path());
    assert_eq!(history.len(), 1);
    let record = &history[0];
    assert_eq!(record["day"], "Monday");
    assert_eq!(record["difficulty"], "Intermediate");
    assert_eq!(record["exercises"].as_array().unwrap().len(), 4);
    assert!(record["duration"].as_u64().is_some());
}

#[test]
fn test_sessions_append_to_history() {
    let temp_dir = setup_test_dir();

    for day in ["monday", "tuesday", "sunday"] {
        cli(temp_dir.path())
            .args(["start", "--day", day, "--auto-complete"])
            .assert()
            .success();
    }

    let history = read_history(temp_dir.path());
    let days: Vec<&str> = history.iter().map(|r| r["day"].as_str().unwrap()).collect();
    assert_eq!(days, vec!["Monday", "Tuesday", "Sunday"]);
}

#[test]
fn test_interactive_session_complete_and_skip() {
    let temp_dir = setup_test_dir();

    // Enter completes an exercise, "s" skips the rest that follows
    let input = "\ns\n".repeat(16);

    cli(temp_dir.path())
        .args(["start", "--day", "wednesday", "--rest", "90"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dumbbell Press"))
        .stdout(predicate::str::contains("Workout complete"));

    let history = read_history(temp_dir.path());
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["day"], "Wednesday");
}

#[test]
fn test_interactive_cancel_records_nothing() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["start", "--day", "friday"])
        .write_stdin("\ns\nq\ny\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout cancelled"));

    assert!(!temp_dir.path().join("data/workoutHistory.json").exists());
}

#[test]
fn test_start_rejects_invalid_rest() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["start", "--day", "monday", "--rest", "17", "--auto-complete"])
        .assert()
        .failure();

    assert!(!temp_dir.path().join("data/workoutHistory.json").exists());
}

#[test]
fn test_start_rejects_unknown_day() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["start", "--day", "caturday", "--auto-complete"])
        .assert()
        .failure();
}

#[test]
fn test_history_listing() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts recorded yet"));

    cli(temp_dir.path())
        .args(["start", "--day", "saturday", "--auto-complete"])
        .assert()
        .success();

    cli(temp_dir.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 workouts recorded"))
        .stdout(predicate::str::contains("Saturday"))
        .stdout(predicate::str::contains("Renegade Rows"));

    let output = cli(temp_dir.path())
        .args(["history", "--json"])
        .output()
        .unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(records.len(), 1);
}

#[test]
fn test_library_listing() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("library")
        .assert()
        .success()
        .stdout(predicate::str::contains("Chest"))
        .stdout(predicate::str::contains("Core"));

    cli(temp_dir.path())
        .args(["library", "legs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Calf Raises"))
        .stdout(predicate::str::contains("15-20 reps"));

    cli(temp_dir.path())
        .args(["library", "tail"])
        .assert()
        .failure();
}
