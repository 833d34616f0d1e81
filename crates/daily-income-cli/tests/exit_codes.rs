//! Exit code integration tests
//!
//! ## Exit Code Contract
//!
//! | Exit Code | Meaning |
//! |-----------|---------|
//! | 0 | Workbook written |
//! | 1 | Invalid month/year, render or write failure |
//! | 2 | Usage error (missing or non-numeric arguments) |

use std::path::Path;
use std::process::{Command, Output};

fn run(args: &[&str], output_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_daily_income"))
        .args(args)
        .arg("--output")
        .arg(output_dir)
        .output()
        .expect("failed to execute daily_income")
}

// =============================================================================
// Success
// =============================================================================

#[test]
fn exit_0_writes_named_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["3", "2025"], dir.path());

    assert_eq!(output.status.code(), Some(0));
    assert!(dir.path().join("Daily Income Mar.2025.xlsx").is_file());
}

#[test]
fn exit_0_default_output_is_current_directory() {
    let dir = tempfile::tempdir().unwrap();
    let status = Command::new(env!("CARGO_BIN_EXE_daily_income"))
        .args(["2", "2024"])
        .current_dir(dir.path())
        .status()
        .expect("failed to execute daily_income");

    assert_eq!(status.code(), Some(0));
    assert!(dir.path().join("Daily Income Feb.2024.xlsx").is_file());
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn exit_1_invalid_month() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["13", "2025"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid month 13"), "stderr: {stderr}");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn exit_1_year_outside_excel_range() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["1", "1850"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn exit_1_missing_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["5", "2025"], &dir.path().join("missing"));

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Daily Income May.2025.xlsx"), "stderr: {stderr}");
}

#[test]
fn exit_2_non_numeric_month() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["March", "2025"], dir.path());

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn exit_2_missing_year() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["3"], dir.path());

    assert_eq!(output.status.code(), Some(2));
}
