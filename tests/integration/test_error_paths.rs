//! Error path integration tests.
//!
//! These tests verify that error conditions are handled correctly,
//! including validation failures, missing files, and invalid inputs.

use tempfile::TempDir;

use crate::helpers::{csvmill, write_csv};

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.csv");

    let result = csvmill()
        .args(["split", "-i", "/nonexistent/rows.csv", "-o"])
        .arg(&output)
        .args(["--filter", "a eq b"])
        .output()
        .expect("Failed to run csvmill");
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("does not exist"), "stderr: {stderr}");
}

#[test]
fn test_empty_input_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty.csv");
    std::fs::write(&input, "").unwrap();
    let output = dir.path().join("out.csv");

    let result = csvmill()
        .args(["split", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--filter", "a eq b"])
        .output()
        .expect("Failed to run csvmill");
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("empty"), "stderr: {stderr}");
}

#[test]
fn test_unknown_filter_column() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, "in.csv", &["Year,Make", "1997,Ford"]);
    let output = dir.path().join("out.csv");

    let result = csvmill()
        .args(["split", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--filter", "Price lt 5000"])
        .output()
        .expect("Failed to run csvmill");
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Price"), "stderr: {stderr}");
}

#[test]
fn test_ordering_filter_rejects_non_numeric_value() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, "in.csv", &["Make", "Ford"]);
    let output = dir.path().join("out.csv");

    let result = csvmill()
        .args(["split", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--filter", "Make lt Ford"])
        .output()
        .expect("Failed to run csvmill");
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Ford"), "stderr: {stderr}");
}

#[test]
fn test_ordering_filter_aborts_on_non_numeric_field() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, "in.csv", &["Price", "3000", "cheap", "4900"]);
    let output = dir.path().join("out.csv");

    let result = csvmill()
        .args(["split", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--filter", "Price lt 5000", "--threads", "2"])
        .output()
        .expect("Failed to run csvmill");
    assert!(!result.status.success());
}

#[test]
fn test_invalid_fraction_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, "in.csv", &["a", "1", "2"]);
    let output = dir.path().join("out.csv");

    for fraction in ["0", "1", "1.5", "-0.2"] {
        let result = csvmill()
            .args(["split", "-i"])
            .arg(&input)
            .arg("-o")
            .arg(&output)
            .args(["--fraction", fraction])
            .output()
            .expect("Failed to run csvmill");
        assert!(!result.status.success(), "fraction {fraction} should be rejected");
    }
}

#[test]
fn test_filter_and_fraction_conflict() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, "in.csv", &["a", "1"]);
    let output = dir.path().join("out.csv");

    let result = csvmill()
        .args(["split", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--filter", "a eq 1", "--fraction", "0.5"])
        .output()
        .expect("Failed to run csvmill");
    assert!(!result.status.success());
}

#[test]
fn test_split_requires_a_mode() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, "in.csv", &["a", "1"]);
    let output = dir.path().join("out.csv");

    let result = csvmill()
        .args(["split", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .output()
        .expect("Failed to run csvmill");
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("--filter or --fraction"), "stderr: {stderr}");
}

#[test]
fn test_malformed_filter_spec() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, "in.csv", &["a", "1"]);
    let output = dir.path().join("out.csv");

    for spec in ["a", "a badop 1", "a eq 1 NEITHER"] {
        let result = csvmill()
            .args(["split", "-i"])
            .arg(&input)
            .arg("-o")
            .arg(&output)
            .args(["--filter", spec])
            .output()
            .expect("Failed to run csvmill");
        assert!(!result.status.success(), "spec '{spec}' should be rejected");
    }
}

#[test]
fn test_keep_and_remove_columns_conflict() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, "in.csv", &["a,b", "1,2"]);
    let output = dir.path().join("out.csv");

    let result = csvmill()
        .args(["split", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--filter", "a eq 1", "--keep-column", "a", "--remove-column", "b"])
        .output()
        .expect("Failed to run csvmill");
    assert!(!result.status.success());
}

#[test]
fn test_onehot_missing_column() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, "in.csv", &["a,b", "1,2"]);
    let output = dir.path().join("out.csv");

    let result = csvmill()
        .args(["onehot", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--column", "c"])
        .output()
        .expect("Failed to run csvmill");
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains('c'), "stderr: {stderr}");
}

#[test]
fn test_analyze_negative_threshold() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, "in.csv", &["a", "1"]);
    let output = dir.path().join("report.txt");

    let result = csvmill()
        .args(["analyze", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--imbalance-threshold=-1")
        .output()
        .expect("Failed to run csvmill");
    assert!(!result.status.success());
}
