//! Integration tests for the analyze command.

use tempfile::TempDir;

use crate::helpers::{csvmill, write_csv};

#[test]
fn test_analyze_full_report() {
    let dir = TempDir::new().unwrap();
    // "leak" mirrors the label 1:1; "constant" is single-valued; "flag" is
    // heavily imbalanced (9:1 with threshold 0.5).
    let mut rows = vec!["id,leak,constant,flag,label".to_string()];
    for i in 0..10 {
        let label = if i % 2 == 0 { "yes" } else { "no" };
        let leak = if i % 2 == 0 { "Y" } else { "N" };
        let flag = if i == 0 { "rare" } else { "common" };
        rows.push(format!("{i},{leak},same,{flag},{label}"));
    }
    let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    let input = write_csv(&dir, "train.csv", &refs);
    let report = dir.path().join("report.txt");

    let status = csvmill()
        .args(["analyze", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&report)
        .args(["--label", "label", "--threads", "2"])
        .status()
        .expect("Failed to run csvmill");
    assert!(status.success());

    let text = std::fs::read_to_string(&report).unwrap();
    assert!(text.contains("## Columns matching label 'label' 1:1"));
    assert!(text.lines().any(|l| l == "leak"));
    // id maps each value to one label but labels repeat across values.
    assert!(!text.lines().any(|l| l == "id"));
    assert!(text.lines().any(|l| l == "constant"));
    assert!(text.contains("flag: value 'rare' count 1 vs max 9"));
    assert!(text.contains("### label"));
    assert!(text.contains("yes,5"));
    assert!(text.contains("no,5"));
}

#[test]
fn test_analyze_without_label_skips_leakage_section() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, "rows.csv", &["a,b", "1,x", "2,y"]);
    let report = dir.path().join("report.txt");

    let status = csvmill()
        .args(["analyze", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&report)
        .args(["--threads", "1"])
        .status()
        .expect("Failed to run csvmill");
    assert!(status.success());

    let text = std::fs::read_to_string(&report).unwrap();
    assert!(!text.contains("possible leakage"));
    assert!(text.contains("## Value counts (descending)"));
}

#[test]
fn test_analyze_custom_threshold() {
    let dir = TempDir::new().unwrap();
    // 6 vs 4: flagged when 4 * (1 + t) < 6. The default t = 0.5 leaves the
    // column alone (4 * 1.5 = 6, not below); t = 0.25 flags it.
    let mut rows = vec!["flag".to_string()];
    rows.extend(std::iter::repeat_n("a".to_string(), 6));
    rows.extend(std::iter::repeat_n("b".to_string(), 4));
    let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    let input = write_csv(&dir, "rows.csv", &refs);

    for (threshold, flagged) in [("0.5", false), ("0.25", true)] {
        let report = dir.path().join(format!("report-{threshold}.txt"));
        let status = csvmill()
            .args(["analyze", "-i"])
            .arg(&input)
            .arg("-o")
            .arg(&report)
            .args(["--imbalance-threshold", threshold, "--threads", "1"])
            .status()
            .expect("Failed to run csvmill");
        assert!(status.success());

        let text = std::fs::read_to_string(&report).unwrap();
        assert_eq!(text.contains("flag: value 'b' count 4 vs max 6"), flagged);
    }
}
