//! Integration tests for the merge command.

use tempfile::TempDir;

use crate::helpers::{csvmill, header_of, sorted, sorted_data_rows, write_csv};

#[test]
fn test_merge_basic() {
    let dir = TempDir::new().unwrap();
    let first = write_csv(&dir, "a.csv", &["Year,Make,Price", "1997,Ford,3000", "1999,Chevy,4900"]);
    let second = write_csv(&dir, "b.csv", &["Year,Make,Price", "2001,Audi,21000"]);
    let output = dir.path().join("merged.csv");

    let status = csvmill()
        .args(["merge", "-i"])
        .arg(&first)
        .arg("--input-second")
        .arg(&second)
        .arg("-o")
        .arg(&output)
        .args(["--threads", "2"])
        .status()
        .expect("Failed to run csvmill");
    assert!(status.success());

    assert_eq!(header_of(&output), "Year,Make,Price");
    assert_eq!(
        sorted_data_rows(&output),
        sorted(&["1997,Ford,3000", "1999,Chevy,4900", "2001,Audi,21000"])
    );
}

// The second file's columns are resolved by name against its own header, so
// a different column order still lines up with the first file's layout.
#[test]
fn test_merge_resolves_columns_per_file() {
    let dir = TempDir::new().unwrap();
    let first = write_csv(&dir, "a.csv", &["Year,Make,Price", "1997,Ford,3000"]);
    let second = write_csv(&dir, "b.csv", &["Make,Year,Price,Notes", "Audi,2001,21000,clean"]);
    let output = dir.path().join("merged.csv");

    let status = csvmill()
        .args(["merge", "-i"])
        .arg(&first)
        .arg("--input-second")
        .arg(&second)
        .arg("-o")
        .arg(&output)
        .args(["--keep-column", "Year", "--keep-column", "Price", "--threads", "1"])
        .status()
        .expect("Failed to run csvmill");
    assert!(status.success());

    assert_eq!(header_of(&output), "Year,Price");
    assert_eq!(sorted_data_rows(&output), sorted(&["1997,3000", "2001,21000"]));
}

#[test]
fn test_merge_header_mismatch_fails() {
    let dir = TempDir::new().unwrap();
    let first = write_csv(&dir, "a.csv", &["Year,Make", "1997,Ford"]);
    let second = write_csv(&dir, "b.csv", &["Color,Shape", "red,round"]);
    let output = dir.path().join("merged.csv");

    let status = csvmill()
        .args(["merge", "-i"])
        .arg(&first)
        .arg("--input-second")
        .arg(&second)
        .arg("-o")
        .arg(&output)
        .status()
        .expect("Failed to run csvmill");
    assert!(!status.success());
}

#[test]
fn test_merge_strips_quotes() {
    let dir = TempDir::new().unwrap();
    let first = write_csv(&dir, "a.csv", &["\"Year\",Make", "\"1997\",Ford"]);
    let second = write_csv(&dir, "b.csv", &["Year,'Make'", "2001,'Audi'"]);
    let output = dir.path().join("merged.csv");

    let status = csvmill()
        .args(["merge", "-i"])
        .arg(&first)
        .arg("--input-second")
        .arg(&second)
        .arg("-o")
        .arg(&output)
        .args(["--threads", "1"])
        .status()
        .expect("Failed to run csvmill");
    assert!(status.success());

    assert_eq!(header_of(&output), "Year,Make");
    assert_eq!(sorted_data_rows(&output), sorted(&["1997,Ford", "2001,Audi"]));
}
