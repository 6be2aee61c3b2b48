//! Integration tests for the onehot command.

use tempfile::TempDir;

use crate::helpers::{csvmill, header_of, sorted, sorted_data_rows, write_csv};

fn cars(dir: &TempDir) -> std::path::PathBuf {
    write_csv(
        dir,
        "cars.csv",
        &["Year,Make,Price", "1997,Ford,3000", "1999,Chevy,4900", "2001,Audi,21000", "2005,Ford,8000"],
    )
}

#[test]
fn test_onehot_appends_indicators_in_lexicographic_order() {
    let dir = TempDir::new().unwrap();
    let input = cars(&dir);
    let output = dir.path().join("encoded.csv");

    let status = csvmill()
        .args(["onehot", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--column", "Make", "--threads", "2"])
        .status()
        .expect("Failed to run csvmill");
    assert!(status.success());

    assert_eq!(header_of(&output), "Year,Make,Price,Make.Audi,Make.Chevy,Make.Ford");
    assert_eq!(
        sorted_data_rows(&output),
        sorted(&[
            "1997,Ford,3000,0,0,1",
            "1999,Chevy,4900,0,1,0",
            "2001,Audi,21000,1,0,0",
            "2005,Ford,8000,0,0,1",
        ])
    );
}

#[test]
fn test_onehot_remove_original() {
    let dir = TempDir::new().unwrap();
    let input = cars(&dir);
    let output = dir.path().join("encoded.csv");

    let status = csvmill()
        .args(["onehot", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--column", "Make", "--remove-original", "--threads", "1"])
        .status()
        .expect("Failed to run csvmill");
    assert!(status.success());

    assert_eq!(header_of(&output), "Year,Price,Make.Audi,Make.Chevy,Make.Ford");
    assert_eq!(
        sorted_data_rows(&output),
        sorted(&[
            "1997,3000,0,0,1",
            "1999,4900,0,1,0",
            "2001,21000,1,0,0",
            "2005,8000,0,0,1",
        ])
    );
}

// Every data row gets exactly one indicator set, even with a single value.
#[test]
fn test_onehot_single_valued_column() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, "one.csv", &["id,kind", "1,only", "2,only"]);
    let output = dir.path().join("encoded.csv");

    let status = csvmill()
        .args(["onehot", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--column", "kind", "--threads", "1"])
        .status()
        .expect("Failed to run csvmill");
    assert!(status.success());

    assert_eq!(header_of(&output), "id,kind,kind.only");
    assert_eq!(sorted_data_rows(&output), sorted(&["1,only,1", "2,only,1"]));
}
