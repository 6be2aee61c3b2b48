//! CSV fixture writers and output readers shared by the integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Builds a `Command` for the compiled csvmill binary.
pub fn csvmill() -> Command {
    Command::new(env!("CARGO_BIN_EXE_csvmill"))
}

/// Writes a CSV file from literal lines, newline-terminated.
pub fn write_csv(dir: &TempDir, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.path().join(name);
    let mut contents = lines.join("\n");
    contents.push('\n');
    fs::write(&path, contents).expect("Failed to write fixture");
    path
}

/// Reads a file into its lines.
pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Failed to read output")
        .lines()
        .map(ToString::to_string)
        .collect()
}

/// The header line of an output file.
pub fn header_of(path: &Path) -> String {
    read_lines(path).first().cloned().expect("Output is empty")
}

/// The data rows (everything after the header) of an output file, sorted so
/// callers can compare as multisets; worker parallelism does not preserve
/// row order.
pub fn sorted_data_rows(path: &Path) -> Vec<String> {
    let mut rows: Vec<String> = read_lines(path).into_iter().skip(1).collect();
    rows.sort();
    rows
}

/// Sorts a slice of literal rows for multiset comparison.
pub fn sorted(rows: &[&str]) -> Vec<String> {
    let mut rows: Vec<String> = rows.iter().map(|r| (*r).to_string()).collect();
    rows.sort();
    rows
}
