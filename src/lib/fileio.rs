//! File open/read helpers shared by the commands.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::Path;

use crate::errors::{CsvMillError, Result};
use crate::row::strip_quotes;

/// Opens an input file for buffered line reading.
pub fn open_input(path: &Path, description: &str) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| CsvMillError::FileOpen {
        file_type: description.to_string(),
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(BufReader::new(file))
}

/// Creates (truncating) an output file for buffered writing.
pub fn create_output(path: &Path, description: &str) -> Result<BufWriter<File>> {
    Ok(BufWriter::new(create_output_file(path, description)?))
}

/// Creates (truncating) an output file without buffering. Used when several
/// sequential passes share one output via [`File::try_clone`].
pub fn create_output_file(path: &Path, description: &str) -> Result<File> {
    File::create(path).map_err(|e| CsvMillError::FileOpen {
        file_type: description.to_string(),
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Reads and quote-strips the header line of an input file.
pub fn read_header(reader: &mut BufReader<File>, path: &Path) -> Result<String> {
    let mut line = String::new();
    let read = reader.read_line(&mut line).map_err(|e| CsvMillError::FileOpen {
        file_type: "input CSV".to_string(),
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    if read == 0 {
        return Err(CsvMillError::EmptyInput { path: path.display().to_string() });
    }
    Ok(strip_quotes(line.trim_end_matches(['\r', '\n'])))
}

/// Counts the data rows of a file (all lines after the header). Used by the
/// percentage split, which must size its sampling plan before streaming.
pub fn count_data_rows(path: &Path) -> Result<u64> {
    let reader = open_input(path, "input CSV")?;
    let mut count: u64 = 0;
    for line in reader.lines() {
        line.map_err(|e| CsvMillError::FileOpen {
            file_type: "input CSV".to_string(),
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        count += 1;
    }
    Ok(count.saturating_sub(1))
}
