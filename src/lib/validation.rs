//! Input validation utilities.
//!
//! Eager checks for file paths and parameters with consistent, structured
//! error messages. All configuration is validated before any pipeline thread
//! starts.

use crate::errors::{CsvMillError, Result};
use std::path::Path;

/// Validate that a file exists.
///
/// # Errors
/// Returns [`CsvMillError::FileOpen`] if the file does not exist.
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        return Err(CsvMillError::FileOpen {
            file_type: description.to_string(),
            path: path_ref.display().to_string(),
            reason: "File does not exist".to_string(),
        });
    }
    Ok(())
}

/// Validate that a split fraction lies strictly between 0 and 1.
///
/// # Errors
/// Returns [`CsvMillError::InvalidFraction`] otherwise.
pub fn validate_fraction(value: f64) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(CsvMillError::InvalidFraction { value, min: 0.0, max: 1.0 })
    }
}

/// Validate that an imbalance threshold is non-negative.
///
/// # Errors
/// Returns [`CsvMillError::InvalidParameter`] for negative or non-finite values.
pub fn validate_threshold(value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CsvMillError::InvalidParameter {
            parameter: "imbalance-threshold".to_string(),
            reason: format!("{value} must be a non-negative number"),
        })
    }
}
