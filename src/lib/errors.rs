//! Custom error types for csvmill operations.

use thiserror::Error;

/// Result type alias for csvmill operations
pub type Result<T> = std::result::Result<T, CsvMillError>;

/// Error type for csvmill operations
#[derive(Error, Debug)]
pub enum CsvMillError {
    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// Invalid percentage-split fraction
    #[error("Invalid split fraction: {value} (must be greater than {min} and less than {max})")]
    InvalidFraction {
        /// The invalid fraction value
        value: f64,
        /// Exclusive lower bound
        min: f64,
        /// Exclusive upper bound
        max: f64,
    },

    /// File could not be opened or read
    #[error("Cannot open {file_type} '{path}': {reason}")]
    FileOpen {
        /// Role of the file (e.g., "input CSV", "output CSV")
        file_type: String,
        /// Path to the file
        path: String,
        /// Explanation of the problem
        reason: String,
    },

    /// Input file has no header row
    #[error("Input file '{path}' is empty")]
    EmptyInput {
        /// Path to the file
        path: String,
    },

    /// Configured column name does not exist in the header
    #[error("Column '{name}' not found in header")]
    ColumnNotFound {
        /// The column name that failed to resolve
        name: String,
    },

    /// Unrecognized filter comparison operator
    #[error("Unknown filter operator '{operator}' (expected le, lt, ge, gt, eq or ne)")]
    UnknownOperator {
        /// The operator as given
        operator: String,
    },

    /// Unrecognized filter join operator
    #[error("Unknown join operator '{operator}' (expected AND or OR)")]
    UnknownJoinOperator {
        /// The operator as given
        operator: String,
    },

    /// A row ended before a configured column index could be reached
    #[error("Malformed row: expected column {column} but row has only {found} fields")]
    MalformedRow {
        /// The zero-based column index that was expected
        column: usize,
        /// Number of fields actually present
        found: usize,
    },

    /// A numeric comparison was requested against a non-numeric value
    #[error("Value '{value}' is not numeric, cannot apply '{operator}'")]
    NonNumericComparison {
        /// The offending value
        value: String,
        /// The comparison operator that required a number
        operator: String,
    },
}
