//! Common CLI options shared across commands.
//!
//! This module provides shared argument structures that can be composed into
//! command structs using `#[command(flatten)]`.

use std::path::PathBuf;

use clap::Args;

use csvmill_lib::config::{self, DEFAULT_BUFFER_BYTES};
use csvmill_lib::pipeline::PipelineOptions;
use csvmill_lib::project::{ColumnMode, ColumnSet};
use csvmill_lib::row::split_header;
use csvmill_lib::validation::validate_file_exists;

/// Common input/output options for commands that read a CSV and write a CSV.
#[derive(Debug, Clone, Args)]
pub struct CsvIoOptions {
    /// Input CSV file
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output CSV file
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

impl CsvIoOptions {
    /// Validates that the input file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the input file does not exist.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_file_exists(&self.input, "Input CSV")?;
        Ok(())
    }
}

/// Options for writing non-matching rows to a separate file.
#[derive(Debug, Clone, Default, Args)]
pub struct SecondaryOutputOptions {
    /// Optional output CSV file for rows excluded from the primary output
    #[arg(long = "secondary-output")]
    pub secondary_output: Option<PathBuf>,
}

impl SecondaryOutputOptions {
    /// Returns true if a secondary sink is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.secondary_output.is_some()
    }
}

/// Pipeline tuning options shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct BufferOptions {
    /// Memory budget in bytes for buffered rows
    #[arg(long = "buffer-bytes", default_value_t = DEFAULT_BUFFER_BYTES)]
    pub buffer_bytes: u64,

    /// Number of worker threads (default: derived from available cores)
    #[arg(short = 't', long = "threads")]
    pub threads: Option<usize>,
}

impl BufferOptions {
    /// Builds pipeline options from the CLI values, deriving the effective
    /// budget from the configured bytes.
    #[must_use]
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            buffer_budget: config::effective_buffer_budget(self.buffer_bytes),
            threads: self.threads,
            ..PipelineOptions::default()
        }
    }
}

/// Column projection options: keep only the listed columns, or remove them.
/// The two lists are mutually exclusive.
#[derive(Debug, Clone, Default, Args)]
pub struct ColumnSelectOptions {
    /// Column to keep in the output (repeatable; all others are dropped)
    #[arg(long = "keep-column", conflicts_with = "remove_columns")]
    pub keep_columns: Vec<String>,

    /// Column to remove from the output (repeatable)
    #[arg(long = "remove-column")]
    pub remove_columns: Vec<String>,
}

impl ColumnSelectOptions {
    /// Resolves the configured column names against a header, returning
    /// `None` when no projection was requested.
    ///
    /// # Errors
    ///
    /// Returns an error if a named column is missing from the header.
    pub fn resolve(&self, header: &[String]) -> anyhow::Result<Option<ColumnSet>> {
        let (mode, names) = if !self.keep_columns.is_empty() {
            (ColumnMode::Keep, &self.keep_columns)
        } else if !self.remove_columns.is_empty() {
            (ColumnMode::Remove, &self.remove_columns)
        } else {
            return Ok(None);
        };
        Ok(Some(ColumnSet::resolve(mode, names, header)?))
    }
}

/// Splits and resolves projection options against a raw header line, and
/// returns the projected header alongside the column set.
///
/// # Errors
///
/// Returns an error if a configured column is missing from the header.
pub fn resolve_projection(
    options: &ColumnSelectOptions,
    header_line: &str,
) -> anyhow::Result<(Option<ColumnSet>, String)> {
    let header = split_header(header_line);
    let columns = options.resolve(&header)?;
    let projected = match &columns {
        Some(set) => set.project(header_line)?,
        None => header_line.to_string(),
    };
    Ok((columns, projected))
}
