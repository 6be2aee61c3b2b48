//! Merge two CSV files into one, with optional column projection.
//!
//! The output carries the first input's (projected) header followed by the
//! data rows of both inputs. Column names are resolved against each input's
//! own header, so the same named columns line up even when the two files
//! order their columns differently.

use anyhow::{Result, bail};
use clap::Parser;
use csvmill_lib::fileio::{create_output_file, open_input, read_header};
use csvmill_lib::logging::OperationTimer;
use csvmill_lib::pipeline::ProjectOnly;
use csvmill_lib::pipeline::run_pass;
use csvmill_lib::validation::validate_file_exists;
use log::info;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::commands::command::Command;
use crate::commands::common::{BufferOptions, ColumnSelectOptions, CsvIoOptions, resolve_projection};

/// Merge two CSV files into one.
///
/// Streams both inputs through the pipeline sequentially; each input's
/// columns are resolved by name against its own header.
#[derive(Debug, Parser)]
#[command(
    name = "merge",
    about = "\x1b[38;5;166m[TRANSFORM]\x1b[0m  \x1b[36mMerge two CSV files into one\x1b[0m",
    long_about = r#"
Merge two CSV files into a single output file.

The output header comes from the first input (after column projection). Data
rows from both inputs follow, first file first. Column selections
(--keep-column / --remove-column) are resolved against each file's own
header, so files that share column names but not column order merge cleanly.

Example usage:
  csvmill merge -i january.csv --input-second february.csv -o q1.csv
  csvmill merge -i a.csv --input-second b.csv -o merged.csv --remove-column Notes
"#
)]
pub struct Merge {
    /// Input/output CSV options
    #[command(flatten)]
    pub io: CsvIoOptions,

    /// Second input CSV file
    #[arg(long = "input-second")]
    pub input_second: PathBuf,

    /// Column projection options
    #[command(flatten)]
    pub columns: ColumnSelectOptions,

    /// Pipeline tuning options
    #[command(flatten)]
    pub buffer: BufferOptions,
}

impl Command for Merge {
    fn execute(&self) -> Result<()> {
        self.io.validate()?;
        validate_file_exists(&self.input_second, "Second input CSV")?;

        let timer = OperationTimer::new("Merging rows");
        info!("Starting merge");
        info!("Input: {}", self.io.input.display());
        info!("Second input: {}", self.input_second.display());
        info!("Output: {}", self.io.output.display());

        let options = self.buffer.pipeline_options();
        let output_file = create_output_file(&self.io.output, "Output CSV")?;

        let mut total_rows = 0;
        let mut merged_header: Option<String> = None;
        for (label, path) in
            [("first input", &self.io.input), ("second input", &self.input_second)]
        {
            let sink = std::io::BufWriter::new(output_file.try_clone()?);
            total_rows += self.merge_one(path, label, &mut merged_header, sink, &options)?;
        }

        timer.log_completion(total_rows);
        Ok(())
    }
}

impl Merge {
    /// Streams one input into the shared output. The first input writes the
    /// merged header; later inputs must project to the same header.
    fn merge_one(
        &self,
        path: &Path,
        label: &str,
        merged_header: &mut Option<String>,
        mut sink: std::io::BufWriter<std::fs::File>,
        options: &csvmill_lib::pipeline::PipelineOptions,
    ) -> Result<u64> {
        let mut reader = open_input(path, "Input CSV")?;
        let header_line = read_header(&mut reader, path)?;
        let (columns, projected_header) = resolve_projection(&self.columns, &header_line)?;

        match merged_header {
            None => {
                writeln!(sink, "{projected_header}")?;
                *merged_header = Some(projected_header);
            }
            Some(existing) => {
                if *existing != projected_header {
                    bail!(
                        "Header mismatch: {label} projects to '{projected_header}', \
                         expected '{existing}'"
                    );
                }
            }
        }

        let transform = ProjectOnly { columns };
        let rows = run_pass(
            reader.lines(),
            None,
            &transform,
            Box::new(sink),
            None,
            options,
            "Merged rows",
        )?;
        info!("Read {rows} data rows from {}", path.display());
        Ok(rows)
    }
}
