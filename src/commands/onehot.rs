//! One-hot encode a categorical column using two streaming passes.
//!
//! Pass 1 collects the distinct values of the target column; pass 2 appends
//! one `0`/`1` indicator field per value, named `<column>.<value>`, in
//! lexicographic value order. The original column is kept unless
//! `--remove-original` is given.

use anyhow::Result;
use clap::Parser;
use csvmill_lib::errors::CsvMillError;
use csvmill_lib::fileio::{create_output, open_input, read_header};
use csvmill_lib::logging::OperationTimer;
use csvmill_lib::pipeline::{CollectTargetStats, EncodeRows, run_pass};
use csvmill_lib::project::{ColumnMode, ColumnSet, project_row};
use csvmill_lib::row::split_header;
use csvmill_lib::stats::{StatsTable, append_indicator_header};
use log::info;
use std::io::{BufRead, Write};
use std::sync::Arc;

use crate::commands::command::Command;
use crate::commands::common::{BufferOptions, CsvIoOptions};

/// One-hot encode a categorical column.
#[derive(Debug, Parser)]
#[command(
    name = "onehot",
    about = "\x1b[38;5;166m[TRANSFORM]\x1b[0m  \x1b[36mOne-hot encode a categorical column\x1b[0m",
    long_about = r#"
One-hot encode a categorical column in two streaming passes.

The first pass collects the distinct values of the target column. The second
pass appends one indicator field per value, named <column>.<value>, in
lexicographic value order: 1 where the row carries that value, 0 otherwise.
The original column is retained unless --remove-original is given.

Example usage:
  csvmill onehot -i cars.csv -o encoded.csv --column Make
  csvmill onehot -i cars.csv -o encoded.csv --column Make --remove-original
"#
)]
pub struct Onehot {
    /// Input/output CSV options
    #[command(flatten)]
    pub io: CsvIoOptions,

    /// Name of the column to encode
    #[arg(short = 'c', long = "column")]
    pub column: String,

    /// Drop the original column from the output
    #[arg(long = "remove-original", default_value = "false")]
    pub remove_original: bool,

    /// Pipeline tuning options
    #[command(flatten)]
    pub buffer: BufferOptions,
}

impl Command for Onehot {
    fn execute(&self) -> Result<()> {
        self.io.validate()?;

        let timer = OperationTimer::new("One-hot encoding rows");
        info!("Starting onehot");
        info!("Input: {}", self.io.input.display());
        info!("Output: {}", self.io.output.display());
        info!("Target column: {}", self.column);

        let options = self.buffer.pipeline_options();

        // Pass 1: collect the target column's distinct values.
        let mut reader = open_input(&self.io.input, "Input CSV")?;
        let header_line = read_header(&mut reader, &self.io.input)?;
        let header = split_header(&header_line);
        let target = header
            .iter()
            .position(|name| *name == self.column)
            .ok_or_else(|| CsvMillError::ColumnNotFound { name: self.column.clone() })?;

        let table = Arc::new(StatsTable::new(1));
        let collect = CollectTargetStats { table: Arc::clone(&table), target };
        run_pass(
            reader.lines(),
            None,
            &collect,
            Box::new(std::io::sink()),
            None,
            &options,
            "Scanned rows",
        )?;

        let values: Vec<String> = table.column(0).counts().keys().cloned().collect();
        info!("Found {} distinct values in '{}'", values.len(), self.column);

        // Pass 2: emit rows with indicator fields appended.
        let remove = self
            .remove_original
            .then(|| ColumnSet::from_indices(ColumnMode::Remove, vec![target]));
        let mut output_header = project_row(remove.as_ref(), &header_line)?;
        append_indicator_header(&mut output_header, &self.column, &values);

        let mut sink = create_output(&self.io.output, "Output CSV")?;
        writeln!(sink, "{output_header}")?;

        let mut reader = open_input(&self.io.input, "Input CSV")?;
        read_header(&mut reader, &self.io.input)?;
        let encode = EncodeRows { values: Arc::new(values), target, remove };
        let rows = run_pass(
            reader.lines(),
            None,
            &encode,
            Box::new(sink),
            None,
            &options,
            "Encoded rows",
        )?;

        timer.log_completion(rows);
        Ok(())
    }
}
