//! Analyze the value distribution of every column and write a report.
//!
//! One streaming pass feeds every field of every row into a per-column
//! statistics table; the report flags columns perfectly correlated with a
//! label column (possible leakage), single-valued columns, and severely
//! imbalanced low-cardinality columns, then dumps all value counts.

use anyhow::Result;
use clap::Parser;
use csvmill_lib::errors::CsvMillError;
use csvmill_lib::fileio::{create_output, open_input, read_header};
use csvmill_lib::logging::OperationTimer;
use csvmill_lib::pipeline::{CollectColumnStats, run_pass};
use csvmill_lib::row::split_header;
use csvmill_lib::stats::{StatsTable, write_report};
use csvmill_lib::validation::validate_threshold;
use log::info;
use std::io::{BufRead, Write};
use std::sync::Arc;

use crate::commands::command::Command;
use crate::commands::common::{BufferOptions, CsvIoOptions};

/// Analyze per-column value distributions and label correlation.
#[derive(Debug, Parser)]
#[command(
    name = "analyze",
    about = "\x1b[38;5;166m[INSPECT]\x1b[0m    \x1b[36mAnalyze column value distributions\x1b[0m",
    long_about = r#"
Analyze the value distribution of every column in a CSV file.

The report lists, in order: columns whose values map 1:1 onto the label
column (possible target leakage; only with --label), columns with a single
distinct value, severely imbalanced values among 2-3-valued columns, and the
full per-column value counts in descending order.

A value is severely imbalanced when its count, scaled by (1 + threshold),
still falls short of the column's most frequent value's count.

Example usage:
  csvmill analyze -i train.csv -o report.txt
  csvmill analyze -i train.csv -o report.txt --label Outcome --imbalance-threshold 0.25
"#
)]
pub struct Analyze {
    /// Input/output options (output receives the plain-text report)
    #[command(flatten)]
    pub io: CsvIoOptions,

    /// Name of the label column for leakage detection
    #[arg(short = 'l', long = "label")]
    pub label: Option<String>,

    /// Imbalance threshold for low-cardinality columns
    #[arg(long = "imbalance-threshold", default_value_t = 0.5)]
    pub imbalance_threshold: f64,

    /// Pipeline tuning options
    #[command(flatten)]
    pub buffer: BufferOptions,
}

impl Command for Analyze {
    fn execute(&self) -> Result<()> {
        self.io.validate()?;
        validate_threshold(self.imbalance_threshold)?;

        let timer = OperationTimer::new("Analyzing rows");
        info!("Starting analyze");
        info!("Input: {}", self.io.input.display());
        info!("Report: {}", self.io.output.display());

        let options = self.buffer.pipeline_options();
        let mut reader = open_input(&self.io.input, "Input CSV")?;
        let header_line = read_header(&mut reader, &self.io.input)?;
        let header = split_header(&header_line);

        let label = match &self.label {
            Some(name) => Some(
                header
                    .iter()
                    .position(|column| column == name)
                    .ok_or_else(|| CsvMillError::ColumnNotFound { name: name.clone() })?,
            ),
            None => None,
        };

        let table = Arc::new(StatsTable::new(header.len()));
        let collect = CollectColumnStats { table: Arc::clone(&table), label };
        let rows = run_pass(
            reader.lines(),
            None,
            &collect,
            Box::new(std::io::sink()),
            None,
            &options,
            "Analyzed rows",
        )?;

        let mut out = create_output(&self.io.output, "Report")?;
        write_report(&mut out, &header, &table, label, self.imbalance_threshold)?;
        out.flush()?;
        info!("Report written to {}", self.io.output.display());

        timer.log_completion(rows);
        Ok(())
    }
}
