//! Split a CSV file by filter expression or by random percentage.
//!
//! Rows that match (or, in percentage mode, rows not drawn by the sampling
//! plan) go to the primary output; the rest go to the optional secondary
//! output, or are discarded when none is configured.

use anyhow::{Result, bail};
use clap::Parser;
use csvmill_lib::fileio::{count_data_rows, create_output, open_input, read_header};
use csvmill_lib::filter::FilterExpr;
use csvmill_lib::logging::OperationTimer;
use csvmill_lib::pipeline::{FilterRoute, ProjectOnly, RowTransform, run_pass};
use csvmill_lib::row::split_header;
use csvmill_lib::sample::SamplingPlan;
use csvmill_lib::validation::validate_fraction;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{BufRead, Write};

use crate::commands::command::Command;
use crate::commands::common::{
    BufferOptions, ColumnSelectOptions, CsvIoOptions, SecondaryOutputOptions, resolve_projection,
};

/// Split a CSV file by filter expression or random percentage.
#[derive(Debug, Parser)]
#[command(
    name = "split",
    about = "\x1b[38;5;166m[TRANSFORM]\x1b[0m  \x1b[36mSplit a CSV by filter or percentage\x1b[0m",
    long_about = r#"
Split a CSV file into matching and non-matching rows.

Two modes, mutually exclusive:

Filter mode (--filter, repeatable): each filter is "<column> <op> <value>"
with op one of le, lt, ge, gt, eq, ne. Every filter except the last takes a
trailing AND or OR joining it to the next; clauses evaluate left to right
with no precedence. Ordering operators require numeric values; eq/ne compare
numerically when the field looks numeric, textually otherwise.

Percentage mode (--fraction): keeps the given fraction of data rows in the
primary output and routes a randomly drawn set of rows to the secondary
output. --seed makes the draw reproducible.

Rows routed away from the primary output are written to --secondary-output
when given, otherwise discarded. Both outputs carry the (projected) header.

Example usage:
  csvmill split -i cars.csv -o cheap.csv --filter "Price lt 5000"
  csvmill split -i cars.csv -o kept.csv --filter "Price lt 5000 AND" --filter "Year ge 1997"
  csvmill split -i rows.csv -o train.csv --secondary-output test.csv --fraction 0.8 --seed 42
"#
)]
pub struct Split {
    /// Input/output CSV options
    #[command(flatten)]
    pub io: CsvIoOptions,

    /// Filter expression clause (repeatable; see long help for syntax)
    #[arg(long = "filter", conflicts_with = "fraction")]
    pub filters: Vec<String>,

    /// Fraction of data rows to keep in the primary output (0-1 exclusive)
    #[arg(short = 'f', long = "fraction")]
    pub fraction: Option<f64>,

    /// Random seed for reproducible percentage splits
    #[arg(long = "seed", requires = "fraction")]
    pub seed: Option<u64>,

    /// Secondary output options
    #[command(flatten)]
    pub secondary: SecondaryOutputOptions,

    /// Column projection options
    #[command(flatten)]
    pub columns: ColumnSelectOptions,

    /// Pipeline tuning options
    #[command(flatten)]
    pub buffer: BufferOptions,
}

impl Command for Split {
    fn execute(&self) -> Result<()> {
        if self.filters.is_empty() && self.fraction.is_none() {
            bail!("Either --filter or --fraction is required");
        }
        self.io.validate()?;

        let timer = OperationTimer::new("Splitting rows");
        info!("Starting split");
        info!("Input: {}", self.io.input.display());
        info!("Output: {}", self.io.output.display());
        if let Some(path) = &self.secondary.secondary_output {
            info!("Secondary output: {}", path.display());
        }

        let options = self.buffer.pipeline_options();
        let mut reader = open_input(&self.io.input, "Input CSV")?;
        let header_line = read_header(&mut reader, &self.io.input)?;
        let header = split_header(&header_line);
        let (columns, projected_header) = resolve_projection(&self.columns, &header_line)?;

        // Percentage mode needs the row count before streaming starts.
        let plan = match self.fraction {
            Some(fraction) => {
                validate_fraction(fraction)?;
                let total_rows = count_data_rows(&self.io.input)?;
                let mut rng = match self.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_os_rng(),
                };
                Some(SamplingPlan::generate(total_rows, fraction, &mut rng))
            }
            None => None,
        };

        let transform: Box<dyn RowTransform> = if self.filters.is_empty() {
            Box::new(ProjectOnly { columns })
        } else {
            let expr = FilterExpr::parse(&self.filters, &header)?;
            Box::new(FilterRoute { expr, columns })
        };

        let mut normal_sink = create_output(&self.io.output, "Output CSV")?;
        writeln!(normal_sink, "{projected_header}")?;

        let secondary_sink: Option<Box<dyn Write + Send>> =
            match &self.secondary.secondary_output {
                Some(path) => {
                    let mut sink = create_output(path, "Secondary output CSV")?;
                    writeln!(sink, "{projected_header}")?;
                    Some(Box::new(sink))
                }
                None => None,
            };

        let rows = run_pass(
            reader.lines(),
            plan,
            transform.as_ref(),
            Box::new(normal_sink),
            secondary_sink,
            &options,
            "Split rows",
        )?;

        timer.log_completion(rows);
        Ok(())
    }
}
