//! The concurrent streaming pipeline shared by every csvmill command.
//!
//! One full pass over an input moves rows through four stages:
//!
//! ```text
//! Source (1 thread) -> pending queue -> Workers (N threads) -> output
//! queue(s) -> Writer (1 thread per open sink)
//! ```
//!
//! The source throttles itself against a byte budget: every 5th row it
//! estimates buffered memory as
//! `max_row_size * pending_len + normal_len + secondary_len` and sleeps while
//! the estimate exceeds the budget. The estimate mixes byte and item terms on
//! purpose; it only affects timing, never output.
//!
//! All waiting is poll-and-sleep; the intervals are injectable so tests can
//! run with near-zero sleeps. Two flags coordinate shutdown: `input_done`
//! (source finished, workers may drain and exit) and `processing_done`
//! (workers joined, writers may drain and exit).
//!
//! With more than one worker, output row order is not guaranteed to match
//! input order. That is an accepted property of the design, not a defect;
//! tests compare output as multisets.

use anyhow::{Context, Result, anyhow};
use log::debug;
use parking_lot::Mutex;
use std::io::Write;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crate::config;
use crate::errors;
use crate::filter::FilterExpr;
use crate::progress::{DEFAULT_PROGRESS_INTERVAL, ProgressTracker};
use crate::project::{ColumnSet, project_row};
use crate::queue::RowQueue;
use crate::row::{DELIMITER, Route, Row, field_at, field_count, strip_quotes};
use crate::sample::SamplingPlan;
use crate::stats::{StatsTable, append_indicators};

/// The source re-checks the watermark every this many rows.
const QUEUE_CHECK_INTERVAL: u64 = 5;

/// Tuning knobs for one pipeline pass. Injectable so tests can shrink the
/// sleeps and pin the worker count.
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    /// Effective byte budget for buffered rows (see [`config`]).
    pub buffer_budget: u64,
    /// Worker count override; `None` derives it from available parallelism.
    pub threads: Option<usize>,
    /// Sleep while the watermark exceeds the budget.
    pub source_throttle: Duration,
    /// Worker sleep when the pending queue is empty.
    pub worker_idle: Duration,
    /// Writer sleep when its output queue is empty.
    pub writer_idle: Duration,
    /// Progress log interval in rows.
    pub progress_interval: u64,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            buffer_budget: config::effective_buffer_budget(config::DEFAULT_BUFFER_BYTES),
            threads: None,
            source_throttle: Duration::from_millis(10),
            worker_idle: Duration::from_millis(10),
            writer_idle: Duration::from_millis(5),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

/// Number of worker threads for a pass: available parallelism minus the
/// source and writer threads, floored at one.
#[must_use]
pub fn worker_count(two_sinks: bool, override_threads: Option<usize>) -> usize {
    if let Some(n) = override_threads {
        return n.max(1);
    }
    let overhead = if two_sinks { 3 } else { 2 };
    let available = thread::available_parallelism().map(NonZeroUsize::get).unwrap_or(1);
    available.saturating_sub(overhead).max(1)
}

/// Row transform applied by the workers. Implementations must be pure with
/// respect to the row (shared state, if any, carries its own locks).
pub trait RowTransform: Send + Sync {
    /// Transforms one row, returning the row to emit (with its final route)
    /// or `None` when the row is consumed (analysis passes).
    fn apply(&self, row: Row) -> errors::Result<Option<Row>>;
}

/// Routes rows by a filter expression, then projects columns. Rows that fail
/// the filter head for the secondary sink.
pub struct FilterRoute {
    pub expr: FilterExpr,
    pub columns: Option<ColumnSet>,
}

impl RowTransform for FilterRoute {
    fn apply(&self, mut row: Row) -> errors::Result<Option<Row>> {
        row.route = if self.expr.matches(&row.data)? { Route::Normal } else { Route::Secondary };
        row.data = project_row(self.columns.as_ref(), &row.data)?;
        Ok(Some(row))
    }
}

/// Projects columns only; routing was already decided at the source (merge,
/// percentage split).
pub struct ProjectOnly {
    pub columns: Option<ColumnSet>,
}

impl RowTransform for ProjectOnly {
    fn apply(&self, mut row: Row) -> errors::Result<Option<Row>> {
        row.data = project_row(self.columns.as_ref(), &row.data)?;
        Ok(Some(row))
    }
}

/// One-hot pass 1: count the target column's values; rows are consumed.
pub struct CollectTargetStats {
    pub table: Arc<StatsTable>,
    pub target: usize,
}

impl RowTransform for CollectTargetStats {
    fn apply(&self, row: Row) -> errors::Result<Option<Row>> {
        let value = field_at(&row.data, self.target).ok_or(errors::CsvMillError::MalformedRow {
            column: self.target,
            found: field_count(&row.data),
        })?;
        self.table.record(0, value);
        Ok(None)
    }
}

/// Analyzer pass: feed every column's value (and optionally the row's label)
/// into the shared statistics table; rows are consumed.
pub struct CollectColumnStats {
    pub table: Arc<StatsTable>,
    pub label: Option<usize>,
}

impl RowTransform for CollectColumnStats {
    fn apply(&self, row: Row) -> errors::Result<Option<Row>> {
        let fields: Vec<&str> = row.data.split(DELIMITER).collect();
        let expected = self.table.num_columns();
        if fields.len() < expected {
            return Err(errors::CsvMillError::MalformedRow {
                column: expected - 1,
                found: fields.len(),
            });
        }
        let label_value = self.label.map(|i| fields[i]);
        for (i, value) in fields.iter().take(expected).enumerate() {
            match label_value {
                Some(label) => self.table.record_with_label(i, value, label),
                None => self.table.record(i, value),
            }
        }
        Ok(None)
    }
}

/// One-hot pass 2: append one indicator field per distinct value (in the
/// order of `values`), optionally dropping the original column first.
pub struct EncodeRows {
    pub values: Arc<Vec<String>>,
    pub target: usize,
    pub remove: Option<ColumnSet>,
}

impl RowTransform for EncodeRows {
    fn apply(&self, mut row: Row) -> errors::Result<Option<Row>> {
        let value = field_at(&row.data, self.target)
            .ok_or(errors::CsvMillError::MalformedRow {
                column: self.target,
                found: field_count(&row.data),
            })?
            .to_string();
        let mut data = project_row(self.remove.as_ref(), &row.data)?;
        append_indicators(&mut data, &self.values, &value);
        row.data = data;
        Ok(Some(row))
    }
}

/// Phase flags shared by the stages of one pass.
#[derive(Default)]
struct PhaseFlags {
    input_done: AtomicBool,
    processing_done: AtomicBool,
}

/// Everything the stage loops share: the three queues, the phase flags, and
/// the first fatal error (which poisons the whole pass).
struct SharedState {
    pending: RowQueue,
    normal_out: RowQueue,
    secondary_out: Option<RowQueue>,
    flags: PhaseFlags,
    failure: Mutex<Option<anyhow::Error>>,
    failed: AtomicBool,
}

impl SharedState {
    fn new(two_sinks: bool) -> Self {
        Self {
            pending: RowQueue::new(),
            normal_out: RowQueue::new(),
            secondary_out: two_sinks.then(RowQueue::new),
            flags: PhaseFlags::default(),
            failure: Mutex::new(None),
            failed: AtomicBool::new(false),
        }
    }

    fn record_failure(&self, error: anyhow::Error) {
        let mut slot = self.failure.lock();
        if slot.is_none() {
            *slot = Some(error);
        }
        self.failed.store(true, Ordering::Release);
    }

    fn has_failed(&self) -> bool {
        self.failed.load(Ordering::Acquire)
    }
}

/// Runs one full pass: spawns the workers and writer(s), feeds `lines`
/// through the source loop on the calling thread, joins everything in phase
/// order, and returns the number of lines read.
///
/// `lines` must start at the first data row (header already consumed).
/// Rows named by `plan` are routed to the secondary sink at the source.
///
/// # Errors
///
/// The first failure from any stage (I/O, malformed row, non-numeric
/// comparison) aborts the pass and is returned; partially written output is
/// left on disk.
pub fn run_pass<I>(
    lines: I,
    plan: Option<SamplingPlan>,
    transform: &dyn RowTransform,
    normal_sink: Box<dyn Write + Send>,
    secondary_sink: Option<Box<dyn Write + Send>>,
    options: &PipelineOptions,
    progress_label: &str,
) -> Result<u64>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let two_sinks = secondary_sink.is_some();
    let workers = worker_count(two_sinks, options.threads);
    let state = SharedState::new(two_sinks);
    let progress =
        ProgressTracker::new(progress_label).with_interval(options.progress_interval);

    let mut rows_read = 0;
    thread::scope(|scope| {
        let mut worker_handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            worker_handles.push(scope.spawn(|| worker_loop(&state, transform, options)));
        }

        let normal_handle = {
            let state = &state;
            scope.spawn(move || writer_loop(state, &state.normal_out, normal_sink, options))
        };
        // A secondary sink and its queue exist together (both derive from
        // `two_sinks`), so zipping them keeps that invariant structural.
        let secondary_handle =
            secondary_sink.zip(state.secondary_out.as_ref()).map(|(sink, queue)| {
                let state = &state;
                scope.spawn(move || writer_loop(state, queue, sink, options))
            });

        rows_read = source_loop(lines, plan, &state, options, &progress);
        state.flags.input_done.store(true, Ordering::Release);

        for handle in worker_handles {
            if handle.join().is_err() {
                state.record_failure(anyhow!("worker thread panicked"));
            }
        }
        state.flags.processing_done.store(true, Ordering::Release);

        if normal_handle.join().is_err() {
            state.record_failure(anyhow!("writer thread panicked"));
        }
        if let Some(handle) = secondary_handle {
            if handle.join().is_err() {
                state.record_failure(anyhow!("writer thread panicked"));
            }
        }
    });

    if let Some(error) = state.failure.lock().take() {
        return Err(error);
    }
    progress.log_final();
    Ok(rows_read)
}

fn source_loop<I>(
    lines: I,
    mut plan: Option<SamplingPlan>,
    state: &SharedState,
    options: &PipelineOptions,
    progress: &ProgressTracker,
) -> u64
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let mut row_num: u64 = 0;
    let mut max_row_size: u64 = 0;

    for line in lines {
        if state.has_failed() {
            break;
        }
        let line = match line.context("reading input") {
            Ok(line) => line,
            Err(error) => {
                state.record_failure(error);
                break;
            }
        };
        row_num += 1;

        let data = strip_quotes(&line);
        max_row_size = max_row_size.max(data.len() as u64);

        if row_num.is_multiple_of(QUEUE_CHECK_INTERVAL) {
            loop {
                let pending = state.pending.len() as u64;
                let normal = state.normal_out.len() as u64;
                let secondary =
                    state.secondary_out.as_ref().map_or(0, |q| q.len() as u64);
                let watermark = max_row_size * pending + normal + secondary;
                if watermark <= options.buffer_budget || state.has_failed() {
                    break;
                }
                thread::sleep(options.source_throttle);
            }
        }

        if !data.is_empty() {
            let mut row = Row::new(data);
            if let Some(plan) = plan.as_mut() {
                if plan.take(row_num) {
                    row.route = Route::Secondary;
                }
            }
            state.pending.push(row);
        }
        if progress.log_if_needed(1) {
            debug!(
                "queue depths: pending {} normal {} secondary {}",
                state.pending.len(),
                state.normal_out.len(),
                state.secondary_out.as_ref().map_or(0, |q| q.len())
            );
        }
    }
    row_num
}

fn worker_loop(state: &SharedState, transform: &dyn RowTransform, options: &PipelineOptions) {
    loop {
        if state.has_failed() {
            break;
        }
        match state.pending.pop() {
            Some(row) => match transform.apply(row) {
                Ok(Some(row)) => match row.route {
                    Route::Normal => state.normal_out.push(row),
                    Route::Secondary => {
                        // No secondary sink open: the row is discarded.
                        if let Some(queue) = &state.secondary_out {
                            queue.push(row);
                        }
                    }
                },
                Ok(None) => {}
                Err(error) => {
                    state.record_failure(error.into());
                    break;
                }
            },
            None => {
                if state.flags.input_done.load(Ordering::Acquire) && state.pending.is_empty() {
                    break;
                }
                thread::sleep(options.worker_idle);
            }
        }
    }
}

fn writer_loop(
    state: &SharedState,
    queue: &RowQueue,
    mut sink: Box<dyn Write + Send>,
    options: &PipelineOptions,
) {
    loop {
        match queue.pop() {
            Some(row) => {
                if let Err(error) = writeln!(sink, "{}", row.data) {
                    state.record_failure(anyhow::Error::new(error).context("writing output"));
                    break;
                }
            }
            None => {
                if state.flags.processing_done.load(Ordering::Acquire) && queue.is_empty() {
                    break;
                }
                if state.has_failed() {
                    break;
                }
                thread::sleep(options.writer_idle);
            }
        }
    }
    if let Err(error) = sink.flush() {
        state.record_failure(anyhow::Error::new(error).context("flushing output"));
    }
}
