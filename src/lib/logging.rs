//! Logging utilities for formatted output.
//!
//! Shared formatting helpers plus an operation timer used by every command
//! to log a start line and a completion summary with throughput.

use std::time::{Duration, Instant};

/// Formats a count with thousands separators (e.g., "1,234,567").
#[must_use]
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a duration in human-readable form (e.g., "2m 15s", "1h 30m").
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        let mins = secs / 60;
        let rem = secs % 60;
        if rem == 0 { format!("{mins}m") } else { format!("{mins}m {rem}s") }
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        if mins == 0 { format!("{hours}h") } else { format!("{hours}h {mins}m") }
    }
}

/// Formats a processing rate (items per second or per minute).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_rate(count: u64, duration: Duration) -> String {
    let secs = duration.as_secs_f64().max(1e-9);
    let rate = count as f64 / secs;
    if rate >= 1.0 {
        format!("{} rows/s", format_count(rate as u64))
    } else {
        format!("{:.1} rows/min", count as f64 / (secs / 60.0))
    }
}

/// Operation timing and summary helper.
///
/// Logs the start on construction and a formatted completion line with row
/// count, elapsed time, and throughput on [`OperationTimer::log_completion`].
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    /// Creates a new operation timer and logs the start.
    #[must_use]
    pub fn new(operation: &str) -> Self {
        log::info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    /// Logs the completion with row count and rate.
    pub fn log_completion(&self, count: u64) {
        let duration = self.start_time.elapsed();
        log::info!(
            "{} completed: {} rows in {} ({})",
            self.operation,
            format_count(count),
            format_duration(duration),
            format_rate(count, duration)
        );
    }
}
