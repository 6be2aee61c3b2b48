//! Thread-safe progress tracking.
//!
//! Maintains an atomic row count and logs a progress line each time the
//! count crosses an interval boundary. Safe to share across the source and
//! worker threads.

use log::info;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default logging interval in rows.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10_000;

/// Interval-based progress logger.
pub struct ProgressTracker {
    interval: u64,
    message: String,
    count: AtomicU64,
}

impl ProgressTracker {
    /// Creates a tracker with the default 10,000-row interval.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            interval: DEFAULT_PROGRESS_INTERVAL,
            message: message.into(),
            count: AtomicU64::new(0),
        }
    }

    /// Sets the logging interval.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Adds to the count and logs once per interval boundary crossed.
    /// Returns true if the new count sits exactly on a boundary.
    pub fn log_if_needed(&self, additional: u64) -> bool {
        if additional == 0 {
            let count = self.count.load(Ordering::Relaxed);
            return count > 0 && count.is_multiple_of(self.interval);
        }

        let prev = self.count.fetch_add(additional, Ordering::Relaxed);
        let new_count = prev + additional;
        for crossed in (prev / self.interval + 1)..=(new_count / self.interval) {
            info!("{} {}", self.message, format_milestone(crossed * self.interval));
        }
        new_count.is_multiple_of(self.interval)
    }

    /// Logs a final line unless the last interval log already covered the
    /// exact count.
    pub fn log_final(&self) {
        if !self.log_if_needed(0) {
            let count = self.count.load(Ordering::Relaxed);
            if count > 0 {
                info!("{} {} (complete)", self.message, format_milestone(count));
            }
        }
    }

    /// Current count.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

fn format_milestone(count: u64) -> String {
    crate::logging::format_count(count)
}
