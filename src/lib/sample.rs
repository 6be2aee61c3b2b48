//! Percentage-split sampling plan.
//!
//! Before the main pass, the split command draws the set of row numbers that
//! will be routed to the secondary sink. Draws are uniform over
//! `[1, total_rows - 1]` (1-based data rows, header excluded); the
//! draw/sort/dedupe cycle repeats until the target unique count is reached,
//! so the plan is always ascending and duplicate-free.

use log::info;
use rand::Rng;
use std::collections::VecDeque;

/// Precomputed ascending list of row numbers destined for the secondary sink.
#[derive(Debug, Clone, Default)]
pub struct SamplingPlan {
    rows: VecDeque<u64>,
}

impl SamplingPlan {
    /// Generates a plan for `total_rows` data rows, keeping `keep_fraction`
    /// of them in the primary output. The plan holds
    /// `floor(total_rows * (1 - keep_fraction))` unique row numbers.
    ///
    /// `keep_fraction` must already be validated to lie in (0, 1).
    pub fn generate<R: Rng>(total_rows: u64, keep_fraction: f64, rng: &mut R) -> Self {
        // Sized from the kept count: computing `1.0 - keep_fraction` first
        // loses a row to binary rounding (1000 at 0.8 would target 199).
        let kept = (total_rows as f64 * keep_fraction).ceil() as u64;
        let target = total_rows.saturating_sub(kept);
        if total_rows < 2 || target == 0 {
            return Self::default();
        }
        // target < total_rows because keep_fraction > 0, so at most
        // total_rows - 1 unique values are needed and the cycle terminates.
        let mut rows: Vec<u64> = Vec::with_capacity(target as usize);
        while (rows.len() as u64) < target {
            while (rows.len() as u64) < target {
                rows.push(rng.random_range(1..total_rows));
            }
            rows.sort_unstable();
            rows.dedup();
        }
        info!("Sampling plan ready: {} of {} rows split off", rows.len(), total_rows);
        Self { rows: rows.into() }
    }

    /// Number of rows still scheduled for the secondary sink.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if no rows remain scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns true iff `row_num` is the current head of the plan, consuming
    /// the head. Heads below `row_num` (row numbers the source skipped, e.g.
    /// blank lines) are discarded so the plan cannot wedge.
    pub fn take(&mut self, row_num: u64) -> bool {
        while let Some(&head) = self.rows.front() {
            if head > row_num {
                return false;
            }
            self.rows.pop_front();
            if head == row_num {
                return true;
            }
        }
        false
    }
}
