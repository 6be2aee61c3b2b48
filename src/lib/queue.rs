//! Mutex-guarded FIFO queues for pipeline flow control.
//!
//! Each queue owns exactly one lock; the pending-work queue and the two
//! output queues never share one, so a busy writer cannot stall the source.
//! The queue itself enforces no capacity limit; flow control lives in the
//! source stage's watermark throttle.

use parking_lot::Mutex;
use std::collections::VecDeque;

use crate::row::Row;

/// Thread-safe FIFO of pending rows.
#[derive(Default)]
pub struct RowQueue {
    inner: Mutex<VecDeque<Row>>,
}

impl RowQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row to the tail.
    pub fn push(&self, row: Row) {
        self.inner.lock().push_back(row);
    }

    /// Removes and returns the head row, or `None` if the queue is empty.
    pub fn pop(&self) -> Option<Row> {
        self.inner.lock().pop_front()
    }

    /// Current number of queued rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// True if no rows are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
