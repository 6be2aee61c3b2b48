//! Buffer budget arithmetic shared by every command.

/// Default configured buffer budget in bytes.
pub const DEFAULT_BUFFER_BYTES: u64 = 1_000_000_000;

/// Fixed overhead subtracted from the configured budget.
const BUFFER_OVERHEAD_BYTES: u64 = 20_000_000;

/// Smallest effective budget the pipeline will run with.
const MIN_BUFFER_BYTES: u64 = 16_000_000;

/// Converts a configured buffer size into the effective byte budget the
/// source's watermark throttle compares against: overhead comes off the top
/// and the result is floored at 16 MB.
#[must_use]
pub fn effective_buffer_budget(configured: u64) -> u64 {
    configured.saturating_sub(BUFFER_OVERHEAD_BYTES).max(MIN_BUFFER_BYTES)
}
