//! Swap queue counters.
//!
//! [`QueueMetrics`] is a snapshot of cumulative counters, taken under the
//! queue lock so the fields are consistent with each other.

/// Cumulative counters for one [`SwapQueue`](crate::SwapQueue).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueueMetrics {
    /// Events accepted into the back buffer since construction.
    pub pushed: u64,
    /// Events discarded because the back buffer was full.
    pub dropped: u64,
    /// Completed `swap_queues` calls.
    pub swaps: u64,
    /// Events currently waiting in the back buffer.
    pub pending: usize,
}

impl QueueMetrics {
    /// Fraction of offered events that were dropped, or 0 if none were
    /// offered.
    pub fn drop_ratio(&self) -> f64 {
        let offered = self.pushed + self.dropped;
        if offered == 0 {
            0.0
        } else {
            self.dropped as f64 / offered as f64
        }
    }
}
