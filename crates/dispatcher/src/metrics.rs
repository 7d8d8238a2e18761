//! Dispatch metrics for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for a single dispatcher
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Packets handled successfully
    handled: AtomicU64,
    /// Handler failures contained by the isolation boundary
    handler_failures: AtomicU64,
    /// Packets with no registered handler
    routing_misses: AtomicU64,
    /// Engine-level faults raised to the caller
    internal_faults: AtomicU64,
}

impl DispatchMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get handled count
    pub fn handled(&self) -> u64 {
        self.handled.load(Ordering::Relaxed)
    }

    /// Increment handled count
    pub fn inc_handled(&self) {
        self.handled.fetch_add(1, Ordering::Relaxed);
    }

    /// Get handler failure count
    pub fn handler_failures(&self) -> u64 {
        self.handler_failures.load(Ordering::Relaxed)
    }

    /// Increment handler failure count
    pub fn inc_handler_failures(&self) {
        self.handler_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get routing miss count
    pub fn routing_misses(&self) -> u64 {
        self.routing_misses.load(Ordering::Relaxed)
    }

    /// Increment routing miss count
    pub fn inc_routing_misses(&self) {
        self.routing_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Get internal fault count
    pub fn internal_faults(&self) -> u64 {
        self.internal_faults.load(Ordering::Relaxed)
    }

    /// Increment internal fault count
    pub fn inc_internal_faults(&self) {
        self.internal_faults.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            handled: self.handled(),
            handler_failures: self.handler_failures(),
            routing_misses: self.routing_misses(),
            internal_faults: self.internal_faults(),
        }
    }
}

/// Snapshot of dispatch metrics (for reporting)
#[derive(Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    pub handled: u64,
    pub handler_failures: u64,
    pub routing_misses: u64,
    pub internal_faults: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_counters() {
        let metrics = DispatchMetrics::new();
        metrics.inc_handled();
        metrics.inc_handled();
        metrics.inc_routing_misses();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.handled, 2);
        assert_eq!(snapshot.routing_misses, 1);
        assert_eq!(snapshot.handler_failures, 0);
        assert_eq!(snapshot.internal_faults, 0);
    }
}
