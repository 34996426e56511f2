//! Metrics registry
//!
//! Monotonic counters, reset only on process start. Relaxed atomics: the
//! values are exact per counter but not a consistent cut across counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operation counters for the item service
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Successful list/read calls
    reads: AtomicU64,
    /// Successful create/replace/delete calls
    writes: AtomicU64,
    /// Items created
    items_created: AtomicU64,
    /// Items deleted
    items_deleted: AtomicU64,
    /// Calls rejected with a client error (not found, exists, invalid)
    rejected: AtomicU64,
    /// Calls failed with an internal error
    failures: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_reads(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_writes(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_items_created(&self) {
        self.items_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_items_deleted(&self) {
        self.items_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_failures(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            reads: self.reads.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            items_created: self.items_created.load(Ordering::Relaxed),
            items_deleted: self.items_deleted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub reads: u64,
    pub writes: u64,
    pub items_created: u64,
    pub items_deleted: u64,
    pub rejected: u64,
    pub failures: u64,
}
