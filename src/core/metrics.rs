//! Logger metrics for observability
//!
//! Provides counters for monitoring pipeline health: how many records were
//! accepted into the buffer, rejected by backpressure, handed to printers,
//! and how many printer calls failed.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use buffered_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_rejected();
/// metrics.record_dispatched();
///
/// assert_eq!(metrics.rejected_count(), 1);
/// assert_eq!(metrics.dispatched_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records accepted into the buffer queue
    accepted: AtomicU64,

    /// Records rejected by a full or closing buffer
    rejected: AtomicU64,

    /// Records handed to the printers
    dispatched: AtomicU64,

    /// Individual printer calls that errored or panicked
    printer_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            accepted: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            dispatched: AtomicU64::new(0),
            printer_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn accepted_count(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rejected_count(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dispatched_count(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn printer_failures(&self) -> u64 {
        self.printer_failures.load(Ordering::Relaxed)
    }

    /// Record a buffered push that succeeded; returns the previous count
    #[inline]
    pub fn record_accepted(&self) -> u64 {
        self.accepted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rejected(&self) -> u64 {
        self.rejected.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_printer_failure(&self) -> u64 {
        self.printer_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Rejected pushes as a percentage of all buffered attempts (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing was pushed.
    pub fn rejection_rate(&self) -> f64 {
        let rejected = self.rejected_count() as f64;
        let total = self.accepted_count() as f64 + rejected;
        if total == 0.0 {
            0.0
        } else {
            (rejected / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.accepted.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
        self.dispatched.store(0, Ordering::Relaxed);
        self.printer_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            accepted: AtomicU64::new(self.accepted_count()),
            rejected: AtomicU64::new(self.rejected_count()),
            dispatched: AtomicU64::new(self.dispatched_count()),
            printer_failures: AtomicU64::new(self.printer_failures()),
        }
    }
}
