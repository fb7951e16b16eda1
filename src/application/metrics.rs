//! Observability metrics for templated events.
//!
//! Provides counters about emission and suppression for monitoring and debugging.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics tracking emission and suppression statistics.
///
/// All metrics use atomic operations for thread-safe updates and reads.
/// Clones share the same counters.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug)]
struct MetricsInner {
    /// Messages delivered to the sink
    events_emitted: AtomicU64,
    /// Events the suppression gate turned away
    events_suppressed: AtomicU64,
    /// Counters created in the store (first occurrence in a window)
    windows_opened: AtomicU64,
}

impl Metrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                events_emitted: AtomicU64::new(0),
                events_suppressed: AtomicU64::new(0),
                windows_opened: AtomicU64::new(0),
            }),
        }
    }

    pub(crate) fn record_emitted(&self) {
        self.inner.events_emitted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_suppressed(&self) {
        self.inner.events_suppressed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_window_opened(&self) {
        self.inner.windows_opened.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the total number of messages delivered to the sink.
    pub fn events_emitted(&self) -> u64 {
        self.inner.events_emitted.load(Ordering::Relaxed)
    }

    /// Get the total number of suppressed events.
    pub fn events_suppressed(&self) -> u64 {
        self.inner.events_suppressed.load(Ordering::Relaxed)
    }

    /// Get the number of suppression windows opened.
    pub fn windows_opened(&self) -> u64 {
        self.inner.windows_opened.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            events_emitted: self.events_emitted(),
            events_suppressed: self.events_suppressed(),
            windows_opened: self.windows_opened(),
        }
    }

    /// Reset all metrics to zero.
    pub fn reset(&self) {
        self.inner.events_emitted.store(0, Ordering::Relaxed);
        self.inner.events_suppressed.store(0, Ordering::Relaxed);
        self.inner.windows_opened.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Messages delivered to the sink
    pub events_emitted: u64,
    /// Events the suppression gate turned away
    pub events_suppressed: u64,
    /// Suppression windows opened
    pub windows_opened: u64,
}

impl MetricsSnapshot {
    /// Calculate the suppression rate (0.0 to 1.0).
    ///
    /// Returns 0.0 if no events have been processed.
    pub fn suppression_rate(&self) -> f64 {
        let total = self.total_events();
        if total == 0 {
            0.0
        } else {
            self.events_suppressed as f64 / total as f64
        }
    }

    /// Get the total number of events processed (emitted + suppressed).
    pub fn total_events(&self) -> u64 {
        self.events_emitted.saturating_add(self.events_suppressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_initial_state() {
        let metrics = Metrics::new();
        assert_eq!(metrics.events_emitted(), 0);
        assert_eq!(metrics.events_suppressed(), 0);
        assert_eq!(metrics.windows_opened(), 0);
    }

    #[test]
    fn test_snapshot() {
        let metrics = Metrics::new();
        metrics.record_emitted();
        metrics.record_emitted();
        metrics.record_suppressed();
        metrics.record_window_opened();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.events_emitted, 2);
        assert_eq!(snapshot.events_suppressed, 1);
        assert_eq!(snapshot.windows_opened, 1);
        assert_eq!(snapshot.total_events(), 3);
    }

    #[test]
    fn test_snapshot_suppression_rate() {
        let metrics = Metrics::new();
        assert_eq!(metrics.snapshot().suppression_rate(), 0.0);

        metrics.record_emitted();
        metrics.record_suppressed();
        assert!((metrics.snapshot().suppression_rate() - 0.5).abs() < f64::EPSILON);

        metrics.record_suppressed();
        metrics.record_suppressed();
        assert!((metrics.snapshot().suppression_rate() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset() {
        let metrics = Metrics::new();
        metrics.record_emitted();
        metrics.record_suppressed();
        metrics.record_window_opened();

        metrics.reset();
        assert_eq!(metrics.snapshot(), Metrics::new().snapshot());
    }

    #[test]
    fn test_metrics_clone_shares_counters() {
        let metrics1 = Metrics::new();
        metrics1.record_emitted();

        let metrics2 = metrics1.clone();
        metrics2.record_emitted();

        assert_eq!(metrics1.events_emitted(), 2);
        assert_eq!(metrics2.events_emitted(), 2);
    }

    #[test]
    fn test_concurrent_updates() {
        use std::thread;

        let metrics = Metrics::new();
        let mut handles = vec![];

        for _ in 0..10 {
            let m = metrics.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    m.record_emitted();
                    m.record_suppressed();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(metrics.events_emitted(), 1000);
        assert_eq!(metrics.events_suppressed(), 1000);
    }
}
