//! Recording sink for testing.

use crate::application::ports::{LogSink, SinkError};
use crate::domain::severity::Severity;
use std::sync::{Arc, Mutex};

/// Sink that records every message it is given.
///
/// Clones share the same record, so a test can keep one handle and give
/// another to the `LogManager`.
///
/// # Examples
///
/// ```
/// use log_manager::infrastructure::mocks::RecordingSink;
/// use log_manager::{LogSink, Severity};
///
/// let sink = RecordingSink::new();
/// sink.log("disk full", Severity::Error).unwrap();
///
/// assert_eq!(sink.calls(), vec![("disk full".to_string(), Severity::Error)]);
///
/// sink.fail_with("unavailable");
/// assert!(sink.log("dropped", Severity::Info).is_err());
/// assert_eq!(sink.count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    calls: Arc<Mutex<Vec<(String, Severity)>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self
            .failure
            .lock()
            .expect("RecordingSink mutex poisoned - a test thread panicked while holding the lock") =
            Some(message.into());
    }

    /// All recorded `(message, level)` calls, in order.
    pub fn calls(&self) -> Vec<(String, Severity)> {
        self.calls
            .lock()
            .expect("RecordingSink mutex poisoned - a test thread panicked while holding the lock")
            .clone()
    }

    /// Recorded messages at one level.
    pub fn messages_at(&self, level: Severity) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(_, l)| *l == level)
            .map(|(m, _)| m)
            .collect()
    }

    /// Number of recorded calls.
    pub fn count(&self) -> usize {
        self.calls
            .lock()
            .expect("RecordingSink mutex poisoned - a test thread panicked while holding the lock")
            .len()
    }

    /// Forget all recorded calls.
    pub fn clear(&self) {
        self.calls
            .lock()
            .expect("RecordingSink mutex poisoned - a test thread panicked while holding the lock")
            .clear();
    }
}

impl LogSink for RecordingSink {
    fn log(&self, message: &str, level: Severity) -> Result<(), SinkError> {
        let failure = self
            .failure
            .lock()
            .expect("RecordingSink mutex poisoned - a test thread panicked while holding the lock")
            .clone();
        if let Some(reason) = failure {
            return Err(SinkError::new(reason));
        }

        self.calls
            .lock()
            .expect("RecordingSink mutex poisoned - a test thread panicked while holding the lock")
            .push((message.to_string(), level));
        Ok(())
    }
}
