//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the application
//! layer needs. Infrastructure adapters implement these ports.

use crate::domain::severity::Severity;
use std::error::Error as StdError;
use std::fmt::Debug;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Boxed error raised by a store or sink backend.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A counter store operation failed.
///
/// Carries the backend's error as its source, unchanged.
#[derive(Debug, Error)]
#[error("counter store {operation} failed for key '{key}'")]
pub struct StoreError {
    /// The store operation that failed (`incr` or `expire`)
    pub operation: &'static str,
    /// The key the operation targeted
    pub key: String,
    #[source]
    source: BoxError,
}

impl StoreError {
    /// Wrap a backend error.
    pub fn new(operation: &'static str, key: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            operation,
            key: key.into(),
            source: source.into(),
        }
    }
}

/// A log sink rejected a message.
#[derive(Debug, Error)]
#[error("log sink failed: {source}")]
pub struct SinkError {
    #[source]
    source: BoxError,
}

impl SinkError {
    /// Wrap whatever the sink raised.
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// Port for the shared occurrence-counter store.
///
/// Implementations must make `incr` atomic: concurrent increments of one key
/// observe a gap-free sequence of values. `expire` need not be atomic with
/// `incr`.
pub trait CounterStore: Send + Sync + Debug {
    /// Atomically increment the integer at `key`, creating it at 1 if absent.
    ///
    /// # Returns
    /// The value after the increment
    fn incr(&self, key: &str) -> Result<i64, StoreError>;

    /// Set the time-to-live of `key`.
    ///
    /// A missing key is not an error; the call has no effect.
    fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError>;
}

/// Port for the underlying logger.
pub trait LogSink: Send + Sync + Debug {
    /// Emit a rendered message at a severity.
    fn log(&self, message: &str, level: Severity) -> Result<(), SinkError>;
}

/// Port for obtaining current time.
///
/// This abstraction lets time-based adapters work without depending on
/// the system clock. Infrastructure provides `SystemClock` and `MockClock`.
pub trait Clock: Send + Sync + Debug {
    /// Get the current instant.
    fn now(&self) -> Instant;
}
