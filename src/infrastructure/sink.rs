//! Log sink adapters.

use crate::application::ports::{LogSink, SinkError};
use crate::domain::severity::Severity;

/// Sink that emits rendered messages as `tracing` events.
///
/// Events are emitted under target `log_manager` at the matching level, with
/// the rendered text as the event message. Delivery never fails; filtering
/// and formatting are up to the installed subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Create a tracing sink.
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn log(&self, message: &str, level: Severity) -> Result<(), SinkError> {
        match level {
            Severity::Debug => tracing::debug!(target: "log_manager", "{}", message),
            Severity::Info => tracing::info!(target: "log_manager", "{}", message),
            Severity::Warn => tracing::warn!(target: "log_manager", "{}", message),
            Severity::Error => tracing::error!(target: "log_manager", "{}", message),
        }
        Ok(())
    }
}
