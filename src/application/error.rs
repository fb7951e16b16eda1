//! Errors surfaced by trigger operations.

use crate::application::ports::{SinkError, StoreError};
use crate::domain::template::RenderError;
use thiserror::Error;

/// Error returned when triggering a templated event.
///
/// Store and sink failures are passed through, not retried. A failure is
/// never reported as a suppressed event.
#[derive(Debug, Error)]
pub enum Error {
    /// No template is registered under this name
    #[error("no template registered with name '{0}'")]
    UnknownTemplate(String),
    /// The template could not be rendered
    #[error(transparent)]
    Render(#[from] RenderError),
    /// The counter store failed
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The log sink failed
    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl Error {
    /// Whether this is a missing placeholder value.
    pub fn is_missing_placeholder(&self) -> bool {
        matches!(self, Error::Render(RenderError::MissingPlaceholderValue { .. }))
    }
}

/// Convenience alias for trigger results.
pub type Result<T, E = Error> = std::result::Result<T, E>;
