//! Serializable manager configuration.
//!
//! Only plain settings live here. The sink and store are objects and are
//! wired through [`LogManagerBuilder`](crate::LogManagerBuilder).

use crate::domain::key::DEFAULT_NAMESPACE;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default suppression window, in seconds.
pub const DEFAULT_WINDOW_SECS: u64 = 300;

/// Settings for a [`LogManager`](crate::LogManager).
///
/// Missing fields fall back to their defaults when deserializing, so the
/// struct can be embedded in an application's own config file:
///
/// ```
/// use log_manager::LogManagerConfig;
///
/// let config: LogManagerConfig = serde_json::from_str(r#"{ "window_secs": 60 }"#).unwrap();
/// assert_eq!(config.window_secs, 60);
/// assert_eq!(config.namespace, "log_manager");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogManagerConfig {
    /// Suppression window for repeated error events, in seconds
    pub window_secs: u64,
    /// Prefix of every counter key in the store
    pub namespace: String,
}

impl LogManagerConfig {
    /// The window as a duration.
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl Default for LogManagerConfig {
    fn default() -> Self {
        Self {
            window_secs: DEFAULT_WINDOW_SECS,
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}
