//! Suppression gate: the windowed de-duplication decision.
//!
//! Only error-level events that are scoped to an entity are counted. The
//! counter for a (template, entity, level) triple lives in the external
//! store. The increment that creates it installs a TTL of one window. The
//! first occurrence in a window fires, and every later one is suppressed
//! until the counter expires.
//!
//! ```text
//! absent --incr--> 1 (fires, TTL set) --incr--> 2..N (suppressed)
//!    ^                                               |
//!    +------------------- TTL elapsed ---------------+
//! ```

use crate::application::metrics::Metrics;
use crate::application::ports::{CounterStore, StoreError};
use crate::domain::{key::CounterKey, severity::Severity};
use std::sync::Arc;
use std::time::Duration;

/// Decides whether an entity-scoped event should be emitted.
#[derive(Debug, Clone)]
pub struct SuppressionGate {
    store: Arc<dyn CounterStore>,
    window: Duration,
    namespace: String,
    metrics: Metrics,
}

impl SuppressionGate {
    /// Create a gate over a counter store.
    ///
    /// # Arguments
    /// * `store` - Shared counter store providing atomic increments
    /// * `window` - Suppression window, installed as each counter's TTL
    /// * `namespace` - Prefix of every counter key
    /// * `metrics` - Metrics tracker recording opened windows
    pub fn new(
        store: Arc<dyn CounterStore>,
        window: Duration,
        namespace: impl Into<String>,
        metrics: Metrics,
    ) -> Self {
        Self {
            store,
            window,
            namespace: namespace.into(),
            metrics,
        }
    }

    /// Decide whether an event should fire.
    ///
    /// Non-error levels always fire without touching the store. For error
    /// level, the counter is incremented and only the first occurrence in
    /// the current window fires.
    ///
    /// # Errors
    /// Store failures propagate unchanged. They are never turned into a
    /// suppression decision.
    ///
    /// If `expire` fails after the increment that created the counter, that
    /// counter is left without a TTL. Every later error for the triple is
    /// then suppressed until the key is deleted from the store by hand. The
    /// failure is logged at `warn` under `log_manager::gate` with the key.
    pub fn should_trigger(
        &self,
        template: &str,
        entity: &str,
        level: Severity,
    ) -> Result<bool, StoreError> {
        if !level.is_highest() {
            return Ok(true);
        }

        let key = CounterKey::new(&self.namespace, template, entity, level);
        let occurrences = self.register_occurrence(&key)?;

        let fire = occurrences <= 1;
        if !fire {
            tracing::debug!(
                target: "log_manager::gate",
                key = %key,
                occurrences,
                "suppressing repeated event within window"
            );
        }
        Ok(fire)
    }

    /// Increment the counter for `key` and open a window on first occurrence.
    fn register_occurrence(&self, key: &CounterKey) -> Result<i64, StoreError> {
        let occurrences = self.store.incr(key.as_str()).inspect_err(|e| {
            tracing::warn!(target: "log_manager::gate", error = %e, "counter increment failed");
        })?;

        if occurrences == 1 {
            self.store
                .expire(key.as_str(), self.window)
                .inspect_err(|e| {
                    tracing::warn!(
                        target: "log_manager::gate",
                        key = %key,
                        error = %e,
                        "counter expiry failed; key has no TTL until deleted"
                    );
                })?;
            self.metrics.record_window_opened();
            tracing::trace!(
                target: "log_manager::gate",
                key = %key,
                window = ?self.window,
                "opened suppression window"
            );
        }

        Ok(occurrences)
    }

    /// The suppression window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// The counter key namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}
