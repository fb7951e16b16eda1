//! The log manager: templates, suppression and delivery wired together.
//!
//! A [`LogManager`] is built once at startup and passed (or cloned) to the
//! code that emits events. It owns the template registry and a suppression
//! gate over the configured counter store, and it forwards rendered messages
//! to the configured sink.

use crate::application::{
    error::Error,
    gate::SuppressionGate,
    metrics::Metrics,
    ports::{CounterStore, LogSink, StoreError},
    registry::TemplateRegistry,
};
use crate::domain::{context::EventContext, severity::Severity, template::Template};
use crate::infrastructure::config::LogManagerConfig;
use crate::infrastructure::memory_store::InMemoryCounterStore;
use crate::infrastructure::sink::TracingSink;

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error as ThisError;

/// Shortest accepted suppression window.
const MIN_WINDOW: Duration = Duration::from_secs(1);

/// Error returned when building a LogManager fails.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum BuildError {
    /// Windows must be at least one second
    #[error("suppression window must be at least one second, got {0:?}")]
    WindowTooShort(Duration),
    /// Counter keys need a namespace
    #[error("counter key namespace must not be empty")]
    EmptyNamespace,
}

/// Builder for constructing a `LogManager`.
#[derive(Debug)]
pub struct LogManagerBuilder {
    window: Duration,
    namespace: String,
    sink: Option<Arc<dyn LogSink>>,
    store: Option<Arc<dyn CounterStore>>,
}

impl Default for LogManagerBuilder {
    fn default() -> Self {
        let config = LogManagerConfig::default();
        Self {
            window: config.window(),
            namespace: config.namespace,
            sink: None,
            store: None,
        }
    }
}

impl LogManagerBuilder {
    /// Set the sink that receives rendered messages.
    ///
    /// Default: [`TracingSink`]
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Set the counter store backing the suppression gate.
    ///
    /// Use a shared store such as `RedisCounterStore` to suppress across
    /// processes.
    ///
    /// Default: [`InMemoryCounterStore`] on the system clock
    pub fn with_store(mut self, store: Arc<dyn CounterStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the suppression window for repeated error events.
    ///
    /// Must be at least one second; it will be validated when `build()` is
    /// called. Sub-second parts are kept.
    ///
    /// Default: 300 seconds
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Set the prefix of every counter key.
    ///
    /// Default: `log_manager`
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Apply a loaded configuration, replacing window and namespace.
    pub fn with_config(mut self, config: LogManagerConfig) -> Self {
        self.window = config.window();
        self.namespace = config.namespace;
        self
    }

    /// Build the manager.
    ///
    /// # Errors
    /// Returns `BuildError` if the configuration is invalid.
    pub fn build(self) -> Result<LogManager, BuildError> {
        if self.window < MIN_WINDOW {
            return Err(BuildError::WindowTooShort(self.window));
        }
        if self.namespace.is_empty() {
            return Err(BuildError::EmptyNamespace);
        }

        let metrics = Metrics::new();
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(InMemoryCounterStore::new()));
        let sink = self.sink.unwrap_or_else(|| Arc::new(TracingSink::new()));
        let gate = SuppressionGate::new(store, self.window, self.namespace, metrics.clone());

        Ok(LogManager {
            registry: TemplateRegistry::new(),
            gate,
            sink,
            metrics,
        })
    }
}

/// Renders templated events and forwards them to a sink, suppressing
/// repeated entity-scoped errors within a window.
///
/// Clones share templates, counters, sink and metrics.
///
/// # Example
///
/// ```
/// use log_manager::{LogManager, Params};
/// use log_manager::infrastructure::mocks::RecordingSink;
/// use std::sync::Arc;
///
/// let sink = RecordingSink::new();
/// let manager = LogManager::builder()
///     .with_sink(Arc::new(sink.clone()))
///     .build()
///     .unwrap();
///
/// manager.add_template("job_failed", "Job %{entity} failed: %{reason}");
///
/// let params = Params::new().with("reason", "timeout");
/// manager.error("job_failed", ("job-42", params.clone())).unwrap();
/// manager.error("job_failed", ("job-42", params)).unwrap();
///
/// // The repeated error inside the window was suppressed
/// assert_eq!(sink.count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct LogManager {
    registry: TemplateRegistry,
    gate: SuppressionGate,
    sink: Arc<dyn LogSink>,
    metrics: Metrics,
}

impl LogManager {
    /// Create a manager with default settings.
    ///
    /// Uses [`TracingSink`], an in-process counter store and a 300 second
    /// window.
    pub fn new() -> Self {
        Self::builder()
            .build()
            .expect("default configuration is always valid")
    }

    /// Create a builder for configuring the manager.
    pub fn builder() -> LogManagerBuilder {
        LogManagerBuilder::default()
    }

    /// Register a template, replacing any template with the same name.
    pub fn add_template(&self, name: impl Into<String>, pattern: impl Into<String>) -> Arc<Template> {
        let template = self.registry.add(name, pattern);
        tracing::debug!(
            target: "log_manager::manager",
            template = template.name(),
            "registered template"
        );
        template
    }

    /// Look up a registered template.
    pub fn find_template(&self, name: &str) -> Option<Arc<Template>> {
        self.registry.find(name)
    }

    /// Remove every registered template.
    pub fn clear_templates(&self) {
        self.registry.clear();
    }

    /// Number of registered templates.
    pub fn template_count(&self) -> usize {
        self.registry.len()
    }

    /// Ask the suppression gate whether an event should fire.
    pub fn should_trigger(
        &self,
        template: &str,
        entity: &str,
        level: Severity,
    ) -> Result<bool, StoreError> {
        self.gate.should_trigger(template, entity, level)
    }

    /// Trigger a registered template.
    ///
    /// # Errors
    /// - [`Error::UnknownTemplate`] if no template has this name; the sink
    ///   is not called
    /// - [`Error::Render`] if a placeholder has no value
    /// - [`Error::Store`] / [`Error::Sink`] as raised by the collaborators
    pub fn trigger(
        &self,
        level: Severity,
        name: &str,
        context: impl Into<EventContext>,
    ) -> Result<(), Error> {
        let template = self
            .registry
            .find(name)
            .ok_or_else(|| Error::UnknownTemplate(name.to_string()))?;
        self.trigger_template(&template, level, context)
    }

    /// Trigger a template directly.
    ///
    /// Entity-scoped events consult the suppression gate first; a suppressed
    /// event is neither rendered nor sent. Events without an entity always
    /// proceed.
    pub fn trigger_template(
        &self,
        template: &Template,
        level: Severity,
        context: impl Into<EventContext>,
    ) -> Result<(), Error> {
        let context = context.into();

        if let Some(entity) = context.entity() {
            if !self.gate.should_trigger(template.name(), entity, level)? {
                self.metrics.record_suppressed();
                return Ok(());
            }
        }

        let message = template.render(context.entity(), context.params())?;
        self.sink.log(&message, level)?;
        self.metrics.record_emitted();
        Ok(())
    }

    /// Trigger a template at debug level.
    pub fn debug(&self, name: &str, context: impl Into<EventContext>) -> Result<(), Error> {
        self.trigger(Severity::Debug, name, context)
    }

    /// Trigger a template at info level.
    pub fn info(&self, name: &str, context: impl Into<EventContext>) -> Result<(), Error> {
        self.trigger(Severity::Info, name, context)
    }

    /// Trigger a template at warn level.
    pub fn warn(&self, name: &str, context: impl Into<EventContext>) -> Result<(), Error> {
        self.trigger(Severity::Warn, name, context)
    }

    /// Trigger a template at error level.
    ///
    /// Repeats for the same entity within the window are suppressed.
    pub fn error(&self, name: &str, context: impl Into<EventContext>) -> Result<(), Error> {
        self.trigger(Severity::Error, name, context)
    }

    /// Get the metrics tracker.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// The suppression window.
    pub fn window(&self) -> Duration {
        self.gate.window()
    }

    /// The counter key namespace.
    pub fn namespace(&self) -> &str {
        self.gate.namespace()
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
