//! # log-manager
//!
//! Templated log events with windowed de-duplication of repeated errors.
//!
//! Register named message templates once. Then trigger them by name with a
//! severity and an optional entity and parameters. The manager renders the
//! message and forwards it to a log sink, unless it is an error that the
//! same entity already raised within the current window.
//!
//! ## Quick Start
//!
//! ```rust
//! use log_manager::{LogManager, Params};
//!
//! // Tracing sink, in-process counters, 300 second window
//! let manager = LogManager::new();
//!
//! manager.add_template("schedule_triggered", "Schedule for %{entity} triggered at %{time}");
//!
//! let params = Params::new().with("time", 1000);
//! manager.info("schedule_triggered", ("S1", params.clone())).unwrap();
//!
//! // Only the first of these reaches the sink within the window
//! manager.error("schedule_triggered", ("S1", params.clone())).unwrap();
//! manager.error("schedule_triggered", ("S1", params)).unwrap();
//! ```
//!
//! ## Trigger Forms
//!
//! Every trigger takes an [`EventContext`], which converts from the four
//! call shapes:
//!
//! | Argument | Context | Suppressible |
//! |----------|---------|--------------|
//! | `()` | no entity, no params | no |
//! | `"entity"` | entity only | errors only |
//! | `Params` | params only | no |
//! | `("entity", Params)` | both | errors only |
//!
//! The entity is also available to the template as `%{entity}`. It takes
//! precedence over an `entity` key in the params.
//!
//! ## Suppression
//!
//! Only error-level events that carry an entity are counted. The counter key
//! is `log_manager:{entity}:{template}:{level}`. It lives in a
//! [`CounterStore`]:
//! - The increment that creates a counter installs a TTL of one window, and
//!   that occurrence is emitted.
//! - Later occurrences are suppressed until the TTL elapses. The next one
//!   then opens a new window.
//!
//! Debug, info and warn events are never counted and never suppressed.
//!
//! Use [`InMemoryCounterStore`] (the default) within one process. With the
//! `redis-storage` feature, `RedisCounterStore` shares windows across
//! processes:
//!
//! ```rust,ignore
//! use log_manager::{LogManager, RedisCounterStore};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let store = RedisCounterStore::connect("redis://127.0.0.1/").await?;
//! let manager = LogManager::builder()
//!     .with_store(Arc::new(store))
//!     .with_window(Duration::from_secs(600))
//!     .build()?;
//! ```
//!
//! ## Errors
//!
//! Triggers return [`Error`]:
//! - `UnknownTemplate` for names that were never registered.
//! - `Render` when a placeholder has no value.
//! - `Store` and `Sink` for collaborator failures, passed through unchanged.
//!
//! A store failure is never read as "suppress".
//!
//! ## Observability
//!
//! ```rust
//! # use log_manager::LogManager;
//! # let manager = LogManager::new();
//! let snapshot = manager.metrics().snapshot();
//! println!("emitted: {}", snapshot.events_emitted);
//! println!("suppressed: {}", snapshot.events_suppressed);
//! println!("suppression rate: {:.2}%", snapshot.suppression_rate() * 100.0);
//! ```

// Domain layer - pure logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - external adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    context::{EventContext, Params},
    key::{CounterKey, DEFAULT_NAMESPACE},
    severity::{ParseSeverityError, Severity},
    template::{RenderError, Template},
};

pub use application::{
    error::{Error, Result},
    gate::SuppressionGate,
    metrics::{Metrics, MetricsSnapshot},
    ports::{BoxError, Clock, CounterStore, LogSink, SinkError, StoreError},
    registry::TemplateRegistry,
};

pub use infrastructure::{
    clock::SystemClock,
    config::{LogManagerConfig, DEFAULT_WINDOW_SECS},
    manager::{BuildError, LogManager, LogManagerBuilder},
    memory_store::InMemoryCounterStore,
    sink::TracingSink,
    storage::ShardedStorage,
};

#[cfg(feature = "redis-storage")]
pub use infrastructure::redis_store::RedisCounterStore;
