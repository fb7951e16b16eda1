//! Application layer - orchestration of domain logic.
//!
//! This layer coordinates the domain logic and owns the runtime decisions:
//! - Template registry (named templates)
//! - Suppression gate (windowed de-duplication)
//! - Metrics
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters must implement. This keeps the application layer independent
//! from infrastructure details.

pub mod error;
pub mod gate;
pub mod metrics;
pub mod ports;
pub mod registry;
