//! Domain layer - pure logic with no I/O.
//!
//! This layer contains the core concepts of templated events:
//! - Severity levels
//! - Event context (entity and parameters)
//! - Templates and rendering
//! - Counter key construction
//!
//! All types in this layer are pure and easily testable.

pub mod context;
pub mod key;
pub mod severity;
pub mod template;
