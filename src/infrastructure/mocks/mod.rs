//! Mock implementations for testing.
//!
//! This module provides test doubles for the ports, enabling controlled
//! testing of suppression windows and sink delivery.

pub mod clock;
pub mod layer;
pub mod sink;

pub use clock::MockClock;
pub use layer::{CapturedEvent, MockCaptureLayer};
pub use sink::RecordingSink;
