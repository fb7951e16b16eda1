//! Wall-clock source for counter expiry.
//!
//! [`InMemoryCounterStore`](crate::InMemoryCounterStore) compares each
//! counter's deadline against a [`Clock`]. Production code uses
//! [`SystemClock`]; tests swap in `mocks::MockClock` to step over windows.

use crate::application::ports::Clock;
use std::time::Instant;

/// Monotonic clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a system clock.
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
