//! Controllable clock for expiring counters in tests.

use crate::application::ports::Clock;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Clock that only moves when told to.
///
/// Hand a clone to [`InMemoryCounterStore::with_clock`] and keep one in the
/// test: advancing it past a window makes the store treat the counter as
/// gone.
///
/// ```
/// use log_manager::infrastructure::mocks::MockClock;
/// use log_manager::{CounterStore, InMemoryCounterStore};
/// use std::sync::Arc;
/// use std::time::{Duration, Instant};
///
/// let clock = MockClock::new(Instant::now());
/// let store = InMemoryCounterStore::with_clock(Arc::new(clock.clone()));
///
/// store.incr("log_manager:S1:scheduled:error").unwrap();
/// store.expire("log_manager:S1:scheduled:error", Duration::from_secs(300)).unwrap();
///
/// clock.advance(Duration::from_secs(300));
/// assert_eq!(store.incr("log_manager:S1:scheduled:error").unwrap(), 1);
/// ```
///
/// [`InMemoryCounterStore::with_clock`]: crate::InMemoryCounterStore::with_clock
#[derive(Debug, Clone)]
pub struct MockClock {
    now: Arc<Mutex<Instant>>,
}

impl MockClock {
    /// Start the clock at `start`.
    pub fn new(start: Instant) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Move time forward; every clone sees the change.
    pub fn advance(&self, by: Duration) {
        *self.lock() += by;
    }

    /// Jump to an exact instant.
    pub fn set(&self, instant: Instant) {
        *self.lock() = instant;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Instant> {
        self.now
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock")
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        *self.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_and_set() {
        let start = Instant::now();
        let clock = MockClock::new(start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::from_secs(10));
        assert_eq!(clock.now(), start + Duration::from_secs(10));

        clock.set(start);
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn test_clones_share_time() {
        let start = Instant::now();
        let clock = MockClock::new(start);
        let handle = clock.clone();

        std::thread::spawn(move || handle.advance(Duration::from_secs(5)))
            .join()
            .unwrap();

        assert_eq!(clock.now(), start + Duration::from_secs(5));
    }
}
