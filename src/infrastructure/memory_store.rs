//! In-process counter store.
//!
//! Provides atomic per-key increments with TTL expiry, evaluated lazily
//! against a [`Clock`]. Suitable for single-process deployments and tests;
//! use `RedisCounterStore` to share counters between processes.

use crate::application::ports::{Clock, CounterStore, StoreError};
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::storage::ShardedStorage;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default)]
struct CounterEntry {
    count: i64,
    expires_at: Option<Instant>,
}

impl CounterEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Counter store held in process memory.
///
/// Expired counters behave as absent: the next increment starts again at 1.
/// Expired entries are dropped lazily on access, or eagerly with
/// [`purge_expired`](Self::purge_expired).
#[derive(Debug)]
pub struct InMemoryCounterStore {
    counters: ShardedStorage<String, CounterEntry>,
    clock: Arc<dyn Clock>,
}

impl InMemoryCounterStore {
    /// Create a store using the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock::new()))
    }

    /// Create a store using a custom clock (mainly for testing).
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            counters: ShardedStorage::new(),
            clock,
        }
    }

    /// Current value of a live counter, without incrementing it.
    pub fn get(&self, key: &str) -> Option<i64> {
        let now = self.clock.now();
        self.counters
            .get_cloned(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.count)
    }

    /// Remaining time-to-live of a live counter.
    ///
    /// `None` if the counter is absent, expired, or has no TTL.
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        let now = self.clock.now();
        self.counters
            .get_cloned(key)
            .filter(|entry| !entry.is_expired(now))
            .and_then(|entry| entry.expires_at)
            .map(|at| at.saturating_duration_since(now))
    }

    /// Drop every expired counter.
    pub fn purge_expired(&self) {
        let now = self.clock.now();
        self.counters.retain(|_, entry| !entry.is_expired(now));
    }

    /// Number of stored counters, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Check if no counters are stored.
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Drop all counters.
    pub fn clear(&self) {
        self.counters.clear();
    }
}

impl Default for InMemoryCounterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterStore for InMemoryCounterStore {
    fn incr(&self, key: &str) -> Result<i64, StoreError> {
        let now = self.clock.now();
        let count = self.counters.with_entry_mut(key.to_string(), CounterEntry::default, |entry| {
            if entry.is_expired(now) {
                *entry = CounterEntry::default();
            }
            entry.count += 1;
            entry.count
        });
        Ok(count)
    }

    fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        let now = self.clock.now();
        let expired = self
            .counters
            .with_existing_mut(key, |entry| {
                if entry.is_expired(now) {
                    true
                } else {
                    // A TTL past the clock's range never elapses
                    entry.expires_at = now.checked_add(ttl);
                    false
                }
            })
            .unwrap_or(false);

        if expired {
            self.counters.remove(key);
        }
        Ok(())
    }
}
