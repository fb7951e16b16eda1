//! Redis-backed counter store.
//!
//! Shares occurrence counters between processes, so an error repeated on
//! several replicas is still only emitted once per window.
//!
//! ## Architecture
//!
//! - Keys: counter keys as built by the suppression gate
//!   (`log_manager:{entity}:{template}:{level}` by default)
//! - Values: plain integers maintained by `INCR`
//! - TTL: installed with `PEXPIRE` when a counter is created
//!
//! `INCR` and `PEXPIRE` are each atomic; they are issued as two commands.
//! Only the caller whose `INCR` returned 1 sets the TTL.
//!
//! ## Runtime
//!
//! The store port is synchronous. Inside a multi-threaded Tokio runtime the
//! commands run via `block_in_place`. Outside any runtime they run on a
//! fallback runtime that the store creates on first use and keeps for its
//! lifetime (shared by clones). A current-thread runtime cannot be blocked
//! and yields a `StoreError`.
//!
//! The connection's background tasks live on the runtime that called
//! [`RedisCounterStore::connect`], so that runtime must outlive the store.
//! Once the fallback runtime exists, drop the last handle outside async
//! code: Tokio refuses to shut a runtime down from within another.
//!
//! ## Example
//!
//! ```rust,ignore
//! use log_manager::{LogManager, RedisCounterStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = RedisCounterStore::connect("redis://127.0.0.1/")
//!         .await
//!         .expect("Failed to connect to Redis");
//!
//!     let manager = LogManager::builder()
//!         .with_store(Arc::new(store))
//!         .build()
//!         .unwrap();
//! }
//! ```

use crate::application::ports::{CounterStore, StoreError};
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError};
use std::fmt;
use std::future::Future;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use tokio::sync::RwLock;

/// Redis-backed counter store for cross-process suppression.
pub struct RedisCounterStore {
    connection: Arc<RwLock<ConnectionManager>>,
    fallback: Arc<OnceLock<Runtime>>,
}

impl fmt::Debug for RedisCounterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCounterStore").finish_non_exhaustive()
    }
}

impl Clone for RedisCounterStore {
    fn clone(&self) -> Self {
        Self {
            connection: Arc::clone(&self.connection),
            fallback: Arc::clone(&self.fallback),
        }
    }
}

impl RedisCounterStore {
    /// Connect to Redis.
    ///
    /// # Arguments
    /// * `url` - Redis connection URL (e.g., "redis://127.0.0.1/")
    ///
    /// # Errors
    /// Returns error if connection fails.
    pub async fn connect(url: &str) -> Result<Self, RedisError> {
        let client = Client::open(url)?;
        let connection = ConnectionManager::new(client).await?;

        Ok(Self {
            connection: Arc::new(RwLock::new(connection)),
            fallback: Arc::new(OnceLock::new()),
        })
    }

    /// Atomically increment a counter.
    pub async fn incr_async(&self, key: &str) -> Result<i64, RedisError> {
        let mut conn = self.connection.write().await;
        conn.incr(key, 1_i64).await
    }

    /// Set a counter's TTL, with millisecond precision.
    pub async fn expire_async(&self, key: &str, ttl: Duration) -> Result<(), RedisError> {
        let mut conn = self.connection.write().await;
        let millis = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        let _: bool = conn.pexpire(key, millis).await?;
        Ok(())
    }

    /// Remaining TTL of a counter.
    ///
    /// `None` if the key is missing or has no expiry.
    pub async fn ttl(&self, key: &str) -> Result<Option<Duration>, RedisError> {
        let mut conn = self.connection.write().await;
        let millis: i64 = conn.pttl(key).await?;
        Ok(u64::try_from(millis).ok().map(Duration::from_millis))
    }

    /// Delete every key starting with `prefix`.
    ///
    /// Uses `SCAN`, so it is safe on large keyspaces but not atomic.
    pub async fn clear_prefix(&self, prefix: &str) -> Result<(), RedisError> {
        let pattern = format!("{}*", prefix);
        let mut conn = self.connection.write().await;
        let mut cursor = 0_u64;

        loop {
            let (new_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut *conn)
                .await?;

            if !keys.is_empty() {
                let _: () = conn.del(&keys).await?;
            }

            if new_cursor == 0 {
                return Ok(());
            }
            cursor = new_cursor;
        }
    }

    /// Run an async command from the sync store port.
    fn block_on<F, T>(&self, operation: &'static str, key: &str, command: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, RedisError>>,
    {
        let result = match Handle::try_current() {
            Ok(handle) => {
                if handle.runtime_flavor() == RuntimeFlavor::CurrentThread {
                    return Err(StoreError::new(
                        operation,
                        key,
                        "RedisCounterStore needs a multi-threaded Tokio runtime",
                    ));
                }
                tokio::task::block_in_place(|| handle.block_on(command))
            }
            Err(_) => self.fallback_runtime(operation, key)?.block_on(command),
        };

        result.map_err(|e| StoreError::new(operation, key, e))
    }

    /// The runtime used when called from outside Tokio, created once.
    fn fallback_runtime(&self, operation: &'static str, key: &str) -> Result<&Runtime, StoreError> {
        if let Some(rt) = self.fallback.get() {
            return Ok(rt);
        }
        let rt = Runtime::new().map_err(|e| StoreError::new(operation, key, e))?;
        // A concurrent caller may have won; the spare runtime is dropped
        Ok(self.fallback.get_or_init(|| rt))
    }
}

impl CounterStore for RedisCounterStore {
    fn incr(&self, key: &str) -> Result<i64, StoreError> {
        self.block_on("incr", key, self.incr_async(key))
    }

    fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        self.block_on("expire", key, self.expire_async(key, ttl))
    }
}
