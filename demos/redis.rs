//! Example demonstrating Redis-backed counters for shared suppression.
//!
//! Several processes pointing at the same Redis share their suppression
//! windows, so an error repeated on every replica is emitted once.
//!
//! # Quick Start
//!
//! 1. Start Redis:
//!    ```bash
//!    docker run -p 6379:6379 redis:7-alpine
//!    ```
//!
//! 2. Run the example (from project root):
//!    ```bash
//!    cargo run --example redis --features redis-storage
//!    ```
//!
//! Run it in two terminals at the same time: only one of them prints the
//! `job_failed` error for each entity within the window.

use log_manager::{LogManager, Params, RedisCounterStore};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let store = RedisCounterStore::connect("redis://127.0.0.1:6379").await?;

    let manager = LogManager::builder()
        .with_store(Arc::new(store))
        .with_namespace("log_manager_demo")
        .with_window(Duration::from_secs(30))
        .build()?;

    manager.add_template("job_failed", "Job %{entity} failed on %{host}");

    let host = std::process::id();
    println!("=== Redis Log Manager Example (pid {}) ===\n", host);

    for round in 1..=10 {
        for entity in ["job-1", "job-2", "job-3"] {
            manager.error("job_failed", (entity, Params::new().with("host", host)))?;
        }
        println!("round {} done", round);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    let snapshot = manager.metrics().snapshot();
    println!("\n=== Example Complete ===");
    println!("Emitted: {}", snapshot.events_emitted);
    println!("Suppressed: {}", snapshot.events_suppressed);

    Ok(())
}
