//! Basic example: templated events with error de-duplication.
//!
//! Registers a couple of templates and triggers them in each of the four
//! call shapes. Repeated errors for the same entity are shown once per
//! window; other levels always go through.

use log_manager::{LogManager, Params};
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let manager = LogManager::builder()
        .with_window(Duration::from_secs(60))
        .build()?;

    manager.add_template("service_started", "Service started");
    manager.add_template("schedule_triggered", "Schedule for %{entity} triggered at %{time}");
    manager.add_template("job_failed", "Job %{entity} failed: %{reason}");

    println!("=== Basic Log Manager Example ===\n");
    println!("Window: 60s for repeated errors per entity\n");

    // No entity, no params
    manager.info("service_started", ())?;

    // Entity with params, at every level
    let params = Params::new().with("time", 1000);
    manager.debug("schedule_triggered", ("S1", params.clone()))?;
    manager.info("schedule_triggered", ("S1", params.clone()))?;
    manager.warn("schedule_triggered", ("S1", params.clone()))?;

    println!("\nEmitting the same error 5 times for job-42:");
    for attempt in 1..=5 {
        let params = Params::new().with("reason", format!("timeout (attempt {})", attempt));
        manager.error("job_failed", ("job-42", params))?;
    }

    println!("\nA different entity has its own window:");
    manager.error("job_failed", ("job-7", Params::new().with("reason", "oom")))?;

    println!("\nUnknown templates are reported to the caller:");
    if let Err(e) = manager.info("not_registered", ()) {
        println!("  error: {}", e);
    }

    let snapshot = manager.metrics().snapshot();
    println!("\n=== Example Complete ===");
    println!("Emitted: {}", snapshot.events_emitted);
    println!("Suppressed: {}", snapshot.events_suppressed);
    println!("Suppression rate: {:.1}%", snapshot.suppression_rate() * 100.0);

    Ok(())
}
