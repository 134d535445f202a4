//! Buffered logging example
//!
//! Demonstrates handing records to the background consumer, sharing the
//! logger between threads, and draining everything with `close()`.
//!
//! Run with: cargo run --example buffered_logging

use buffered_logger::prelude::*;
use buffered_logger::tags;
use std::sync::Arc;
use std::thread;

fn main() -> Result<()> {
    println!("=== Buffered Logger - Buffered Logging Example ===\n");

    let config = LoggerConfig::from_json(
        r#"{
            "max_buffer_bytes": 1048576,
            "reject_policy": "sync_fallback"
        }"#,
    )?;

    let logger = Arc::new(
        Logger::builder()
            .service_name("worker")
            .config(config)
            .console()
            .buffered(true)
            .on_error(Arc::new(|e: &LoggerError| eprintln!("logger fault: {}", e)))
            .build()?,
    );

    if let Some(buffer) = logger.buffer() {
        println!("Buffer capacity: {} records\n", buffer.capacity());
    }

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for job in 0..5 {
                    logger.info_with_tags("Job finished", tags! { "worker" => worker, "job" => job });
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    // Everything queued so far is printed before close() returns
    logger.close();

    let metrics = logger.metrics();
    println!(
        "\nAccepted: {}, rejected: {}, printed: {}",
        metrics.accepted_count(),
        metrics.rejected_count(),
        metrics.dispatched_count()
    );
    println!("After close, info() returns {}", logger.info("too late"));

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
