//! Basic logger usage example
//!
//! Demonstrates synchronous logging to the console at every level, with and
//! without tags, colors and timestamps.
//!
//! Run with: cargo run --example basic_usage

use buffered_logger::prelude::*;
use buffered_logger::{tags, warning};

fn main() -> Result<()> {
    println!("=== Buffered Logger - Basic Usage Example ===\n");

    // Unbuffered logger with a colored console printer
    let logger = Logger::new("svcA");

    println!("1. Logging at every level:");
    logger.success("Migration applied");
    logger.info("hello");
    logger.warning("Cache miss ratio is high");
    logger.error("Upstream returned 502");

    println!("\n2. Logging with tags:");
    logger.info_with_tags(
        "Request served",
        tags! { "method" => "GET", "path" => "/health", "status" => 200 },
    );
    logger.error_with_tags("Payment failed", Tags::new().with("order", 1042).with_value("retrying"));

    println!("\n3. Formatting macros:");
    warning!(logger, "Retry attempt {} of {}", 3, 5);

    println!("\n4. Plain output without timestamps:");
    let config = LoggerConfig {
        enable_color: false,
        enable_log_date_time: false,
        ..LoggerConfig::default()
    };
    let plain = Logger::with_config(Some("plain".to_string()), config)?;
    plain.info("No escape codes and no date");
    plain.close();

    logger.close();
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
