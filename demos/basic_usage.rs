//! Basic wrapper usage example
//!
//! Demonstrates the default text output, levels, fields, errors and the fatal
//! exit callback.
//!
//! Run with: cargo run --example basic_usage

use rust_log_wrapper::prelude::*;
use rust_log_wrapper::{fields, info, sprint};

fn main() -> Result<()> {
    println!("=== Rust Log Wrapper - Basic Usage Example ===\n");

    let log = LogWrapper::new(Vec::new())?;

    println!("1. Logging at different levels (threshold: info):");
    log.debug("Debug test");
    log.info("Info test");
    log.warn("Warning test");
    log.error("Error test");

    println!("\n2. Enriched entries:");
    log.with_error(LoggerError::other("teste"))
        .info("Error with error test");
    log.with_fields(fields!("test" => "test", "test2" => "test2"))
        .info("WithFields test");
    info!(log, "{} requests served in {} ms", 128, 42);
    log.info(sprint!("joined", "with", 3, "spaces"));

    println!("\n3. JSON output:");
    log.set_formatter(Formatter::Json);
    log.with_field("user", "alice").warn("Switched to JSON");

    println!("\n4. Fatal with a custom exit callback:");
    log.set_exit_func(|code| println!("   exit callback received status {}", code));
    log.fatal("Fatal test");

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
