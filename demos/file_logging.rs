//! Rotating file output example
//!
//! Writes JSON records to a size-rotated file with compressed backups.
//!
//! Run with: cargo run --example file_logging

use rust_log_wrapper::prelude::*;
use std::fs;

fn main() -> Result<()> {
    println!("=== Rust Log Wrapper - File Logging Example ===\n");

    let dir = std::env::temp_dir().join("rust_log_wrapper_demo");
    let path = dir.join("app.log");

    let log = LogWrapper::new([
        with_output(Console::File),
        with_log_file_path(path.to_string_lossy()),
        with_formatter(Formatter::Json),
        with_level(Level::Debug),
        with_max_log_size(1),
        with_max_backups(3),
        with_max_age(7),
        with_compress_logs(true),
        with_report_caller(true),
    ])?;

    let payload = "z".repeat(2048);
    for i in 0..2_000 {
        log.with_field("seq", i).with_field("payload", payload.as_str()).debug("filler record");
    }
    log.info("done writing");
    log.flush()?;

    println!("Files in {}:", dir.display());
    let mut names: Vec<String> = fs::read_dir(&dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    for name in names {
        println!("   {}", name);
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
