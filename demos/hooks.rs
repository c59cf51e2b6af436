//! Hook example
//!
//! Registers the bundled hooks plus a custom alerting hook, and loads the
//! wrapper configuration from JSON.
//!
//! Run with: cargo run --example hooks

use rust_log_wrapper::prelude::*;
use std::sync::Arc;

/// Prints an alert line for every error-or-worse entry
struct AlertHook;

impl Hook for AlertHook {
    fn levels(&self) -> &[Level] {
        &[Level::Panic, Level::Fatal, Level::Error]
    }

    fn fire(&self, entry: &Entry) -> Result<()> {
        eprintln!("   [ALERT] {} ({} fields)", entry.message(), entry.data().len());
        Ok(())
    }
}

fn main() -> Result<()> {
    println!("=== Rust Log Wrapper - Hooks Example ===\n");

    let config = LogConfig::from_json_str(r#"{ "level": "debug", "output": "stderr" }"#)?;

    let counter = Arc::new(LevelCounterHook::new());
    let fired = Arc::new(TestHook::new());

    let mut options = config.into_options();
    options.push(with_hook(counter.clone()));
    options.push(with_hook(fired.clone()));
    options.push(with_hook(Arc::new(AlertHook)));
    let log = LogWrapper::new(options)?;

    log.debug("cache warmed");
    log.info("listening");
    log.with_field("path", "/missing").error("not found");
    log.trace("filtered out, hooks stay quiet");

    println!("TestHook fired: {}", fired.is_fired());
    for level in Level::ALL {
        println!("   {:>5}: {}", level, counter.count(level));
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
