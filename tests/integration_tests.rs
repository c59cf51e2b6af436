//! Integration tests for the log wrapper
//!
//! These tests verify:
//! - Sink selection (file, empty-path fallback, unwritable path)
//! - Level filtering and the fatal/panic control flow
//! - Hooks
//! - JSON records and caller reporting
//! - Rotation, compression and retention through the options
//! - Thread safety

use rust_log_wrapper::appenders::MemoryAppender;
use rust_log_wrapper::hooks::{LevelCounterHook, TestHook};
use rust_log_wrapper::options::*;
use rust_log_wrapper::prelude::{Console, Formatter, Level, LogConfig, LogWrapper, LoggerError};
use rust_log_wrapper::{Context, Entry, Hook, RecordFormatter};
use std::fs;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn plain_memory_wrapper(level: Level) -> (LogWrapper, MemoryAppender) {
    let log = LogWrapper::new([with_level(level)]).expect("Failed to build wrapper");
    log.logger()
        .set_formatter(RecordFormatter::new(Formatter::Text).with_colors(false));
    let memory = MemoryAppender::new();
    log.set_output(Box::new(memory.clone()));
    (log, memory)
}

#[test]
fn test_file_sink_writes_message() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("service.log");

    let log = LogWrapper::new([
        with_output(Console::File),
        with_log_file_path(log_file.to_str().unwrap()),
        with_formatter(Formatter::Json),
    ])
    .expect("Failed to build wrapper");

    log.with_field("component", "billing").info("invoice sent");
    log.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let record: serde_json::Value = serde_json::from_str(content.trim_end()).unwrap();
    assert_eq!(record["msg"], "invoice sent");
    assert_eq!(record["level"], "info");
    assert_eq!(record["component"], "billing");
    assert!(record["time"].is_string());
}

#[test]
fn test_file_sink_without_path_falls_back() {
    let log = LogWrapper::new([with_output(Console::File)]);
    assert!(log.is_ok());
    log.unwrap().info("goes to stdout");
}

#[test]
fn test_unwritable_file_path_fails_at_write_time() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let blocker = temp_dir.path().join("not_a_dir");
    fs::write(&blocker, b"plain file").unwrap();
    let log_file = blocker.join("app.log");

    let log = LogWrapper::new([
        with_output(Console::File),
        with_log_file_path(log_file.to_str().unwrap()),
    ])
    .expect("construction only fails on option errors");

    log.info("reported on stderr, not returned");
    log.error("still no panic");

    assert!(log.flush().is_ok());
    assert!(!log_file.exists());
    assert_eq!(fs::read(&blocker).unwrap(), b"plain file");
}

#[test]
fn test_only_option_errors_fail_construction() {
    let err = LogWrapper::new([
        with_output(Console::File),
        with_log_file_path("/nonexistent-root-dir/app.log"),
        with_level_name("verbose"),
    ])
    .unwrap_err();

    assert!(matches!(err, LoggerError::UnknownLevel(_)));
}

#[test]
fn test_threshold_info() {
    let (log, memory) = plain_memory_wrapper(Level::Info);

    log.debug("debug hidden");
    log.trace("trace hidden");
    log.info("info shown");
    log.warn("warn shown");
    log.error("error shown");

    let contents = memory.contents();
    assert!(!contents.contains("hidden"));
    assert!(contents.contains("info shown"));
    assert!(contents.contains("warn shown"));
    assert!(contents.contains("error shown"));
}

#[test]
fn test_panic_is_raised_after_logging() {
    let (log, memory) = plain_memory_wrapper(Level::Info);

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        log.panicf(format_args!("invariant {} broken", 7));
    }));

    let payload = result.unwrap_err();
    let message = payload
        .downcast_ref::<String>()
        .cloned()
        .unwrap_or_default();
    assert_eq!(message, "invariant 7 broken");
    assert!(memory.contents().contains("level=panic"));
}

#[test]
fn test_fatal_exits_once_with_status_one() {
    let (log, memory) = plain_memory_wrapper(Level::Info);
    let calls = Arc::new(AtomicUsize::new(0));
    let status = Arc::new(AtomicI32::new(0));
    {
        let calls = Arc::clone(&calls);
        let status = Arc::clone(&status);
        log.set_exit_func(move |code| {
            calls.fetch_add(1, Ordering::SeqCst);
            status.store(code, Ordering::SeqCst);
        });
    }

    log.with_field("reason", "config missing").fatal("cannot start");

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(status.load(Ordering::SeqCst), 1);
    assert!(memory.contents().contains("reason=\"config missing\""));
}

#[test]
fn test_hooks_from_options_and_runtime() {
    let test_hook = Arc::new(TestHook::new());
    let counter = Arc::new(LevelCounterHook::for_levels([Level::Error]));

    let log = LogWrapper::new([with_hooks([test_hook.clone() as Arc<dyn Hook>])])
        .expect("Failed to build wrapper");
    log.set_output(Box::new(MemoryAppender::new()));
    log.add_hook(counter.clone());

    log.info("first");
    log.error("second");
    log.error("third");

    assert!(test_hook.is_fired());
    assert_eq!(test_hook.fire_count(), 3);
    assert_eq!(counter.count(Level::Error), 2);
    assert_eq!(counter.total(), 2);
}

struct ContextCapture {
    seen: parking_lot::Mutex<Vec<String>>,
}

impl Hook for ContextCapture {
    fn fire(&self, entry: &Entry) -> rust_log_wrapper::Result<()> {
        if let Some(value) = entry.context().and_then(|c| c.value("request_id")) {
            self.seen.lock().push(value.to_string());
        }
        Ok(())
    }
}

#[test]
fn test_hooks_see_context() {
    let capture = Arc::new(ContextCapture {
        seen: parking_lot::Mutex::new(Vec::new()),
    });
    let (log, _memory) = plain_memory_wrapper(Level::Info);
    log.add_hook(capture.clone());

    let ctx = Context::background().with_value("request_id", "r-42");
    ctx.cancel();
    log.with_context(ctx).info("handled");

    assert_eq!(*capture.seen.lock(), vec!["r-42".to_string()]);
}

#[test]
fn test_report_caller_records_this_file() {
    let log = LogWrapper::new([with_formatter(Formatter::Json), with_report_caller(true)])
        .expect("Failed to build wrapper");
    let memory = MemoryAppender::new();
    log.set_output(Box::new(memory.clone()));

    log.info("located");

    let record: serde_json::Value = serde_json::from_str(&memory.lines()[0]).unwrap();
    let file = record["file"].as_str().unwrap();
    assert!(file.contains("integration_tests.rs:"), "unexpected caller {}", file);
}

#[test]
fn test_rotation_through_options() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("rotating.log");

    let log = LogWrapper::new([
        with_output(Console::File),
        with_log_file_path(log_file.to_str().unwrap()),
        with_max_log_size(1),
        with_max_backups(2),
        with_compress_logs(true),
        with_formatter(Formatter::Json),
    ])
    .expect("Failed to build wrapper");

    let payload = "x".repeat(4096);
    for i in 0..1200 {
        log.with_field("seq", i).info(&payload);
    }
    log.flush().unwrap();

    let mut backups: Vec<String> = fs::read_dir(temp_dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name != "rotating.log")
        .collect();
    backups.sort();

    assert_eq!(backups.len(), 2, "backups: {:?}", backups);
    for name in &backups {
        assert!(name.starts_with("rotating-"));
        assert!(name.ends_with(".log.gz"));
    }
    assert!(fs::metadata(&log_file).unwrap().len() <= 1024 * 1024);
}

#[test]
fn test_config_builds_equivalent_wrapper() {
    let config = LogConfig::from_json_str(r#"{"level": "warn", "formatter": "json"}"#).unwrap();
    let log = LogWrapper::new(config.into_options()).unwrap();
    let memory = MemoryAppender::new();
    log.set_output(Box::new(memory.clone()));

    log.info("dropped");
    log.warn("kept");

    assert_eq!(log.level(), Level::Warn);
    let lines = memory.lines();
    assert_eq!(lines.len(), 1);
    let record: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(record["level"], "warn");
}

#[test]
fn test_concurrent_logging() {
    let (log, memory) = plain_memory_wrapper(Level::Info);
    let threads = 8;
    let per_thread = 250;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let log = log.clone();
            thread::spawn(move || {
                for i in 0..per_thread {
                    log.with_field("thread", t).with_field("i", i).info("concurrent");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let lines = memory.lines();
    assert_eq!(lines.len(), threads * per_thread);
    assert!(lines
        .iter()
        .all(|l| l.starts_with("time=") && l.contains("msg=\"concurrent\"")));
}
