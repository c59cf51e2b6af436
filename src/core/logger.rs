//! Logging engine behind the wrapper
//!
//! The [`Logger`] owns the level threshold, the record formatter, the single
//! output appender, the hook list and the exit callback. All state sits behind
//! locks so one instance can be shared across threads.

use super::{
    appender::Appender,
    entry::{Caller, Entry},
    error::Result,
    hook::Hook,
    level::Level,
    output_format::RecordFormatter,
};
use crate::appenders::ConsoleAppender;
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Callback invoked with the exit status after a fatal entry
pub type ExitFunc = Arc<dyn Fn(i32) + Send + Sync>;

fn process_exit() -> ExitFunc {
    Arc::new(|code| std::process::exit(code))
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

pub struct Logger {
    level: RwLock<Level>,
    formatter: RwLock<RecordFormatter>,
    output: Mutex<Box<dyn Appender>>,
    hooks: RwLock<Vec<Arc<dyn Hook>>>,
    report_caller: AtomicBool,
    exit_func: RwLock<ExitFunc>,
}

impl Logger {
    /// Info level, coloured text, stdout, no hooks
    #[must_use]
    pub fn new() -> Self {
        Self {
            level: RwLock::new(Level::Info),
            formatter: RwLock::new(RecordFormatter::default()),
            output: Mutex::new(Box::new(ConsoleAppender::stdout())),
            hooks: RwLock::new(Vec::new()),
            report_caller: AtomicBool::new(false),
            exit_func: RwLock::new(process_exit()),
        }
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Start an empty entry bound to this logger
    pub fn entry(self: &Arc<Self>) -> Entry {
        Entry::new(Arc::clone(self))
    }

    pub fn set_level(&self, level: Level) {
        *self.level.write() = level;
    }

    pub fn level(&self) -> Level {
        *self.level.read()
    }

    #[inline]
    pub fn is_level_enabled(&self, level: Level) -> bool {
        level.is_enabled_at(*self.level.read())
    }

    pub fn set_formatter(&self, formatter: RecordFormatter) {
        *self.formatter.write() = formatter;
    }

    pub fn formatter(&self) -> RecordFormatter {
        self.formatter.read().clone()
    }

    /// Replace the output appender, flushing the previous one
    pub fn set_output(&self, appender: Box<dyn Appender>) {
        let mut output = self.output.lock();
        if let Err(e) = output.flush() {
            eprintln!(
                "[LOGGER ERROR] Failed to flush appender '{}' before replacing it: {}",
                output.name(),
                e
            );
        }
        *output = appender;
    }

    pub fn add_hook(&self, hook: Arc<dyn Hook>) {
        self.hooks.write().push(hook);
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.read().len()
    }

    pub fn set_report_caller(&self, enabled: bool) {
        self.report_caller.store(enabled, Ordering::Relaxed);
    }

    pub fn report_caller(&self) -> bool {
        self.report_caller.load(Ordering::Relaxed)
    }

    pub fn set_exit_func(&self, exit_func: ExitFunc) {
        *self.exit_func.write() = exit_func;
    }

    /// Run the exit callback; the lock is released before the call
    pub fn exit(&self, code: i32) {
        let exit_func = self.exit_func.read().clone();
        exit_func(code);
    }

    pub fn flush(&self) -> Result<()> {
        self.output.lock().flush()
    }

    /// Finalise an entry, run hooks, then render and write it
    pub(crate) fn dispatch(&self, mut entry: Entry, level: Level, message: String, caller: Caller) {
        entry.level = level;
        entry.message = message;
        if entry.time.is_none() {
            entry.time = Some(chrono::Utc::now());
        }
        if self.report_caller() {
            entry.caller = Some(caller);
        }

        self.fire_hooks(&entry);

        let record = match self.formatter.read().format(&entry) {
            Ok(record) => record,
            Err(e) => {
                eprintln!("[LOGGER ERROR] Failed to format entry: {}", e);
                return;
            }
        };

        let mut output = self.output.lock();
        if let Err(e) = output.append(&record) {
            eprintln!(
                "[LOGGER ERROR] Appender '{}' failed to write entry: {}",
                output.name(),
                e
            );
        }
    }

    /// Fire every interested hook in registration order
    ///
    /// Each hook is isolated: an error or a panic is reported on stderr and
    /// the remaining hooks still run.
    fn fire_hooks(&self, entry: &Entry) {
        let hooks: Vec<Arc<dyn Hook>> = self.hooks.read().clone();

        for hook in hooks.iter().filter(|h| h.levels().contains(&entry.level)) {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                hook.fire(entry)
            }));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Failed to fire hook '{}': {}", hook.name(), e);
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Hook '{}' panicked: {}. \
                         Other hooks continue to function.",
                        hook.name(),
                        panic_message(panic_info.as_ref())
                    );
                }
            }
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.output.get_mut().flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

/// Builder for constructing a [`Logger`] with a fluent API
///
/// # Example
/// ```
/// use rust_log_wrapper::prelude::*;
/// use rust_log_wrapper::appenders::MemoryAppender;
///
/// let logger = Logger::builder()
///     .level(Level::Debug)
///     .formatter(RecordFormatter::new(Formatter::Json))
///     .output(MemoryAppender::new())
///     .report_caller(true)
///     .build();
///
/// assert_eq!(logger.level(), Level::Debug);
/// ```
pub struct LoggerBuilder {
    level: Level,
    formatter: RecordFormatter,
    output: Option<Box<dyn Appender>>,
    hooks: Vec<Arc<dyn Hook>>,
    report_caller: bool,
    exit_func: Option<ExitFunc>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            level: Level::Info,
            formatter: RecordFormatter::default(),
            output: None,
            hooks: Vec::new(),
            report_caller: false,
            exit_func: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: RecordFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Set the output appender (stdout when never called)
    #[must_use = "builder methods return a new value"]
    pub fn output<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.output = Some(Box::new(appender));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_output(mut self, appender: Box<dyn Appender>) -> Self {
        self.output = Some(appender);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn hook(mut self, hook: Arc<dyn Hook>) -> Self {
        self.hooks.push(hook);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn hooks<I: IntoIterator<Item = Arc<dyn Hook>>>(mut self, hooks: I) -> Self {
        self.hooks.extend(hooks);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn report_caller(mut self, enabled: bool) -> Self {
        self.report_caller = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn exit_func(mut self, exit_func: ExitFunc) -> Self {
        self.exit_func = Some(exit_func);
        self
    }

    pub fn build(self) -> Logger {
        let logger = Logger::new();
        logger.set_level(self.level);
        logger.set_formatter(self.formatter);
        if let Some(output) = self.output {
            *logger.output.lock() = output;
        }
        for hook in self.hooks {
            logger.add_hook(hook);
        }
        logger.set_report_caller(self.report_caller);
        if let Some(exit_func) = self.exit_func {
            logger.set_exit_func(exit_func);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::MemoryAppender;
    use crate::core::error::LoggerError;
    use crate::core::formatter::Formatter;
    use std::sync::atomic::AtomicUsize;

    fn memory_logger(level: Level) -> (Arc<Logger>, MemoryAppender) {
        let memory = MemoryAppender::new();
        let logger = Logger::builder()
            .level(level)
            .formatter(RecordFormatter::new(Formatter::Text).with_colors(false))
            .output(memory.clone())
            .build();
        (Arc::new(logger), memory)
    }

    struct OrderHook {
        id: usize,
        order: Arc<Mutex<Vec<usize>>>,
    }

    impl Hook for OrderHook {
        fn fire(&self, _entry: &Entry) -> Result<()> {
            self.order.lock().push(self.id);
            Ok(())
        }
    }

    struct FailingHook;

    impl Hook for FailingHook {
        fn fire(&self, _entry: &Entry) -> Result<()> {
            Err(LoggerError::hook("failing", "simulated failure"))
        }
    }

    struct PanickingHook;

    impl Hook for PanickingHook {
        fn fire(&self, _entry: &Entry) -> Result<()> {
            panic!("hook exploded");
        }
    }

    #[test]
    fn test_builder_defaults() {
        let logger = LoggerBuilder::default().build();
        assert_eq!(logger.level(), Level::Info);
        assert_eq!(logger.formatter().kind(), Formatter::Text);
        assert!(!logger.report_caller());
        assert_eq!(logger.hook_count(), 0);
    }

    #[test]
    fn test_level_filtering() {
        let (logger, memory) = memory_logger(Level::Warn);

        logger.entry().info("hidden");
        logger.entry().warn("shown");
        logger.entry().error("also shown");

        let contents = memory.contents();
        assert!(!contents.contains("hidden"));
        assert!(contents.contains("shown"));
        assert!(contents.contains("also shown"));
        assert_eq!(memory.lines().len(), 2);
    }

    #[test]
    fn test_hooks_fire_in_registration_order() {
        let (logger, _memory) = memory_logger(Level::Info);
        let order = Arc::new(Mutex::new(Vec::new()));
        for id in 0..3 {
            logger.add_hook(Arc::new(OrderHook {
                id,
                order: Arc::clone(&order),
            }));
        }

        logger.entry().info("go");
        assert_eq!(*order.lock(), vec![0, 1, 2]);
    }

    #[test]
    fn test_hook_failure_is_isolated() {
        let (logger, memory) = memory_logger(Level::Info);
        let order = Arc::new(Mutex::new(Vec::new()));
        logger.add_hook(Arc::new(FailingHook));
        logger.add_hook(Arc::new(PanickingHook));
        logger.add_hook(Arc::new(OrderHook {
            id: 7,
            order: Arc::clone(&order),
        }));

        logger.entry().info("still written");

        assert_eq!(*order.lock(), vec![7]);
        assert!(memory.contents().contains("still written"));
    }

    #[test]
    fn test_filtered_entry_skips_hooks() {
        let (logger, _memory) = memory_logger(Level::Info);
        let order = Arc::new(Mutex::new(Vec::new()));
        logger.add_hook(Arc::new(OrderHook {
            id: 1,
            order: Arc::clone(&order),
        }));

        logger.entry().debug("filtered");
        assert!(order.lock().is_empty());
    }

    #[test]
    fn test_exit_func_receives_status() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        let logger = Logger::builder()
            .output(MemoryAppender::new())
            .exit_func(Arc::new(move |code| {
                assert_eq!(code, 1);
                calls_clone.fetch_add(1, Ordering::SeqCst);
            }))
            .build();

        logger.exit(1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_set_output_switches_destination() {
        let (logger, first) = memory_logger(Level::Info);
        let second = MemoryAppender::new();

        logger.entry().info("one");
        logger.set_output(Box::new(second.clone()));
        logger.entry().info("two");

        assert!(first.contents().contains("one"));
        assert!(!first.contents().contains("two"));
        assert!(second.contents().contains("two"));
    }
}
