//! Functional options and the parameter set they build
//!
//! A [`LogOption`] is a one-shot closure over [`LogWrapperParams`]. Options
//! are applied strictly in the order given and the first failure aborts
//! construction.

use super::console::Console;
use super::error::{LoggerError, Result};
use super::formatter::Formatter;
use super::hook::Hook;
use super::level::Level;
use super::timestamp::TimestampFormat;
use std::fmt;
use std::sync::Arc;

type ApplyFn = Box<dyn FnOnce(&mut LogWrapperParams) -> Result<()> + Send>;

/// A single configuration step
///
/// # Example
/// ```
/// use rust_log_wrapper::options::{self, LogOption, LogWrapperParams};
/// use rust_log_wrapper::{Level, LoggerError};
///
/// let only_verbose = LogOption::new(|params| {
///     if params.level() < Level::Debug {
///         return Err(LoggerError::option("only_verbose", "level too low"));
///     }
///     Ok(())
/// });
///
/// let params = LogWrapperParams::new([options::with_level(Level::Trace), only_verbose]);
/// assert!(params.is_ok());
/// ```
pub struct LogOption(ApplyFn);

impl LogOption {
    pub fn new<F>(apply: F) -> Self
    where
        F: FnOnce(&mut LogWrapperParams) -> Result<()> + Send + 'static,
    {
        Self(Box::new(apply))
    }

    pub fn apply(self, params: &mut LogWrapperParams) -> Result<()> {
        (self.0)(params)
    }

    fn setter<F>(apply: F) -> Self
    where
        F: FnOnce(&mut LogWrapperParams) + Send + 'static,
    {
        Self::new(move |params| {
            apply(params);
            Ok(())
        })
    }
}

impl fmt::Debug for LogOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LogOption")
    }
}

pub fn with_formatter(formatter: Formatter) -> LogOption {
    LogOption::setter(move |p| p.formatter = formatter)
}

pub fn with_output(output: Console) -> LogOption {
    LogOption::setter(move |p| p.output = output)
}

/// Parse a formatter name (`"text"`, `"json"`) when applied
pub fn with_formatter_name(name: impl Into<String>) -> LogOption {
    let name = name.into();
    LogOption::new(move |p| {
        p.formatter = name.parse()?;
        Ok(())
    })
}

/// Parse a sink name (`"stdout"`, `"stderr"`, `"file"`) when applied
pub fn with_output_name(name: impl Into<String>) -> LogOption {
    let name = name.into();
    LogOption::new(move |p| {
        p.output = name.parse()?;
        Ok(())
    })
}

pub fn with_level(level: Level) -> LogOption {
    LogOption::setter(move |p| p.level = level)
}

/// Parse a level name; fails with `UnknownLevel` when applied
pub fn with_level_name(name: impl Into<String>) -> LogOption {
    let name = name.into();
    LogOption::new(move |p| {
        p.level = name.parse()?;
        Ok(())
    })
}

pub fn with_log_file_path(path: impl Into<String>) -> LogOption {
    let path = path.into();
    LogOption::setter(move |p| p.log_file_path = path)
}

/// Size threshold in megabytes; 0 selects the appender default
pub fn with_max_log_size(size_mb: u64) -> LogOption {
    LogOption::setter(move |p| p.max_log_size = size_mb)
}

pub fn with_max_backups(backups: usize) -> LogOption {
    LogOption::setter(move |p| p.max_backups = backups)
}

/// Backup age limit in days
pub fn with_max_age(days: u32) -> LogOption {
    LogOption::setter(move |p| p.max_age = days)
}

pub fn with_compress_logs(compress: bool) -> LogOption {
    LogOption::setter(move |p| p.compress_logs = compress)
}

/// Replace the hook list
pub fn with_hooks<I>(hooks: I) -> LogOption
where
    I: IntoIterator<Item = Arc<dyn Hook>>,
{
    let hooks: Vec<_> = hooks.into_iter().collect();
    LogOption::setter(move |p| p.hooks = hooks)
}

/// Append one hook
pub fn with_hook(hook: Arc<dyn Hook>) -> LogOption {
    LogOption::setter(move |p| p.hooks.push(hook))
}

pub fn with_timestamp_format(format: TimestampFormat) -> LogOption {
    LogOption::setter(move |p| p.timestamp_format = format)
}

pub fn with_report_caller(enabled: bool) -> LogOption {
    LogOption::setter(move |p| p.report_caller = enabled)
}

/// Resolved construction parameters
#[derive(Clone)]
pub struct LogWrapperParams {
    formatter: Formatter,
    output: Console,
    level: Level,
    log_file_path: String,
    max_log_size: u64,
    max_backups: usize,
    max_age: u32,
    compress_logs: bool,
    hooks: Vec<Arc<dyn Hook>>,
    timestamp_format: TimestampFormat,
    report_caller: bool,
}

impl Default for LogWrapperParams {
    fn default() -> Self {
        Self {
            formatter: Formatter::Text,
            output: Console::Stdout,
            level: Level::Info,
            log_file_path: String::new(),
            max_log_size: 0,
            max_backups: 0,
            max_age: 0,
            compress_logs: false,
            hooks: Vec::new(),
            timestamp_format: TimestampFormat::default(),
            report_caller: false,
        }
    }
}

impl LogWrapperParams {
    /// Start from defaults and apply `opts` in order
    pub fn new<I>(opts: I) -> Result<Self>
    where
        I: IntoIterator<Item = LogOption>,
    {
        let mut params = Self::default();
        params.set_options(opts)?;
        Ok(params)
    }

    /// Apply further options; stops at the first error, keeping earlier changes
    pub fn set_options<I>(&mut self, opts: I) -> Result<()>
    where
        I: IntoIterator<Item = LogOption>,
    {
        for opt in opts {
            opt.apply(self)?;
        }
        Ok(())
    }

    pub fn formatter(&self) -> Formatter {
        self.formatter
    }

    pub fn output(&self) -> Console {
        self.output
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn log_file_path(&self) -> &str {
        &self.log_file_path
    }

    pub fn max_log_size(&self) -> u64 {
        self.max_log_size
    }

    pub fn max_backups(&self) -> usize {
        self.max_backups
    }

    pub fn max_age(&self) -> u32 {
        self.max_age
    }

    pub fn compress_logs(&self) -> bool {
        self.compress_logs
    }

    pub fn hooks(&self) -> &[Arc<dyn Hook>] {
        &self.hooks
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    pub fn report_caller(&self) -> bool {
        self.report_caller
    }

    pub fn set_formatter(&mut self, formatter: Formatter) {
        self.formatter = formatter;
    }

    pub fn set_output(&mut self, output: Console) {
        self.output = output;
    }

    pub fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    pub fn set_log_file_path(&mut self, path: impl Into<String>) {
        self.log_file_path = path.into();
    }

    pub fn set_max_log_size(&mut self, size_mb: u64) {
        self.max_log_size = size_mb;
    }

    pub fn set_max_backups(&mut self, backups: usize) {
        self.max_backups = backups;
    }

    pub fn set_max_age(&mut self, days: u32) {
        self.max_age = days;
    }

    pub fn set_compress_logs(&mut self, compress: bool) {
        self.compress_logs = compress;
    }

    pub fn set_hooks<I>(&mut self, hooks: I)
    where
        I: IntoIterator<Item = Arc<dyn Hook>>,
    {
        self.hooks = hooks.into_iter().collect();
    }

    pub fn set_timestamp_format(&mut self, format: TimestampFormat) {
        self.timestamp_format = format;
    }

    pub fn set_report_caller(&mut self, enabled: bool) {
        self.report_caller = enabled;
    }

    /// File output with an empty path falls back to stdout
    pub(crate) fn effective_output(&self) -> Console {
        match self.output {
            Console::File if self.log_file_path.is_empty() => Console::Stdout,
            other => other,
        }
    }
}

impl fmt::Debug for LogWrapperParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hook_names: Vec<&str> = self.hooks.iter().map(|h| h.name()).collect();
        f.debug_struct("LogWrapperParams")
            .field("formatter", &self.formatter)
            .field("output", &self.output)
            .field("level", &self.level)
            .field("log_file_path", &self.log_file_path)
            .field("max_log_size", &self.max_log_size)
            .field("max_backups", &self.max_backups)
            .field("max_age", &self.max_age)
            .field("compress_logs", &self.compress_logs)
            .field("hooks", &hook_names)
            .field("timestamp_format", &self.timestamp_format)
            .field("report_caller", &self.report_caller)
            .finish()
    }
}

impl From<LoggerError> for LogOption {
    /// An option that always fails with `err`
    fn from(err: LoggerError) -> Self {
        LogOption::new(move |_| Err(err))
    }
}
