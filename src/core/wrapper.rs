//! The `LogWrapper` façade
//!
//! `LogWrapper` is built from functional options and is the single API
//! surface of the crate. It owns a shared [`Logger`]; cloning the wrapper
//! shares the engine, its output and its hooks.

use super::appender::Appender;
use super::console::Console;
use super::context::Context;
use super::entry::Entry;
use super::error::Result;
use super::fields::{FieldValue, SharedError};
use super::formatter::Formatter;
use super::hook::Hook;
use super::level::Level;
use super::logger::Logger;
use super::options::{LogOption, LogWrapperParams};
use super::output_format::RecordFormatter;
use crate::appenders::{ConsoleAppender, RotatingFileAppender, RotationConfig};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Generates the plain and formatted method pair for each level
macro_rules! wrapper_level_methods {
    ($($plain:ident, $formatted:ident;)*) => {
        $(
            #[track_caller]
            pub fn $plain(&self, message: impl fmt::Display) {
                self.logger.entry().$plain(message);
            }

            #[track_caller]
            pub fn $formatted(&self, args: fmt::Arguments<'_>) {
                self.logger.entry().$formatted(args);
            }
        )*
    };
}

/// Configurable structured logger
///
/// # Example
/// ```
/// use rust_log_wrapper::options::{with_formatter, with_level};
/// use rust_log_wrapper::{Formatter, Level, LogWrapper};
///
/// let log = LogWrapper::new([with_level(Level::Debug), with_formatter(Formatter::Json)]).unwrap();
/// log.with_field("user", "alice").info("signed in");
/// log.debugf(format_args!("{} items cached", 42));
/// ```
#[derive(Clone)]
pub struct LogWrapper {
    logger: Arc<Logger>,
}

impl LogWrapper {
    /// Build a wrapper from options applied in order
    ///
    /// # Errors
    ///
    /// Returns the first option error. The log file is opened on the first
    /// write, and failures there are reported on stderr.
    pub fn new<I>(opts: I) -> Result<Self>
    where
        I: IntoIterator<Item = LogOption>,
    {
        Ok(Self::from_params(LogWrapperParams::new(opts)?))
    }

    pub fn from_params(params: LogWrapperParams) -> Self {
        let formatter = RecordFormatter::new(params.formatter())
            .with_timestamp_format(params.timestamp_format().clone());

        let logger = Logger::builder()
            .level(params.level())
            .formatter(formatter)
            .boxed_output(Self::open_output(&params))
            .hooks(params.hooks().iter().cloned())
            .report_caller(params.report_caller())
            .build();

        Self {
            logger: Arc::new(logger),
        }
    }

    fn open_output(params: &LogWrapperParams) -> Box<dyn Appender> {
        match params.effective_output() {
            Console::File => {
                let config = RotationConfig::new()
                    .with_max_size_mb(params.max_log_size())
                    .with_max_backups(params.max_backups())
                    .with_max_age_days(params.max_age())
                    .with_compression(params.compress_logs());
                Box::new(RotatingFileAppender::new(params.log_file_path(), config))
            }
            console => Box::new(ConsoleAppender::for_console(console)),
        }
    }

    /// The underlying engine
    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    #[must_use]
    pub fn with_field<K, V>(&self, key: K, value: V) -> Entry
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.logger.entry().with_field(key, value)
    }

    #[must_use]
    pub fn with_fields<I, K, V>(&self, fields: I) -> Entry
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.logger.entry().with_fields(fields)
    }

    #[must_use]
    pub fn with_error<E>(&self, err: E) -> Entry
    where
        E: StdError + Send + Sync + 'static,
    {
        self.logger.entry().with_error(err)
    }

    #[must_use]
    pub fn with_shared_error(&self, err: SharedError) -> Entry {
        self.logger.entry().with_shared_error(err)
    }

    #[must_use]
    pub fn with_context(&self, ctx: Context) -> Entry {
        self.logger.entry().with_context(ctx)
    }

    #[track_caller]
    pub fn log(&self, level: Level, message: impl fmt::Display) {
        self.logger.entry().log(level, message);
    }

    #[track_caller]
    pub fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        self.logger.entry().logf(level, args);
    }

    wrapper_level_methods! {
        trace, tracef;
        debug, debugf;
        info, infof;
        warn, warnf;
        error, errorf;
        fatal, fatalf;
        panic, panicf;
    }

    pub fn add_hook(&self, hook: Arc<dyn Hook>) {
        self.logger.add_hook(hook);
    }

    pub fn set_level(&self, level: Level) {
        self.logger.set_level(level);
    }

    pub fn level(&self) -> Level {
        self.logger.level()
    }

    pub fn is_level_enabled(&self, level: Level) -> bool {
        self.logger.is_level_enabled(level)
    }

    pub fn set_report_caller(&self, enabled: bool) {
        self.logger.set_report_caller(enabled);
    }

    /// Replace the callback run after a fatal entry
    pub fn set_exit_func<F>(&self, exit_func: F)
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        self.logger.set_exit_func(Arc::new(exit_func));
    }

    pub fn set_output(&self, appender: Box<dyn Appender>) {
        self.logger.set_output(appender);
    }

    /// Switch formatter family, keeping the timestamp layout
    pub fn set_formatter(&self, formatter: Formatter) {
        let timestamp_format = self.logger.formatter().timestamp_format().clone();
        self.logger
            .set_formatter(RecordFormatter::new(formatter).with_timestamp_format(timestamp_format));
    }

    pub fn flush(&self) -> Result<()> {
        self.logger.flush()
    }
}

impl Default for LogWrapper {
    /// Info level, coloured text on stdout
    fn default() -> Self {
        Self {
            logger: Arc::new(Logger::new()),
        }
    }
}

impl fmt::Debug for LogWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogWrapper")
            .field("level", &self.logger.level())
            .field("formatter", &self.logger.formatter().kind())
            .field("hooks", &self.logger.hook_count())
            .field("report_caller", &self.logger.report_caller())
            .finish()
    }
}
