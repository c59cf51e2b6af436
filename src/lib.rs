//! # Rust Log Wrapper
//!
//! A configurable structured-logging façade. A [`LogWrapper`] is assembled
//! from functional options and writes levelled, field-enriched records to
//! stdout, stderr or a size-rotated file, as coloured text or JSON.
//!
//! ## Features
//!
//! - **Functional options**: `LogWrapper::new([with_level(..), with_output(..)])`
//! - **Sinks**: stdout, stderr, rotating files with gzip and retention
//! - **Formatters**: human-readable text or one JSON object per line
//! - **Hooks**: synchronous observers for metrics and alerting
//! - **Thread safe**: one wrapper can be cloned across threads
//!
//! ## Example
//!
//! ```
//! use rust_log_wrapper::options::{with_formatter, with_level};
//! use rust_log_wrapper::{Formatter, Level, LogWrapper};
//!
//! let log = LogWrapper::new([with_formatter(Formatter::Json), with_level(Level::Debug)])?;
//! log.with_field("request_id", "a1b2").info("request handled");
//! # Ok::<(), rust_log_wrapper::LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod hooks;
pub mod macros;

pub use crate::core::options;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, MemoryAppender, RotatingFileAppender, RotationConfig};
    pub use crate::core::options::*;
    pub use crate::core::{
        Appender, Console, Context, Entry, FieldValue, Fields, Formatter, Hook, Level, LogConfig,
        LogWrapper, Logger, LoggerBuilder, LoggerError, RecordFormatter, Result, TimestampFormat,
    };
    pub use crate::hooks::{LevelCounterHook, TestHook};
}

pub use crate::appenders::{ConsoleAppender, MemoryAppender, RotatingFileAppender, RotationConfig};
pub use crate::core::{
    Appender, Caller, Console, Context, Entry, ExitFunc, FieldValue, Fields, Formatter, Hook,
    Level, LogConfig, LogOption, LogWrapper, LogWrapperParams, Logger, LoggerBuilder, LoggerError,
    RecordFormatter, Result, SharedError, TimestampFormat, ERROR_KEY,
};
