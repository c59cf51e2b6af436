//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod console;
pub mod context;
pub mod entry;
pub mod error;
pub mod fields;
pub mod formatter;
pub mod hook;
pub mod level;
pub mod logger;
pub mod options;
pub mod output_format;
pub mod timestamp;
pub mod wrapper;

pub use appender::Appender;
pub use config::LogConfig;
pub use console::Console;
pub use context::Context;
pub use entry::{Caller, Entry};
pub use error::{LoggerError, Result};
pub use fields::{FieldValue, Fields, SharedError, ERROR_KEY};
pub use formatter::Formatter;
pub use hook::Hook;
pub use level::Level;
pub use logger::{ExitFunc, Logger, LoggerBuilder};
pub use options::{LogOption, LogWrapperParams};
pub use output_format::RecordFormatter;
pub use timestamp::TimestampFormat;
pub use wrapper::LogWrapper;
