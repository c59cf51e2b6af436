//! Declarative configuration
//!
//! `LogConfig` mirrors the option set in a serde-friendly shape, so a wrapper
//! can be configured from a JSON document:
//!
//! ```json
//! {
//!   "level": "debug",
//!   "formatter": "json",
//!   "output": "file",
//!   "file_path": "/var/log/app.log",
//!   "max_size_mb": 50,
//!   "max_backups": 5,
//!   "compress": true
//! }
//! ```

use super::console::Console;
use super::error::{LoggerError, Result};
use super::formatter::Formatter;
use super::level::Level;
use super::options::{self, LogOption};
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub level: Level,
    pub formatter: Formatter,
    pub output: Console,
    pub file_path: String,
    pub max_size_mb: u64,
    pub max_backups: usize,
    pub max_age_days: u32,
    pub compress: bool,
    pub report_caller: bool,
    pub timestamp_format: TimestampFormat,
}

impl LogConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LoggerError::config("LogConfig", e.to_string()))
    }

    /// Options reproducing this configuration, in field order
    pub fn into_options(self) -> Vec<LogOption> {
        vec![
            options::with_level(self.level),
            options::with_formatter(self.formatter),
            options::with_output(self.output),
            options::with_log_file_path(self.file_path),
            options::with_max_log_size(self.max_size_mb),
            options::with_max_backups(self.max_backups),
            options::with_max_age(self.max_age_days),
            options::with_compress_logs(self.compress),
            options::with_report_caller(self.report_caller),
            options::with_timestamp_format(self.timestamp_format),
        ]
    }
}
