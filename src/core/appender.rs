//! Appender trait for log output destinations

use super::error::Result;

/// Destination for rendered records
///
/// Appenders receive fully formatted, newline-terminated records. The engine
/// serialises calls, so implementations need no locking of their own.
pub trait Appender: Send {
    fn append(&mut self, record: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
