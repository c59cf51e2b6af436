//! Hook trait for side-effecting observers of log entries

use super::{entry::Entry, error::Result, level::Level};

/// Observer invoked synchronously for every emitted entry at a level it
/// declares interest in.
///
/// Hooks run in registration order, after level filtering and before the
/// record reaches its appender. An error returned from [`Hook::fire`] is
/// reported on stderr and never reaches the logging call site.
///
/// # Example
///
/// ```
/// use rust_log_wrapper::prelude::*;
/// use std::sync::atomic::{AtomicU64, Ordering};
///
/// #[derive(Default)]
/// struct ErrorCounter(AtomicU64);
///
/// impl Hook for ErrorCounter {
///     fn levels(&self) -> &[Level] {
///         &[Level::Panic, Level::Fatal, Level::Error]
///     }
///
///     fn fire(&self, _entry: &Entry) -> Result<()> {
///         self.0.fetch_add(1, Ordering::Relaxed);
///         Ok(())
///     }
/// }
/// ```
pub trait Hook: Send + Sync {
    /// Levels this hook wants to observe
    fn levels(&self) -> &[Level] {
        &Level::ALL
    }

    /// React to an emitted entry
    fn fire(&self, entry: &Entry) -> Result<()>;

    /// Name used when reporting failures
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
