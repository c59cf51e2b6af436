//! Hook that records whether it has fired

use crate::core::{Entry, Hook, Result};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Observes every level and remembers that it was fired
///
/// # Example
/// ```
/// use rust_log_wrapper::hooks::TestHook;
/// use rust_log_wrapper::options::with_hook;
/// use rust_log_wrapper::LogWrapper;
/// use std::sync::Arc;
///
/// let hook = Arc::new(TestHook::new());
/// let log = LogWrapper::new([with_hook(hook.clone())]).unwrap();
///
/// log.info("hello");
/// assert!(hook.is_fired());
/// ```
#[derive(Debug, Default)]
pub struct TestHook {
    fired: AtomicBool,
    count: AtomicUsize,
}

impl TestHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Number of entries seen since creation or the last reset
    pub fn fire_count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.fired.store(false, Ordering::SeqCst);
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Hook for TestHook {
    fn fire(&self, _entry: &Entry) -> Result<()> {
        self.fired.store(true, Ordering::SeqCst);
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &str {
        "TestHook"
    }
}
