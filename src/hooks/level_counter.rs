//! Per-level entry counters
//!
//! The kind of hook that feeds a metrics backend: it counts emitted entries
//! for each level it observes and never touches the record itself.

use crate::core::{Entry, Hook, Level, Result};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
pub struct LevelCounterHook {
    levels: Vec<Level>,
    counts: [AtomicU64; 7],
}

impl LevelCounterHook {
    /// Count entries at every level
    pub fn new() -> Self {
        Self::for_levels(Level::ALL)
    }

    /// Count entries only at the given levels
    pub fn for_levels<I: IntoIterator<Item = Level>>(levels: I) -> Self {
        let mut levels: Vec<Level> = levels.into_iter().collect();
        levels.sort();
        levels.dedup();
        Self {
            levels,
            counts: Default::default(),
        }
    }

    pub fn count(&self, level: Level) -> u64 {
        self.counts[level as usize].load(Ordering::Relaxed)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| c.load(Ordering::Relaxed)).sum()
    }

    pub fn reset(&self) {
        for counter in &self.counts {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

impl Default for LevelCounterHook {
    fn default() -> Self {
        Self::new()
    }
}

impl Hook for LevelCounterHook {
    fn levels(&self) -> &[Level] {
        &self.levels
    }

    fn fire(&self, entry: &Entry) -> Result<()> {
        self.counts[entry.level() as usize].fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn name(&self) -> &str {
        "LevelCounterHook"
    }
}
