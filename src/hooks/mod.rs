//! Ready-made hook implementations

pub mod level_counter;
pub mod test_hook;

pub use level_counter::LevelCounterHook;
pub use test_hook::TestHook;
