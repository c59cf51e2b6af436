//! Appender implementations

pub mod console;
pub mod memory;
pub mod rotating_file;

pub use console::{ConsoleAppender, Stream};
pub use memory::MemoryAppender;
pub use rotating_file::{RotatingFileAppender, RotationConfig, DEFAULT_MAX_SIZE_MB};

pub use crate::core::Appender;
