//! Console appender implementation

use crate::core::{Appender, Console, Result};
use std::io::Write;

/// Standard stream a [`ConsoleAppender`] writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

pub struct ConsoleAppender {
    stream: Stream,
}

impl ConsoleAppender {
    pub fn new(stream: Stream) -> Self {
        Self { stream }
    }

    pub fn stdout() -> Self {
        Self::new(Stream::Stdout)
    }

    pub fn stderr() -> Self {
        Self::new(Stream::Stderr)
    }

    /// Appender for a console selection; `File` is not a stream and maps to stdout
    pub fn for_console(console: Console) -> Self {
        match console {
            Console::Stderr => Self::stderr(),
            Console::Stdout | Console::File => Self::stdout(),
        }
    }

    pub fn stream(&self) -> Stream {
        self.stream
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, record: &[u8]) -> Result<()> {
        match self.stream {
            Stream::Stdout => std::io::stdout().lock().write_all(record)?,
            Stream::Stderr => std::io::stderr().lock().write_all(record)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.stream {
            Stream::Stdout => std::io::stdout().flush()?,
            Stream::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self.stream {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        }
    }
}
