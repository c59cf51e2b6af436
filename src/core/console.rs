//! Output sink selection

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Family of sink a wrapper writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Console {
    #[default]
    Stdout,
    Stderr,
    File,
}

impl Console {
    pub fn as_str(&self) -> &'static str {
        match self {
            Console::Stdout => "stdout",
            Console::Stderr => "stderr",
            Console::File => "file",
        }
    }

    /// Name for a raw selector value; unknown values read as `"stdout"`
    pub fn name_of(raw: u32) -> &'static str {
        Console::from(raw).as_str()
    }
}

impl From<u32> for Console {
    fn from(raw: u32) -> Self {
        match raw {
            1 => Console::Stderr,
            2 => Console::File,
            _ => Console::Stdout,
        }
    }
}

impl fmt::Display for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Console {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stdout" => Ok(Console::Stdout),
            "stderr" => Ok(Console::Stderr),
            "file" => Ok(Console::File),
            _ => Err(LoggerError::config("Console", format!("unknown output '{}'", s))),
        }
    }
}
