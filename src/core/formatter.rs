//! Record encoding selection

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Encoding applied to every emitted record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Formatter {
    /// Human-readable, coloured line with timestamp
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl Formatter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Formatter::Text => "text",
            Formatter::Json => "json",
        }
    }

    /// Name for a raw selector value; unknown values read as `"text"`
    pub fn name_of(raw: u32) -> &'static str {
        Formatter::from(raw).as_str()
    }
}

impl From<u32> for Formatter {
    fn from(raw: u32) -> Self {
        match raw {
            1 => Formatter::Json,
            _ => Formatter::Text,
        }
    }
}

impl fmt::Display for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Formatter {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Formatter::Text),
            "json" => Ok(Formatter::Json),
            _ => Err(LoggerError::config(
                "Formatter",
                format!("unknown formatter '{}'", s),
            )),
        }
    }
}
