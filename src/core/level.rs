//! Log level definitions
//!
//! Levels are ordered by increasing verbosity: `Panic` is the most severe and
//! always shown, `Trace` is the most verbose. A record at level `L` passes a
//! threshold `T` when `L <= T`.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u32)]
pub enum Level {
    Panic = 0,
    Fatal = 1,
    Error = 2,
    Warn = 3,
    #[default]
    Info = 4,
    Debug = 5,
    Trace = 6,
}

impl Level {
    /// Every level, most severe first
    pub const ALL: [Level; 7] = [
        Level::Panic,
        Level::Fatal,
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Panic => "panic",
            Level::Fatal => "fatal",
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Trace => "trace",
        }
    }

    /// Whether a record at this level passes the given threshold
    #[inline]
    pub fn is_enabled_at(&self, threshold: Level) -> bool {
        *self <= threshold
    }

    /// Text form of the level, suitable for config files
    pub fn marshal_text(&self) -> Vec<u8> {
        self.as_str().as_bytes().to_vec()
    }

    /// Parse the text form produced by [`Level::marshal_text`]
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::UnknownLevel`] when the text names no level.
    pub fn unmarshal_text(text: &[u8]) -> Result<Self> {
        String::from_utf8_lossy(text).parse()
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Level::Panic | Level::Fatal | Level::Error => Red,
            Level::Warn => Yellow,
            Level::Info => Cyan,
            Level::Debug | Level::Trace => White,
        }
    }

    /// Four-letter tag used by the coloured text layout
    pub(crate) fn short_tag(&self) -> &'static str {
        match self {
            Level::Panic => "PANI",
            Level::Fatal => "FATA",
            Level::Error => "ERRO",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBU",
            Level::Trace => "TRAC",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "panic" => Ok(Level::Panic),
            "fatal" => Ok(Level::Fatal),
            "error" => Ok(Level::Error),
            "warn" => Ok(Level::Warn),
            "info" => Ok(Level::Info),
            "debug" => Ok(Level::Debug),
            "trace" => Ok(Level::Trace),
            _ => Err(LoggerError::unknown_level(s)),
        }
    }
}

impl TryFrom<u32> for Level {
    type Error = LoggerError;

    fn try_from(value: u32) -> Result<Self> {
        Level::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| LoggerError::unknown_level(value.to_string()))
    }
}
