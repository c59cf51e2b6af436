//! Ephemeral enriched log entry
//!
//! An [`Entry`] is produced by the enrichment methods (`with_field`,
//! `with_fields`, `with_error`, `with_context`) and consumed by exactly one
//! logging call. Once dispatched, hooks and formatters see the final level,
//! message, time and (optionally) call site.

use super::context::Context;
use super::fields::{FieldValue, Fields, SharedError, ERROR_KEY};
use super::level::Level;
use super::logger::Logger;
use chrono::{DateTime, Utc};
use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Source location of a logging call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl From<&'static Location<'static>> for Caller {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

pub struct Entry {
    logger: Arc<Logger>,
    pub(crate) data: Fields,
    pub(crate) context: Option<Context>,
    pub(crate) time: Option<DateTime<Utc>>,
    pub(crate) level: Level,
    pub(crate) message: String,
    pub(crate) caller: Option<Caller>,
}

/// Generates the plain and formatted method pair for each level
macro_rules! entry_level_methods {
    ($($level:expr => $plain:ident, $formatted:ident;)*) => {
        $(
            #[track_caller]
            pub fn $plain(self, message: impl fmt::Display) {
                self.log($level, message);
            }

            #[track_caller]
            pub fn $formatted(self, args: fmt::Arguments<'_>) {
                self.log($level, args);
            }
        )*
    };
}

impl Entry {
    pub(crate) fn new(logger: Arc<Logger>) -> Self {
        Self {
            logger,
            data: Fields::new(),
            context: None,
            time: None,
            level: Level::Info,
            message: String::new(),
            caller: None,
        }
    }

    /// Add a single field
    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Add every pair from `fields`
    #[must_use]
    pub fn with_fields<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.data
            .extend(fields.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Attach an error under the `"error"` key
    #[must_use]
    pub fn with_error<E>(self, err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.with_shared_error(Arc::new(err))
    }

    /// Attach an already shared error under the `"error"` key
    #[must_use]
    pub fn with_shared_error(self, err: SharedError) -> Self {
        self.with_field(ERROR_KEY, FieldValue::Error(err))
    }

    #[must_use]
    pub fn with_context(mut self, ctx: Context) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Override the timestamp recorded for this entry
    #[must_use]
    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }

    pub fn data(&self) -> &Fields {
        &self.data
    }

    /// Error attached with `with_error`, if any
    pub fn err(&self) -> Option<&SharedError> {
        self.data.get(ERROR_KEY).and_then(FieldValue::as_error)
    }

    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.time
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Call site, present when caller reporting is enabled
    pub fn caller(&self) -> Option<&Caller> {
        self.caller.as_ref()
    }

    /// Log at `level`; dropped when the level is filtered out
    #[track_caller]
    pub fn log(self, level: Level, message: impl fmt::Display) {
        if !self.logger.is_level_enabled(level) {
            return;
        }
        let caller = Caller::from(Location::caller());
        let logger = Arc::clone(&self.logger);
        logger.dispatch(self, level, message.to_string(), caller);
    }

    #[track_caller]
    pub fn logf(self, level: Level, args: fmt::Arguments<'_>) {
        self.log(level, args);
    }

    entry_level_methods! {
        Level::Trace => trace, tracef;
        Level::Debug => debug, debugf;
        Level::Info => info, infof;
        Level::Warn => warn, warnf;
        Level::Error => error, errorf;
    }

    /// Log at Fatal, then invoke the exit callback with status 1
    #[track_caller]
    pub fn fatal(self, message: impl fmt::Display) {
        let logger = Arc::clone(&self.logger);
        self.log(Level::Fatal, message);
        logger.exit(1);
    }

    #[track_caller]
    pub fn fatalf(self, args: fmt::Arguments<'_>) {
        self.fatal(args);
    }

    /// Log at Panic, then panic with the message
    #[track_caller]
    pub fn panic(self, message: impl fmt::Display) {
        let message = message.to_string();
        self.log(Level::Panic, &message);
        panic!("{}", message);
    }

    #[track_caller]
    pub fn panicf(self, args: fmt::Arguments<'_>) {
        self.panic(args);
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("level", &self.level)
            .field("message", &self.message)
            .field("time", &self.time)
            .field("data", &self.data)
            .field("context", &self.context)
            .field("caller", &self.caller)
            .finish()
    }
}
