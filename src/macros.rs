//! Logging macros for ergonomic log message formatting.
//!
//! These macros take anything with the per-level `*f` methods (a
//! [`LogWrapper`](crate::LogWrapper) or an enriched [`Entry`](crate::Entry))
//! followed by `format!`-style arguments.
//!
//! # Examples
//!
//! ```
//! use rust_log_wrapper::{fields, info, warn, LogWrapper};
//!
//! let log = LogWrapper::default();
//!
//! // Basic logging
//! info!(log, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(log, "Server listening on port {}", port);
//!
//! // On an enriched entry
//! warn!(log.with_fields(fields!("user" => "alice", "attempt" => 3)), "Slow login");
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # let log = rust_log_wrapper::LogWrapper::default();
/// use rust_log_wrapper::{log, Level};
/// log!(log, Level::Info, "Simple message");
/// log!(log, Level::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.logf($level, ::std::format_args!($($arg)+))
    };
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # let log = rust_log_wrapper::LogWrapper::default();
/// # log.set_level(rust_log_wrapper::Level::Trace);
/// use rust_log_wrapper::trace;
/// trace!(log, "Entering function: calculate()");
/// trace!(log, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $logger.tracef(::std::format_args!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(::std::format_args!($($arg)+))
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # let log = rust_log_wrapper::LogWrapper::default();
/// use rust_log_wrapper::info;
/// info!(log, "Application started");
/// info!(log, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(::std::format_args!($($arg)+))
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warnf(::std::format_args!($($arg)+))
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # let log = rust_log_wrapper::LogWrapper::default();
/// use rust_log_wrapper::error;
/// error!(log, "Failed to connect to database");
/// error!(log, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(::std::format_args!($($arg)+))
    };
}

/// Log a fatal-level message, then run the exit callback.
///
/// # Examples
///
/// ```
/// # let log = rust_log_wrapper::LogWrapper::default();
/// use rust_log_wrapper::fatal;
/// log.set_exit_func(|code| assert_eq!(code, 1));
/// fatal!(log, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalf(::std::format_args!($($arg)+))
    };
}

/// Build a field list for `with_fields`.
///
/// ```
/// use rust_log_wrapper::{fields, FieldValue};
///
/// let list = fields!("user" => "alice", "retries" => 3, "ok" => true);
/// assert_eq!(list[1].1, FieldValue::Int(3));
/// ```
#[macro_export]
macro_rules! fields {
    ($($key:expr => $value:expr),* $(,)?) => {
        ::std::vec![
            $((
                ::std::string::String::from($key),
                $crate::FieldValue::from($value),
            )),*
        ]
    };
}

/// Join the `Display` forms of the arguments with single spaces.
///
/// ```
/// use rust_log_wrapper::sprint;
///
/// assert_eq!(sprint!("took", 42, "ms"), "took 42 ms");
/// assert_eq!(sprint!(), "");
/// ```
#[macro_export]
macro_rules! sprint {
    () => {
        ::std::string::String::new()
    };
    ($first:expr $(, $rest:expr)* $(,)?) => {{
        use ::std::fmt::Write as _;
        let mut joined = ::std::format!("{}", $first);
        $(
            let _ = ::std::write!(joined, " {}", $rest);
        )*
        joined
    }};
}
