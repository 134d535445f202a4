//! Logging macros for ergonomic message formatting and tag building.
//!
//! # Examples
//!
//! ```
//! use buffered_logger::prelude::*;
//! use buffered_logger::{info, tags};
//!
//! let logger = Logger::builder().service_name("api").build().unwrap();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With tags
//! logger.info_with_tags("request served", tags! { "status" => 200, "path" => "/" });
//! ```

/// Build [`Tags`](crate::Tags) from `key => value` pairs, keeping their order.
///
/// ```
/// use buffered_logger::tags;
///
/// let tags = tags! { "retries" => 3, "region" => "us-east-1" };
/// assert_eq!(tags.format_suffix(), " {retries=3, region=us-east-1}");
/// assert!(tags! {}.is_empty());
/// ```
#[macro_export]
macro_rules! tags {
    () => {
        $crate::Tags::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut tags = $crate::Tags::new();
        $( tags.insert($key, $value); )+
        tags
    }};
}

/// Log a formatted message at the given level. Evaluates to the `bool`
/// returned by [`Logger::log`](crate::Logger::log).
///
/// ```
/// # use buffered_logger::prelude::*;
/// # let logger = Logger::builder().build().unwrap();
/// use buffered_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, Some(format!($($arg)+)), $crate::Tags::new())
    };
}

/// Log a success-level message.
///
/// ```
/// # use buffered_logger::prelude::*;
/// # let logger = Logger::builder().build().unwrap();
/// use buffered_logger::success;
/// success!(logger, "Migration {} applied", 42);
/// ```
#[macro_export]
macro_rules! success {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Success, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// ```
/// # use buffered_logger::prelude::*;
/// # let logger = Logger::builder().build().unwrap();
/// use buffered_logger::warning;
/// warning!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}
