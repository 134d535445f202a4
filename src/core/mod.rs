//! Core pipeline types and traits

pub mod buffer_manager;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod printer;
pub mod reject_policy;
pub mod tags;
pub mod timestamp;

pub use buffer_manager::{buffer_capacity, BufferConfig, BufferManager, PushRejected, RejectReason};
pub use config::{LoggerConfig, DEFAULT_AVERAGE_LINE_BYTES, DEFAULT_CLOSE_TIMEOUT, DEFAULT_MAX_BUFFER_BYTES};
pub use dispatcher::Dispatcher;
pub use error::{report_to_stderr, ErrorHandler, LoggerError, Result};
pub use log_level::{LogColor, LogLevel};
pub use log_record::LogRecord;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use printer::Printer;
pub use reject_policy::RejectPolicy;
pub use tags::Tags;
pub use timestamp::TimestampFormat;
