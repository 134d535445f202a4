//! # Buffered Logger
//!
//! A non-blocking console logging pipeline. Log calls build an immutable
//! record and either print it on the calling thread or hand it to a bounded
//! buffer drained by one background consumer.
//!
//! ## Features
//!
//! - **Bounded Memory**: Queue capacity derived from a byte budget
//! - **Backpressure**: Buffered pushes fail fast instead of blocking
//! - **Ordered Delivery**: One consumer, records printed in push order
//! - **Lossless Shutdown**: `close()` drains everything still queued
//! - **Fault Isolation**: Printer errors and panics go to an error hook
//!
//! ```
//! use buffered_logger::prelude::*;
//! use buffered_logger::tags;
//!
//! let logger = Logger::builder().service_name("api").buffered(true).build().unwrap();
//! logger.info_with_tags("request served", tags! { "status" => 200, "path" => "/health" });
//! logger.close();
//! ```

pub mod core;
pub mod macros;
pub mod printers;

pub mod prelude {
    pub use crate::core::{
        BufferManager, ErrorHandler, LogColor, LogLevel, LogRecord, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, LoggerMetrics, Printer, RejectPolicy, Result, Tags,
        TimestampFormat,
    };
    pub use crate::printers::ConsolePrinter;
}

pub use crate::core::{
    buffer_capacity, BufferConfig, BufferManager, Dispatcher, ErrorHandler, LogColor, LogLevel,
    LogRecord, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Printer,
    PushRejected, RejectPolicy, RejectReason, Result, Tags, TimestampFormat,
};
pub use printers::ConsolePrinter;
