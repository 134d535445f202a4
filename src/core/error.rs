//! Error types for the logging pipeline

use std::sync::Arc;

pub type Result<T> = std::result::Result<T, LoggerError>;

/// Handler receiving internal faults that must never reach the caller
///
/// Exactly one handler is active per logger. When none is registered the
/// fault is written to stderr by [`report_to_stderr`].
pub type ErrorHandler = Arc<dyn Fn(&LoggerError) + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error, raised while parsing configuration
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// The buffer queue disconnected while the consumer still expected work
    #[error("Console logger buffer channel closed unexpectedly")]
    QueueClosedUnexpectedly,

    /// Shutdown could not drain the queue within its budget
    #[error("Logger buffer closed with buffered logs count {pending}")]
    CloseWithPendingItems { pending: usize },

    /// A printer returned an error while rendering or writing
    #[error("Printer '{printer}' failed: {message}")]
    PrinterFailure { printer: String, message: String },

    /// A printer panicked while rendering or writing
    #[error("Printer '{printer}' panicked: {message}. Other printers continue to function.")]
    PrinterPanicked { printer: String, message: String },

    /// The background consumer thread panicked
    #[error("Buffer consumer thread panicked: {0}")]
    ConsumerPanicked(String),

    /// A buffered logger was dropped without an explicit `close()`
    #[error("Logger dropped without close() while {pending} buffered logs were pending")]
    NotClosed { pending: usize },

    /// Generic error, mostly for custom printers
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a printer failure error
    pub fn printer(printer: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::PrinterFailure {
            printer: printer.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// Faults that break the delivery guarantee of the buffer.
    ///
    /// Printer faults are isolated to one printer and are not fatal.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LoggerError::QueueClosedUnexpectedly
                | LoggerError::CloseWithPendingItems { .. }
                | LoggerError::ConsumerPanicked(_)
                | LoggerError::NotClosed { .. }
        )
    }
}

/// Default escalation: one line on the process's stderr.
pub fn report_to_stderr(error: &LoggerError) {
    use colored::Colorize;

    if error.is_fatal() {
        eprintln!("{} {}", "[LOGGER CRITICAL]".red().bold(), error);
    } else {
        eprintln!("{} {}", "[LOGGER ERROR]".yellow().bold(), error);
    }
}

/// Extract a readable message from a `catch_unwind` payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
