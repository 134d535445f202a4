//! Logger configuration
//!
//! All recognized options live in one explicit structure. Parsing rejects
//! unknown keys and [`LoggerConfig::validate`] rejects values the buffer
//! cannot work with.

use super::buffer_manager::BufferConfig;
use super::error::{LoggerError, Result};
use super::reject_policy::RejectPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Estimated average bytes per rendered log line
pub const DEFAULT_AVERAGE_LINE_BYTES: usize = 320;

/// Memory budget for records waiting in the buffer (32 MiB)
pub const DEFAULT_MAX_BUFFER_BYTES: usize = 32 * 1024 * 1024;

/// Default shutdown drain budget (5 seconds)
pub const DEFAULT_CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// Route records through the background buffer
    pub enable_buffer: bool,

    /// Emit ANSI colors on the console printer
    pub enable_color: bool,

    /// Show the `[YYYY-MM-DD HH:MM:SS]` segment on the console printer
    pub enable_log_date_time: bool,

    /// Estimated bytes per line, only used to size the queue
    pub average_line_bytes: usize,

    /// Memory budget for queued records, only used to size the queue
    pub max_buffer_bytes: usize,

    /// How long a buffered log call may wait for queue space
    pub push_timeout_micros: u64,

    /// How long the consumer waits on an empty queue before looping
    pub pop_timeout_millis: u64,

    /// Budget for draining the queue on close
    pub close_timeout_millis: u64,

    /// What to do with a record the buffer refused
    pub reject_policy: RejectPolicy,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            enable_buffer: false,
            enable_color: true,
            enable_log_date_time: true,
            average_line_bytes: DEFAULT_AVERAGE_LINE_BYTES,
            max_buffer_bytes: DEFAULT_MAX_BUFFER_BYTES,
            push_timeout_micros: 1_000,
            pop_timeout_millis: 1_000,
            close_timeout_millis: DEFAULT_CLOSE_TIMEOUT.as_millis() as u64,
            reject_policy: RejectPolicy::Drop,
        }
    }
}

impl LoggerConfig {
    /// Parse and validate a JSON configuration object
    ///
    /// Missing keys take their defaults, unknown keys are rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use buffered_logger::LoggerConfig;
    ///
    /// let config = LoggerConfig::from_json(r#"{"enable_buffer": true, "enable_color": false}"#).unwrap();
    /// assert!(config.enable_buffer);
    /// assert!(!config.enable_color);
    ///
    /// assert!(LoggerConfig::from_json(r#"{"enableBufer": true}"#).is_err());
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)
            .map_err(|e| LoggerError::config("LoggerConfig", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.average_line_bytes == 0 {
            return Err(LoggerError::config(
                "LoggerConfig",
                "average_line_bytes must be greater than zero",
            ));
        }
        if self.pop_timeout_millis == 0 {
            return Err(LoggerError::config(
                "LoggerConfig",
                "pop_timeout_millis must be greater than zero",
            ));
        }
        if self.close_timeout_millis == 0 {
            return Err(LoggerError::config(
                "LoggerConfig",
                "close_timeout_millis must be greater than zero",
            ));
        }
        Ok(())
    }

    pub fn push_timeout(&self) -> Duration {
        Duration::from_micros(self.push_timeout_micros)
    }

    pub fn buffer_config(&self) -> BufferConfig {
        BufferConfig {
            average_line_bytes: self.average_line_bytes,
            max_buffer_bytes: self.max_buffer_bytes,
            pop_timeout: Duration::from_millis(self.pop_timeout_millis),
            close_timeout: Duration::from_millis(self.close_timeout_millis),
        }
    }
}
