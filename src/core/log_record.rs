//! Log record structure

use super::log_level::LogLevel;
use super::tags::Tags;
use chrono::{DateTime, Utc};

/// One log event.
///
/// Built once per log call and never mutated afterwards; it moves through
/// the buffer by value and printers only ever see `&LogRecord`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    level: LogLevel,
    message: Option<String>,
    tags: Tags,
    service_name: Option<String>,
    created_at: DateTime<Utc>,
}

impl LogRecord {
    pub fn new(
        level: LogLevel,
        message: Option<String>,
        tags: Tags,
        service_name: Option<String>,
    ) -> Self {
        Self::new_at(level, message, tags, service_name, Utc::now())
    }

    /// Build a record with an explicit creation time
    pub fn new_at(
        level: LogLevel,
        message: Option<String>,
        tags: Tags,
        service_name: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            level,
            message,
            tags,
            service_name,
            created_at,
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn service_name(&self) -> Option<&str> {
        self.service_name.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Seconds since the Unix epoch
    pub fn timestamp(&self) -> i64 {
        self.created_at.timestamp()
    }
}
