//! Log level and terminal color definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    Success,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Success,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Success => "SUCCESS",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }

    /// Fixed color for this level
    pub const fn color(&self) -> LogColor {
        match self {
            LogLevel::Success => LogColor::Green,
            LogLevel::Info => LogColor::Blue,
            LogLevel::Warning => LogColor::Yellow,
            LogLevel::Error => LogColor::Red,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SUCCESS" => Ok(LogLevel::Success),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

/// Bright ANSI terminal colors used by the console printer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogColor {
    Reset,
    Red,
    Green,
    Yellow,
    Blue,
}

impl LogColor {
    /// The ANSI escape sequence
    pub const fn code(&self) -> &'static str {
        match self {
            LogColor::Reset => "\x1b[0m",
            LogColor::Red => "\x1b[31;1m",
            LogColor::Green => "\x1b[32;1m",
            LogColor::Yellow => "\x1b[33;1m",
            LogColor::Blue => "\x1b[34;1m",
        }
    }
}

impl fmt::Display for LogColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
