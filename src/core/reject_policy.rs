//! What happens to a record the buffer refused
//!
//! A buffered push fails when the queue stays full for the whole push
//! timeout, or when the buffer is already closing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Policy for records rejected by the buffer
///
/// # Example
///
/// ```
/// use buffered_logger::RejectPolicy;
///
/// assert_eq!(RejectPolicy::default(), RejectPolicy::Drop);
/// let policy: RejectPolicy = serde_json::from_str("\"sync_fallback\"").unwrap();
/// assert_eq!(policy, RejectPolicy::SyncFallback);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectPolicy {
    /// Drop the record, count it, and return `false` to the caller
    #[default]
    Drop,

    /// Print the record on the calling thread instead
    ///
    /// Keeps the record but puts printer I/O back on the hot path, and the
    /// record may appear ahead of older buffered records.
    SyncFallback,
}

impl fmt::Display for RejectPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectPolicy::Drop => write!(f, "Drop"),
            RejectPolicy::SyncFallback => write!(f, "SyncFallback"),
        }
    }
}
