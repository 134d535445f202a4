//! Printer trait for log output destinations

use super::{error::Result, log_record::LogRecord};

/// Renders a finished record and emits it.
///
/// Printers are shared between the calling threads (unbuffered mode) and
/// the buffer consumer, so they take `&self` and synchronize internally.
pub trait Printer: Send + Sync {
    fn print(&self, record: &LogRecord) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}
