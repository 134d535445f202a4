//! Printer registry and the shared dispatch step
//!
//! Both routing modes end here: the calling thread in unbuffered mode, the
//! buffer consumer in buffered mode. The dispatcher also owns the logger's
//! error-escalation hook, so every internal fault funnels through one place.

use super::{
    error::{panic_message, report_to_stderr, ErrorHandler, LoggerError},
    log_record::LogRecord,
    metrics::LoggerMetrics,
    printer::Printer,
};
use parking_lot::RwLock;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

pub struct Dispatcher {
    printers: RwLock<Vec<Arc<dyn Printer>>>,
    error_handler: RwLock<Option<ErrorHandler>>,
    metrics: LoggerMetrics,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            printers: RwLock::new(Vec::new()),
            error_handler: RwLock::new(None),
            metrics: LoggerMetrics::new(),
        }
    }

    pub fn add_printer(&self, printer: Arc<dyn Printer>) {
        self.printers.write().push(printer);
    }

    pub fn clear_printers(&self) {
        self.printers.write().clear();
    }

    pub fn printer_count(&self) -> usize {
        self.printers.read().len()
    }

    /// Replace the error-escalation hook
    pub fn set_error_handler(&self, handler: ErrorHandler) {
        *self.error_handler.write() = Some(handler);
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Hand `record` to every printer in registration order.
    ///
    /// Each printer runs under its own `catch_unwind`; an error or panic is
    /// escalated and the remaining printers still run. Returns `true` when
    /// every printer succeeded.
    pub fn dispatch(&self, record: &LogRecord) -> bool {
        // Snapshot so a printer that logs or registers printers cannot deadlock us
        let printers = self.printers.read().clone();
        let mut all_ok = true;

        for printer in &printers {
            let result = catch_unwind(AssertUnwindSafe(|| printer.print(record)));

            let error = match result {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => LoggerError::printer(printer.name(), e.to_string()),
                Err(payload) => LoggerError::PrinterPanicked {
                    printer: printer.name().to_string(),
                    message: panic_message(payload.as_ref()),
                },
            };

            all_ok = false;
            self.metrics.record_printer_failure();
            self.escalate(error);
        }

        self.metrics.record_dispatched();
        all_ok
    }

    /// Flush every printer, escalating failures
    pub fn flush(&self) {
        let printers = self.printers.read().clone();

        for printer in &printers {
            let result = catch_unwind(AssertUnwindSafe(|| printer.flush()));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => self.escalate(LoggerError::printer(
                    printer.name(),
                    format!("flush failed: {}", e),
                )),
                Err(payload) => self.escalate(LoggerError::PrinterPanicked {
                    printer: printer.name().to_string(),
                    message: panic_message(payload.as_ref()),
                }),
            }
        }
    }

    /// Report an internal fault without ever failing the caller
    pub fn escalate(&self, error: LoggerError) {
        let handler = self.error_handler.read().clone();

        match handler {
            Some(handler) => {
                if catch_unwind(AssertUnwindSafe(|| handler(&error))).is_err() {
                    report_to_stderr(&error);
                }
            }
            None => report_to_stderr(&error),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
