//! Main logger implementation

use super::{
    buffer_manager::BufferManager,
    config::LoggerConfig,
    dispatcher::Dispatcher,
    error::{ErrorHandler, LoggerError, Result},
    log_level::LogLevel,
    log_record::LogRecord,
    metrics::LoggerMetrics,
    printer::Printer,
    reject_policy::RejectPolicy,
    tags::Tags,
};
use crate::printers::ConsolePrinter;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Construction and routing façade.
///
/// Every log call builds one [`LogRecord`] and either dispatches it to the
/// printers on the calling thread (unbuffered) or pushes it to the
/// logger's [`BufferManager`] (buffered). All methods take `&self`; wrap the
/// logger in an `Arc` to share it between threads.
///
/// Call [`close`](Self::close) before dropping a logger that ever enabled
/// buffering. Dropping it without `close()` is reported as a fatal error.
pub struct Logger {
    service_name: Option<String>,
    config: LoggerConfig,
    dispatcher: Arc<Dispatcher>,
    buffer: OnceLock<BufferManager>,
    buffer_init: Mutex<()>,
    enable_buffer: AtomicBool,
    closed: AtomicBool,
}

impl Logger {
    /// Unbuffered logger with a console printer and default configuration
    pub fn new(service_name: impl Into<String>) -> Self {
        let logger = Self::unconfigured(Some(service_name.into()), LoggerConfig::default());
        logger.add_printer(ConsolePrinter::from_config(&logger.config));
        logger
    }

    /// Logger with a console printer, configured from `config`
    ///
    /// Starts in buffered mode when `config.enable_buffer` is set.
    pub fn with_config(service_name: Option<String>, config: LoggerConfig) -> Result<Self> {
        let mut builder = Logger::builder().config(config).console();
        if let Some(name) = service_name {
            builder = builder.service_name(name);
        }
        builder.build()
    }

    fn unconfigured(service_name: Option<String>, config: LoggerConfig) -> Self {
        Self {
            service_name: service_name.filter(|name| !name.is_empty()),
            config,
            dispatcher: Arc::new(Dispatcher::new()),
            buffer: OnceLock::new(),
            buffer_init: Mutex::new(()),
            enable_buffer: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        }
    }

    pub fn add_printer<P: Printer + 'static>(&self, printer: P) {
        self.dispatcher.add_printer(Arc::new(printer));
    }

    /// Register a printer that is also held elsewhere
    pub fn add_shared_printer(&self, printer: Arc<dyn Printer>) {
        self.dispatcher.add_printer(printer);
    }

    pub fn clear_printers(&self) {
        self.dispatcher.clear_printers();
    }

    pub fn printer_count(&self) -> usize {
        self.dispatcher.printer_count()
    }

    /// Register the error-escalation hook, replacing the previous one
    pub fn on_error(&self, handler: ErrorHandler) {
        self.dispatcher.set_error_handler(handler);
    }

    pub fn service_name(&self) -> Option<&str> {
        self.service_name.as_deref()
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Switch to buffered routing, creating the buffer on first use
    pub fn enable_log_buffer(&self) -> Result<()> {
        if self.is_closed() {
            return Err(LoggerError::other("logger is closed"));
        }
        self.buffer_manager()?;
        self.enable_buffer.store(true, Ordering::Release);
        Ok(())
    }

    /// Switch back to synchronous routing. Queued records still drain.
    pub fn disable_log_buffer(&self) {
        self.enable_buffer.store(false, Ordering::Release);
    }

    pub fn is_buffered(&self) -> bool {
        self.enable_buffer.load(Ordering::Acquire)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// The buffer, if buffered mode was ever enabled
    pub fn buffer(&self) -> Option<&BufferManager> {
        self.buffer.get()
    }

    fn buffer_manager(&self) -> Result<&BufferManager> {
        if let Some(buffer) = self.buffer.get() {
            return Ok(buffer);
        }

        let _guard = self.buffer_init.lock();
        if let Some(buffer) = self.buffer.get() {
            return Ok(buffer);
        }

        let buffer = BufferManager::new(self.config.buffer_config(), Arc::clone(&self.dispatcher))?;
        Ok(self.buffer.get_or_init(|| buffer))
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        self.dispatcher.metrics()
    }

    /// Build a record and route it.
    ///
    /// Returns `true` once the record was printed (unbuffered) or accepted
    /// into the buffer (buffered). Returns `false` after `close()` or when a
    /// buffered push was rejected under [`RejectPolicy::Drop`].
    pub fn log(&self, level: LogLevel, message: Option<String>, tags: Tags) -> bool {
        if self.is_closed() {
            return false;
        }

        let record = LogRecord::new(level, message, tags, self.service_name.clone());

        let buffer = match self.buffer.get() {
            Some(buffer) if self.is_buffered() => buffer,
            _ => {
                self.dispatcher.dispatch(&record);
                return true;
            }
        };

        let metrics = self.dispatcher.metrics();
        match buffer.try_push(record, self.config.push_timeout()) {
            Ok(()) => {
                metrics.record_accepted();
                true
            }
            Err(rejected) => {
                metrics.record_rejected();
                match self.config.reject_policy {
                    RejectPolicy::Drop => false,
                    RejectPolicy::SyncFallback => {
                        self.dispatcher.dispatch(&rejected.record);
                        true
                    }
                }
            }
        }
    }

    #[inline]
    pub fn success(&self, message: impl Into<String>) -> bool {
        self.log(LogLevel::Success, Some(message.into()), Tags::new())
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) -> bool {
        self.log(LogLevel::Info, Some(message.into()), Tags::new())
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) -> bool {
        self.log(LogLevel::Warning, Some(message.into()), Tags::new())
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) -> bool {
        self.log(LogLevel::Error, Some(message.into()), Tags::new())
    }

    pub fn success_with_tags(&self, message: impl Into<String>, tags: Tags) -> bool {
        self.log(LogLevel::Success, Some(message.into()), tags)
    }

    pub fn info_with_tags(&self, message: impl Into<String>, tags: Tags) -> bool {
        self.log(LogLevel::Info, Some(message.into()), tags)
    }

    pub fn warning_with_tags(&self, message: impl Into<String>, tags: Tags) -> bool {
        self.log(LogLevel::Warning, Some(message.into()), tags)
    }

    pub fn error_with_tags(&self, message: impl Into<String>, tags: Tags) -> bool {
        self.log(LogLevel::Error, Some(message.into()), tags)
    }

    /// Flush every printer; failures go to the error hook
    pub fn flush(&self) {
        self.dispatcher.flush();
    }

    /// Stop accepting records and drain anything buffered.
    ///
    /// Idempotent. Faults during the drain are escalated through the error
    /// hook, never returned.
    ///
    /// # Example
    ///
    /// ```
    /// use buffered_logger::Logger;
    ///
    /// let logger = Logger::builder().service_name("api").build().unwrap();
    /// logger.enable_log_buffer().unwrap();
    /// assert!(logger.info("queued"));
    ///
    /// logger.close();
    /// assert!(!logger.info("rejected after close"));
    /// ```
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }

        if let Some(buffer) = self.buffer.get() {
            buffer.close();
        }
        self.dispatcher.flush();
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.is_closed() {
            return;
        }

        if let Some(buffer) = self.buffer.get() {
            if !buffer.is_closed() {
                self.dispatcher.escalate(LoggerError::NotClosed {
                    pending: buffer.pending(),
                });
            }
        }
        self.close();
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use buffered_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .service_name("billing")
///     .config(LoggerConfig { enable_color: false, ..LoggerConfig::default() })
///     .console()
///     .buffered(true)
///     .on_error(Arc::new(|e: &LoggerError| eprintln!("logger fault: {}", e)))
///     .build()
///     .unwrap();
///
/// logger.info("ready");
/// logger.close();
/// ```
pub struct LoggerBuilder {
    service_name: Option<String>,
    config: LoggerConfig,
    printers: Vec<Arc<dyn Printer>>,
    console: bool,
    on_error: Option<ErrorHandler>,
}

impl LoggerBuilder {
    /// Create a new builder with default values and no printers
    pub fn new() -> Self {
        Self {
            service_name: None,
            config: LoggerConfig::default(),
            printers: Vec::new(),
            console: false,
            on_error: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Start in buffered mode
    #[must_use = "builder methods return a new value"]
    pub fn buffered(mut self, enabled: bool) -> Self {
        self.config.enable_buffer = enabled;
        self
    }

    /// Add a printer; printers run in the order they were added
    #[must_use = "builder methods return a new value"]
    pub fn printer<P: Printer + 'static>(mut self, printer: P) -> Self {
        self.printers.push(Arc::new(printer));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn shared_printer(mut self, printer: Arc<dyn Printer>) -> Self {
        self.printers.push(printer);
        self
    }

    /// Add a stdout console printer using the color and date-time options
    /// of the configuration
    #[must_use = "builder methods return a new value"]
    pub fn console(mut self) -> Self {
        self.console = true;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn on_error(mut self, handler: ErrorHandler) -> Self {
        self.on_error = Some(handler);
        self
    }

    /// Validate the configuration and build the Logger
    pub fn build(self) -> Result<Logger> {
        self.config.validate()?;

        let enable_buffer = self.config.enable_buffer;
        let logger = Logger::unconfigured(self.service_name, self.config);

        if let Some(handler) = self.on_error {
            logger.on_error(handler);
        }
        if self.console {
            logger.add_printer(ConsolePrinter::from_config(&logger.config));
        }
        for printer in self.printers {
            logger.add_shared_printer(printer);
        }
        if enable_buffer {
            logger.enable_log_buffer()?;
        }

        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Default, Clone)]
    struct Recording(Arc<Mutex<Vec<LogRecord>>>);

    impl Printer for Recording {
        fn print(&self, record: &LogRecord) -> Result<()> {
            self.0.lock().push(record.clone());
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn recording_logger(config: LoggerConfig) -> (Logger, Recording) {
        let printer = Recording::default();
        let logger = Logger::builder()
            .service_name("svcA")
            .config(config)
            .printer(printer.clone())
            .build()
            .unwrap();
        (logger, printer)
    }

    #[test]
    fn test_new_registers_console_printer() {
        let logger = Logger::new("svcA");
        assert_eq!(logger.printer_count(), 1);
        assert_eq!(logger.service_name(), Some("svcA"));
        assert!(!logger.is_buffered());
    }

    #[test]
    fn test_builder_without_printers() {
        let logger = Logger::builder().build().unwrap();
        assert_eq!(logger.printer_count(), 0);
        assert!(logger.info("nobody listens"));
    }

    #[test]
    fn test_empty_service_name_is_absent() {
        let logger = Logger::builder().service_name("").build().unwrap();
        assert_eq!(logger.service_name(), None);
    }

    #[test]
    fn test_unbuffered_info_dispatches_synchronously() {
        let (logger, printer) = recording_logger(LoggerConfig::default());

        assert!(logger.info("hello"));

        let seen = printer.0.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].message(), Some("hello"));
        assert_eq!(seen[0].level(), LogLevel::Info);
        assert!(seen[0].tags().is_empty());
        assert_eq!(seen[0].service_name(), Some("svcA"));
    }

    #[test]
    fn test_each_level_method() {
        let (logger, printer) = recording_logger(LoggerConfig::default());

        logger.success("s");
        logger.info("i");
        logger.warning("w");
        logger.error_with_tags("e", Tags::new().with("code", 500));

        let levels: Vec<_> = printer.0.lock().iter().map(|r| r.level()).collect();
        assert_eq!(levels, LogLevel::ALL.to_vec());
        assert_eq!(printer.0.lock()[3].tags().len(), 1);
    }

    #[test]
    fn test_buffered_then_close_drains() {
        let (logger, printer) = recording_logger(LoggerConfig::default());
        logger.enable_log_buffer().unwrap();

        assert!(logger.info("A"));
        assert!(logger.info("B"));
        logger.close();

        let messages: Vec<_> = printer
            .0
            .lock()
            .iter()
            .map(|r| r.message().unwrap_or_default().to_string())
            .collect();
        assert_eq!(messages, vec!["A", "B"]);
        assert_eq!(logger.metrics().accepted_count(), 2);
    }

    #[test]
    fn test_closed_logger_rejects() {
        let (logger, printer) = recording_logger(LoggerConfig::default());
        logger.close();
        logger.close();

        assert!(!logger.info("late"));
        assert!(printer.0.lock().is_empty());
        assert!(logger.enable_log_buffer().is_err());
    }

    #[test]
    fn test_disable_returns_to_sync() {
        let (logger, printer) = recording_logger(LoggerConfig::default());
        logger.enable_log_buffer().unwrap();
        logger.disable_log_buffer();

        assert!(logger.info("direct"));
        assert_eq!(printer.0.lock().len(), 1);
        logger.close();
    }

    #[test]
    fn test_buffer_is_reused_across_toggles() {
        let (logger, _printer) = recording_logger(LoggerConfig::default());
        logger.enable_log_buffer().unwrap();
        let first = logger.buffer().unwrap() as *const BufferManager;

        logger.disable_log_buffer();
        logger.enable_log_buffer().unwrap();
        let second = logger.buffer().unwrap() as *const BufferManager;

        assert_eq!(first, second);
        logger.close();
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let result = Logger::builder()
            .config(LoggerConfig {
                average_line_bytes: 0,
                ..LoggerConfig::default()
            })
            .build();
        assert!(matches!(result, Err(LoggerError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_drop_without_close_is_reported() {
        let faults = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&faults);
        let printer = Recording::default();

        {
            let logger = Logger::builder()
                .printer(printer.clone())
                .buffered(true)
                .on_error(Arc::new(move |e: &LoggerError| sink.lock().push(e.to_string())))
                .build()
                .unwrap();
            logger.info("still drained");
        }

        assert_eq!(faults.lock().len(), 1);
        assert!(faults.lock()[0].contains("without close()"));
        assert_eq!(printer.0.lock().len(), 1);
    }

    #[test]
    fn test_sync_fallback_policy() {
        let config = LoggerConfig {
            reject_policy: RejectPolicy::SyncFallback,
            ..LoggerConfig::default()
        };
        let (logger, printer) = recording_logger(config);
        logger.enable_log_buffer().unwrap();

        // Closing only the buffer makes every push fail with Closing
        logger.buffer().unwrap().close();
        assert!(logger.info("fallback"));
        assert_eq!(logger.metrics().rejected_count(), 1);
        assert_eq!(printer.0.lock().len(), 1);

        logger.close();
    }

    #[test]
    fn test_drop_policy_returns_false() {
        let (logger, printer) = recording_logger(LoggerConfig::default());
        logger.enable_log_buffer().unwrap();
        logger.buffer().unwrap().close();

        assert!(!logger.info("dropped"));
        assert_eq!(logger.metrics().rejected_count(), 1);
        assert!(printer.0.lock().is_empty());

        logger.close();
    }

    #[test]
    fn test_push_timeout_comes_from_config() {
        let config = LoggerConfig {
            push_timeout_micros: 250,
            ..LoggerConfig::default()
        };
        assert_eq!(config.push_timeout(), Duration::from_micros(250));
    }
}
