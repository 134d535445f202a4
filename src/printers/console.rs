//! Console printer implementation

use crate::core::{
    LogColor, LogRecord, LoggerConfig, LoggerError, Printer, Result, TimestampFormat,
};
use parking_lot::Mutex;
use std::io::{self, Stdout, Write};

/// Bold white text on a blue background, wrapped around the service name
const SERVICE_BADGE: &str = "\x1b[1;37;44m";

/// Renders each record as one line and writes it with a single call.
///
/// Colored layout:
/// `<level color>[ts] <badge> svc <reset><level color> [LEVEL] message {tags}<reset>`
///
/// Plain layout:
/// `[ts] [svc] [LEVEL] message {tags}`
pub struct ConsolePrinter<W: Write + Send = Stdout> {
    writer: Mutex<W>,
    use_colors: bool,
    show_date_time: bool,
    timestamp_format: TimestampFormat,
}

impl ConsolePrinter {
    /// Colored printer on stdout
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Stdout printer using the color and date-time options of `config`
    pub fn from_config(config: &LoggerConfig) -> Self {
        Self::new()
            .with_colors(config.enable_color)
            .with_date_time(config.enable_log_date_time)
    }
}

impl Default for ConsolePrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> ConsolePrinter<W> {
    /// Colored printer on an arbitrary writer
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            use_colors: true,
            show_date_time: true,
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_date_time(mut self, show_date_time: bool) -> Self {
        self.show_date_time = show_date_time;
        self
    }

    /// Set the timestamp format for this printer
    ///
    /// # Examples
    ///
    /// ```
    /// use buffered_logger::printers::ConsolePrinter;
    /// use buffered_logger::TimestampFormat;
    ///
    /// let printer = ConsolePrinter::new()
    ///     .with_timestamp_format(TimestampFormat::Iso8601);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Render `record` as one terminated line
    pub fn render(&self, record: &LogRecord) -> String {
        let level = record.level();
        let message = sanitize(record.message().unwrap_or_default());
        let tags = sanitize(&record.tags().format_suffix());
        let service = record.service_name().filter(|name| !name.is_empty());

        let timestamp = if self.show_date_time {
            format!("[{}] ", self.timestamp_format.format(&record.created_at()))
        } else {
            String::new()
        };

        let mut line = if self.use_colors {
            let color = level.color().code();
            let reset = LogColor::Reset.code();

            let badge = match service {
                Some(name) => format!("{} {} {}{} ", SERVICE_BADGE, name, reset, color),
                None => String::new(),
            };

            format!(
                "{}{}{}[{}] {}{}{}",
                color, timestamp, badge, level, message, tags, reset
            )
        } else {
            let badge = match service {
                Some(name) => format!("[{}] ", name),
                None => String::new(),
            };

            format!("{}{}[{}] {}{}", timestamp, badge, level, message, tags)
        };

        line.push('\n');
        line
    }
}

impl<W: Write + Send> Printer for ConsolePrinter<W> {
    fn print(&self, record: &LogRecord) -> Result<()> {
        let line = self.render(record);

        // One write per line so concurrent callers never interleave mid-line
        self.writer
            .lock()
            .write_all(line.as_bytes())
            .map_err(|e| LoggerError::io_operation("writing log line", self.name(), e))
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Escape line breaks and tabs so a record always stays on one line
fn sanitize(text: &str) -> String {
    text.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, Tags};
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    fn record(level: LogLevel, service: Option<&str>, tags: Tags) -> LogRecord {
        LogRecord::new_at(
            level,
            Some("payment settled".to_string()),
            tags,
            service.map(String::from),
            at(),
        )
    }

    fn colored() -> ConsolePrinter<Vec<u8>> {
        ConsolePrinter::with_writer(Vec::new())
    }

    fn plain() -> ConsolePrinter<Vec<u8>> {
        colored().with_colors(false)
    }

    #[test]
    fn test_plain_with_service_and_tags() {
        let tags = Tags::new().with("retries", 3).with("region", "us-east-1");
        let line = plain().render(&record(LogLevel::Info, Some("billing"), tags));
        assert_eq!(
            line,
            "[2024-03-09 14:05:07] [billing] [INFO] payment settled {retries=3, region=us-east-1}\n"
        );
    }

    #[test]
    fn test_plain_without_service() {
        let line = plain().render(&record(LogLevel::Warning, None, Tags::new()));
        assert_eq!(line, "[2024-03-09 14:05:07] [WARNING] payment settled\n");
    }

    #[test]
    fn test_empty_service_name_omitted() {
        let line = plain().render(&record(LogLevel::Info, Some(""), Tags::new()));
        assert_eq!(line, "[2024-03-09 14:05:07] [INFO] payment settled\n");
    }

    #[test]
    fn test_plain_without_date_time() {
        let printer = plain().with_date_time(false);
        let line = printer.render(&record(LogLevel::Error, Some("billing"), Tags::new()));
        assert_eq!(line, "[billing] [ERROR] payment settled\n");
    }

    #[test]
    fn test_colored_with_service() {
        let printer = colored();
        let line = printer.render(&record(LogLevel::Success, Some("billing"), Tags::new()));
        assert_eq!(
            line,
            "\x1b[32;1m[2024-03-09 14:05:07] \x1b[1;37;44m billing \x1b[0m\x1b[32;1m [SUCCESS] payment settled\x1b[0m\n"
        );
    }

    #[test]
    fn test_colored_without_service() {
        let printer = colored();
        let line = printer.render(&record(LogLevel::Error, None, Tags::new().with("code", 502)));
        assert_eq!(
            line,
            "\x1b[31;1m[2024-03-09 14:05:07] [ERROR] payment settled {code=502}\x1b[0m\n"
        );
    }

    #[test]
    fn test_colored_reset_is_last_for_every_level() {
        let printer = colored();
        for level in LogLevel::ALL {
            let line = printer.render(&record(level, None, Tags::new()));
            assert!(line.starts_with(level.color().code()));
            assert!(line.ends_with(&format!("{}\n", LogColor::Reset.code())));
        }
    }

    #[test]
    fn test_plain_has_no_escapes() {
        for level in LogLevel::ALL {
            let line = plain().render(&record(level, Some("svc"), Tags::new()));
            assert!(!line.contains('\x1b'));
        }
    }

    #[test]
    fn test_null_message_renders_empty() {
        let record = LogRecord::new_at(LogLevel::Info, None, Tags::new(), None, at());
        assert_eq!(plain().render(&record), "[2024-03-09 14:05:07] [INFO] \n");
    }

    #[test]
    fn test_line_breaks_are_escaped() {
        let record = LogRecord::new_at(
            LogLevel::Info,
            Some("first\nsecond".to_string()),
            Tags::new().with("note", "a\tb"),
            None,
            at(),
        );
        let line = plain().render(&record);
        assert_eq!(line, "[2024-03-09 14:05:07] [INFO] first\\nsecond {note=a\\tb}\n");
        assert_eq!(line.matches('\n').count(), 1);
    }

    #[test]
    fn test_print_writes_whole_line() {
        let buffer = SharedBuffer::default();
        let printer = ConsolePrinter::with_writer(buffer.clone()).with_colors(false);

        printer
            .print(&record(LogLevel::Info, Some("billing"), Tags::new()))
            .unwrap();
        printer.flush().unwrap();

        let written = String::from_utf8(buffer.0.lock().clone()).unwrap();
        assert_eq!(written, "[2024-03-09 14:05:07] [billing] [INFO] payment settled\n");
    }

    #[test]
    fn test_custom_timestamp_format() {
        let printer = plain().with_timestamp_format(TimestampFormat::Unix);
        let line = printer.render(&record(LogLevel::Info, None, Tags::new()));
        assert!(line.starts_with(&format!("[{}] ", at().timestamp())));
    }
}
