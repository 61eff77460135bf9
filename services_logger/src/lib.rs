//! # Logger Service
//!
//! This crate implements structured logging for the harness.
//!
//! ## Philosophy
//!
//! Logging is explicit and structured, not text-based or printf-style.
//! Operator-facing progress text goes to the console; log entries go to a
//! [`LogSink`] chosen by whoever wires the harness together.

use std::fmt;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Parses a level name, ignoring case
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Source component (if known)
    pub source: Option<&'static str>,
    /// Log message
    pub message: String,
    /// Structured fields
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    /// Creates a new log entry
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            source: None,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Sets the source component
    pub fn with_source(mut self, source: &'static str) -> Self {
        self.source = Some(source);
        self
    }

    /// Adds a field to the log entry
    pub fn with_field(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.fields.push((key.into(), value.to_string()));
        self
    }

    /// Returns the value of the first field named `key`
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.level)?;
        if let Some(source) = self.source {
            write!(f, " {}:", source)?;
        }
        write!(f, " {}", self.message)?;
        for (key, value) in &self.fields {
            write!(f, " {}={}", key, value)?;
        }
        Ok(())
    }
}

/// Destination for log entries
pub trait LogSink {
    /// Records one entry
    fn record(&mut self, entry: LogEntry);
}

impl<S: LogSink + ?Sized> LogSink for &mut S {
    fn record(&mut self, entry: LogEntry) {
        (**self).record(entry)
    }
}

/// Sink that drops every entry
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLog;

impl LogSink for NullLog {
    fn record(&mut self, _entry: LogEntry) {}
}

/// In-memory sink
#[derive(Debug, Default, Clone)]
pub struct MemoryLog {
    entries: Vec<LogEntry>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Returns entries at or above `level`
    pub fn at_least(&self, level: LogLevel) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |entry| entry.level >= level)
    }

    /// Returns entries whose message equals `message`
    pub fn with_message<'a>(&'a self, message: &'a str) -> impl Iterator<Item = &'a LogEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.message == message)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl LogSink for MemoryLog {
    fn record(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }
}

/// Sink that renders entries as text lines
///
/// Entries below the minimum level are dropped. Write errors are ignored;
/// logging never fails the caller.
pub struct WriterLog<W> {
    writer: W,
    min_level: LogLevel,
}

impl<W: fmt::Write> WriterLog<W> {
    pub fn new(writer: W, min_level: LogLevel) -> Self {
        Self { writer, min_level }
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: fmt::Write> LogSink for WriterLog<W> {
    fn record(&mut self, entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }
        let _ = writeln!(self.writer, "{}", entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("INFO"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("verbose"), None);
    }

    #[test]
    fn test_log_entry_with_fields() {
        let entry = LogEntry::new(LogLevel::Info, "ProcessFirmwareVolume")
            .with_source("fv_dispatch")
            .with_field("mode", "fuzz")
            .with_field("length", format!("{:#x}", 0xFFFF_FFFFu64));

        assert_eq!(entry.fields.len(), 2);
        assert_eq!(entry.field("mode"), Some("fuzz"));
        assert_eq!(entry.field("status"), None);
        assert_eq!(
            entry.to_string(),
            "[INFO] fv_dispatch: ProcessFirmwareVolume mode=fuzz length=0xffffffff"
        );
    }

    #[test]
    fn test_memory_log_filters() {
        let mut log = MemoryLog::new();
        log.record(LogEntry::new(LogLevel::Debug, "transition"));
        log.record(LogEntry::new(LogLevel::Warn, "missing volume"));
        log.record(LogEntry::new(LogLevel::Debug, "transition"));

        assert_eq!(log.entries().len(), 3);
        assert_eq!(log.at_least(LogLevel::Info).count(), 1);
        assert_eq!(log.with_message("transition").count(), 2);

        log.clear();
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_writer_log_drops_below_min_level() {
        let mut log = WriterLog::new(String::new(), LogLevel::Info);
        log.record(LogEntry::new(LogLevel::Debug, "hidden"));
        log.record(LogEntry::new(LogLevel::Error, "shown").with_source("menu"));

        assert_eq!(log.into_inner(), "[ERROR] menu: shown\n");
    }
}
