//! The user-facing log stream of a compile-and-run cycle.
//!
//! Every phase transition, success and failure is reported as a timestamped
//! `LogEntry`. Internal diagnostics go through the `log` facade instead.

use chrono::{DateTime, Local};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.pad(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub severity: Severity,
}

impl LogEntry {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            timestamp: Local::now(),
            message: message.into(),
            severity,
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {:<7} {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.severity,
            self.message
        )
    }
}

/// Receives the log entries of a compile-and-run cycle.
pub trait LogSink {
    fn record(&mut self, entry: LogEntry);

    fn info(&mut self, message: &str) {
        self.record(LogEntry::new(message, Severity::Info));
    }

    fn success(&mut self, message: &str) {
        self.record(LogEntry::new(message, Severity::Success));
    }

    fn warning(&mut self, message: &str) {
        self.record(LogEntry::new(message, Severity::Warning));
    }

    fn error(&mut self, message: &str) {
        self.record(LogEntry::new(message, Severity::Error));
    }
}

/// Keeps every entry in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub entries: Vec<LogEntry>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.message.as_str())
    }

    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.severity == severity)
    }

    pub fn has_severity(&self, severity: Severity) -> bool {
        self.with_severity(severity).next().is_some()
    }
}

impl LogSink for MemorySink {
    fn record(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }
}

/// Prints entries to stdout and mirrors them to the `log` facade.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn record(&mut self, entry: LogEntry) {
        match entry.severity {
            Severity::Error => log::error!("{}", entry.message),
            Severity::Warning => log::warn!("{}", entry.message),
            Severity::Info | Severity::Success => log::info!("{}", entry.message),
        }
        println!("{}", entry);
    }
}
