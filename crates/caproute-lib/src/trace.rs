//! In-band explanation log produced by the search engine.
//!
//! This is data handed back to the caller, not process diagnostics. Every
//! appended entry is also mirrored to `tracing` at TRACE level.

use std::fmt;

use serde::Serialize;

/// Classification of a trace entry, used by renderers for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    Info,
    Success,
    Warning,
    Error,
    Highlight,
    Step,
}

impl LogKind {
    pub fn label(self) -> &'static str {
        match self {
            LogKind::Info => "info",
            LogKind::Success => "success",
            LogKind::Warning => "warning",
            LogKind::Error => "error",
            LogKind::Highlight => "highlight",
            LogKind::Step => "step",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub kind: LogKind,
    pub message: String,
}

/// Append-only buffer of [`LogEntry`] values scoped to one query.
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder {
    entries: Vec<LogEntry>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, kind: LogKind, message: impl Into<String>) {
        let message = message.into();
        tracing::trace!(kind = kind.label(), "{}", message);
        self.entries.push(LogEntry { kind, message });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.append(LogKind::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.append(LogKind::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.append(LogKind::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.append(LogKind::Error, message);
    }

    pub fn highlight(&mut self, message: impl Into<String>) {
        self.append(LogKind::Highlight, message);
    }

    pub fn step(&mut self, message: impl Into<String>) {
        self.append(LogKind::Step, message);
    }

    /// Entries recorded so far, in order. Does not clear the buffer.
    pub fn drain(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}
