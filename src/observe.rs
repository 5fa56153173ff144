//! Diagnostics emitted by the cache
//!
//! Nothing in the cache panics or returns an error for recoverable
//! conditions; they are reported here instead. The default observer
//! forwards to the `log` facade, hosts running in a browser can render
//! `Diagnostic::console_args` straight into `console.log`.

use std::fmt;
use std::sync::Mutex;

/// Style arguments paired with the two `%c` slots of a console line.
pub struct ConsoleStyle;

impl ConsoleStyle {
    pub const INFO: [&'static str; 2] = [
        "background:#333; padding: 2px; border-radius: 2px 0 0 2px; color: #fff;",
        "background:#169fe6; padding: 2px; border-radius: 0 2px 2px 0; color: #fff;",
    ];
    pub const WARN: [&'static str; 2] = [
        "background:#333; padding: 2px; border-radius: 2px 0 0 2px; color: #fff;",
        "background:#f90; padding: 2px; border-radius: 0 2px 2px 0; color: #fff;",
    ];
    pub const ERROR: [&'static str; 2] = [
        "background:#333; padding: 2px; border-radius: 2px 0 0 2px; color: #fff;",
        "background:#f00; padding: 2px; border-radius: 0 2px 2px 0; color: #fff;",
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn styles(self) -> [&'static str; 2] {
        match self {
            Level::Info => ConsoleStyle::INFO,
            Level::Warn => ConsoleStyle::WARN,
            Level::Error => ConsoleStyle::ERROR,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Info => write!(f, "Info"),
            Level::Warn => write!(f, "Warn"),
            Level::Error => write!(f, "Error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A `columnData` entry lacks a key or repeats one; settings init aborts.
    InvalidColumnKey { index: usize },
    /// Options could not be read at all; settings init aborts.
    InvalidOptions,
    /// Stored memory no longer fits the configured columns and was deleted.
    MemoryMismatch,
    /// Nothing stored for the requested deletion.
    NoMemory,
    MemoryCleared,
    AllMemoryCleared,
    /// Stored memory could not be parsed and was ignored.
    CorruptMemory,
    /// All memory was wiped because another version wrote it.
    VersionUpgrade,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub kind: DiagnosticKind,
    pub message: String,
    /// Label of the `%c <label> <Level>` prefix.
    pub label: String,
}

impl Diagnostic {
    pub fn new(label: &str, level: Level, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            level,
            kind,
            message: message.into(),
            label: label.to_string(),
        }
    }

    /// `("%c GridManager Warn %c <message> ", [prefix style, level style])`
    pub fn console_args(&self) -> (String, [&'static str; 2]) {
        (
            format!("%c {} {} %c {} ", self.label, self.level, self.message),
            self.level.styles(),
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.label, self.level, self.message)
    }
}

/// Receives every diagnostic the cache produces.
pub trait Observer: Send + Sync {
    fn emit(&self, diagnostic: &Diagnostic);
}

/// Default observer: routes diagnostics through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn emit(&self, diagnostic: &Diagnostic) {
        match diagnostic.level {
            Level::Info => log::info!(target: "gridmemo", "{}", diagnostic),
            Level::Warn => log::warn!(target: "gridmemo", "{}", diagnostic),
            Level::Error => log::error!(target: "gridmemo", "{}", diagnostic),
        }
    }
}

/// Keeps every diagnostic in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    records: Mutex<Vec<Diagnostic>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Rendered console lines, handy for exact-format assertions.
    pub fn console_lines(&self) -> Vec<String> {
        self.diagnostics()
            .iter()
            .map(|d| d.console_args().0)
            .collect()
    }

    pub fn has_kind(&self, kind: &DiagnosticKind) -> bool {
        self.diagnostics().iter().any(|d| &d.kind == kind)
    }

    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }
}

impl Observer for RecordingObserver {
    fn emit(&self, diagnostic: &Diagnostic) {
        if let Ok(mut records) = self.records.lock() {
            records.push(diagnostic.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_format() {
        let d = Diagnostic::new("GridManager", Level::Warn, DiagnosticKind::NoMemory, "test: no user memory");
        let (line, styles) = d.console_args();
        assert_eq!(line, "%c GridManager Warn %c test: no user memory ");
        assert_eq!(styles, ConsoleStyle::WARN);
    }

    #[test]
    fn test_recording_observer_keeps_order() {
        let observer = RecordingObserver::new();
        observer.emit(&Diagnostic::new("GridManager", Level::Error, DiagnosticKind::InvalidColumnKey { index: 0 }, "a"));
        observer.emit(&Diagnostic::new("GridManager", Level::Warn, DiagnosticKind::NoMemory, "b"));

        assert_eq!(observer.diagnostics().len(), 2);
        assert!(observer.has_kind(&DiagnosticKind::InvalidColumnKey { index: 0 }));
        assert_eq!(observer.console_lines()[1], "%c GridManager Warn %c b ");

        observer.clear();
        assert!(observer.diagnostics().is_empty());
    }
}
