//! Transient user notifications.

use colored::Colorize;
use std::fmt;

/// Notification severity, which picks the icon and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
    Info,
}

impl Severity {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Warning => "⚠️",
            Self::Error => "✕",
            Self::Info => "ℹ️",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
        };
        f.write_str(name)
    }
}

/// Fire-and-forget notification surface.
pub trait Notifier {
    fn notify(&mut self, message: &str, severity: Severity);
}

/// Prints notifications to stderr with a colored icon.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&mut self, message: &str, severity: Severity) {
        let line = format!("{} {}", severity.icon(), message);
        let line = match severity {
            Severity::Success => line.green(),
            Severity::Warning => line.yellow(),
            Severity::Error => line.red().bold(),
            Severity::Info => line.magenta(),
        };
        eprintln!("{}", line);
    }
}

/// A recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

/// Keeps notifications in memory, for embedding hosts and tests.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notifications: Vec<Notification>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn last(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    /// Empties the record, returning what was there.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&mut self, message: &str, severity: Severity) {
        self.notifications.push(Notification {
            message: message.to_string(),
            severity,
        });
    }
}
