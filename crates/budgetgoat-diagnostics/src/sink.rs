use budgetgoat_types::LogEntry;
use std::fmt;

/// Failure reported by a remote sink delivery attempt.
///
/// Swallowed by the forwarding worker; never reaches the logging caller.
#[derive(Debug)]
pub struct SinkError(pub String);

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sink error: {}", self.0)
    }
}

impl std::error::Error for SinkError {}

/// Leveled text output target for console echoing.
///
/// Receives the pre-formatted echo line plus the structured entry, so an
/// implementation can print either or both.
pub trait ConsoleSink: Send + Sync {
    fn error(&self, line: &str, entry: &LogEntry);
    fn warn(&self, line: &str, entry: &LogEntry);
    fn info(&self, line: &str, entry: &LogEntry);
}

/// Remote delivery target for diagnostic entries.
///
/// Called from a detached worker thread with the JSON-serialized entry;
/// implementations may block, the logging caller never does. No concrete
/// transport ships with this crate — the host application decides.
pub trait RemoteSink: Send + Sync {
    fn send(&self, payload: &str) -> Result<(), SinkError>;
}

/// Default console sink: errors and warnings to stderr, info to stdout,
/// each followed by the entry as single-line JSON.
pub struct StderrConsole;

impl StderrConsole {
    fn render(entry: &LogEntry) -> String {
        serde_json::to_string(entry).unwrap_or_default()
    }
}

impl ConsoleSink for StderrConsole {
    fn error(&self, line: &str, entry: &LogEntry) {
        eprintln!("{} {}", line, Self::render(entry));
    }

    fn warn(&self, line: &str, entry: &LogEntry) {
        eprintln!("{} {}", line, Self::render(entry));
    }

    fn info(&self, line: &str, entry: &LogEntry) {
        println!("{} {}", line, Self::render(entry));
    }
}
