use crate::config::LoggerConfig;
use crate::sink::{ConsoleSink, RemoteSink, StderrConsole};
use budgetgoat_types::{LogEntry, LogLevel, LoggerSession};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::mpsc::{Sender, channel};
use std::sync::{Arc, Mutex};
use std::thread;
use uuid::Uuid;

/// Central in-process collector for error/warning/info diagnostics.
///
/// Entries live in a bounded FIFO buffer for the process lifetime; the
/// buffer never grows past `max_local_logs` and eviction drops the
/// oldest entries first. Every public operation upholds the never-throw
/// contract: logging a failure can never itself fail.
pub struct DiagnosticsLogger {
    session: LoggerSession,
    config: LoggerConfig,
    buffer: Mutex<VecDeque<LogEntry>>,
    console: Option<Box<dyn ConsoleSink>>,
    remote: Option<Sender<String>>,
}

#[derive(Serialize)]
struct ExportSnapshot<'a> {
    session_id: &'a str,
    timestamp: DateTime<Utc>,
    logs: &'a [LogEntry],
}

impl DiagnosticsLogger {
    pub fn new(config: LoggerConfig) -> Self {
        let console = config
            .enable_console_logging
            .then(|| Box::new(StderrConsole) as Box<dyn ConsoleSink>);

        Self {
            session: LoggerSession::generate(),
            config,
            buffer: Mutex::new(VecDeque::new()),
            console,
            remote: None,
        }
    }

    /// Replace the console sink (tests install a recording sink).
    pub fn with_console_sink(mut self, sink: Box<dyn ConsoleSink>) -> Self {
        self.console = Some(sink);
        self
    }

    /// Install a remote sink and start its forwarding worker.
    ///
    /// Ignored unless `enable_remote_logging` is set. Entries are handed
    /// to a detached worker over a channel, so the logging call never
    /// waits on delivery; a delivery failure is echoed to stderr and
    /// otherwise swallowed.
    pub fn with_remote_sink(mut self, sink: Arc<dyn RemoteSink>) -> Self {
        if !self.config.enable_remote_logging {
            return self;
        }

        let (tx, rx) = channel::<String>();
        thread::spawn(move || {
            while let Ok(payload) = rx.recv() {
                if let Err(err) = sink.send(&payload) {
                    eprintln!("remote log delivery failed: {}", err);
                }
            }
        });
        self.remote = Some(tx);
        self
    }

    pub fn session(&self) -> &LoggerSession {
        &self.session
    }

    pub fn session_id(&self) -> &str {
        &self.session.session_id
    }

    /// Record an error-level entry from a caught failure.
    ///
    /// The message is the error's `Display` form; the `stack` field is
    /// the rendered `source()` chain when one exists. Returns the entry
    /// id for later correlation (retry bumps).
    pub fn log_error(
        &self,
        context: &str,
        error: &dyn std::error::Error,
        component_stack: Option<String>,
        metadata: Option<Value>,
    ) -> Uuid {
        self.append(
            LogLevel::Error,
            context,
            error.to_string(),
            render_source_chain(error),
            component_stack,
            metadata,
        )
    }

    pub fn log_warning(
        &self,
        context: &str,
        message: impl Into<String>,
        metadata: Option<Value>,
    ) -> Uuid {
        self.append(LogLevel::Warning, context, message.into(), None, None, metadata)
    }

    pub fn log_info(
        &self,
        context: &str,
        message: impl Into<String>,
        metadata: Option<Value>,
    ) -> Uuid {
        self.append(LogLevel::Info, context, message.into(), None, None, metadata)
    }

    /// Set `retry_count` on the entry with the given id.
    ///
    /// Silent no-op when the id is unknown; the entry may simply have
    /// been evicted already.
    pub fn update_retry_count(&self, id: Uuid, count: u32) {
        let mut buffer = self.buffer.lock().unwrap();
        if let Some(entry) = buffer.iter_mut().find(|entry| entry.id == id) {
            entry.retry_count = count;
        }
    }

    /// All buffered entries in chronological order, as a defensive copy.
    pub fn local_logs(&self) -> Vec<LogEntry> {
        self.buffer.lock().unwrap().iter().cloned().collect()
    }

    pub fn logs_by_context(&self, context: &str) -> Vec<LogEntry> {
        self.buffer
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.context == context)
            .cloned()
            .collect()
    }

    pub fn logs_by_level(&self, level: LogLevel) -> Vec<LogEntry> {
        self.buffer
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.level == level)
            .cloned()
            .collect()
    }

    /// Last `n` entries in chronological order.
    pub fn recent_logs(&self, n: usize) -> Vec<LogEntry> {
        let buffer = self.buffer.lock().unwrap();
        let skip = buffer.len().saturating_sub(n);
        buffer.iter().skip(skip).cloned().collect()
    }

    /// Empty the buffer. The session id is unaffected.
    pub fn clear_logs(&self) {
        self.buffer.lock().unwrap().clear();
    }

    /// JSON snapshot of `{session_id, timestamp, logs}` for bug reports.
    pub fn export_logs(&self) -> String {
        let logs = self.local_logs();
        let snapshot = ExportSnapshot {
            session_id: &self.session.session_id,
            timestamp: Utc::now(),
            logs: &logs,
        };
        serde_json::to_string(&snapshot).unwrap_or_else(|_| String::from("{}"))
    }

    fn append(
        &self,
        level: LogLevel,
        context: &str,
        message: String,
        stack: Option<String>,
        component_stack: Option<String>,
        metadata: Option<Value>,
    ) -> Uuid {
        let entry = LogEntry {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            level,
            context: context.to_string(),
            message,
            stack,
            component_stack,
            retry_count: 0,
            session_id: self.session.session_id.clone(),
            metadata,
        };
        let id = entry.id;

        self.echo(&entry);
        self.forward(&entry);

        let mut buffer = self.buffer.lock().unwrap();
        buffer.push_back(entry);
        while buffer.len() > self.config.max_local_logs {
            buffer.pop_front();
        }

        id
    }

    fn echo(&self, entry: &LogEntry) {
        let Some(console) = &self.console else {
            return;
        };

        // Stable line shape; developers grep for it.
        let line = format!(
            "[{}] {} [{}] {} (ID: {})",
            entry.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            entry.level,
            entry.context,
            entry.message,
            entry.id
        );

        match entry.level {
            LogLevel::Error => console.error(&line, entry),
            LogLevel::Warning => console.warn(&line, entry),
            LogLevel::Info => console.info(&line, entry),
        }
    }

    fn forward(&self, entry: &LogEntry) {
        let Some(tx) = &self.remote else {
            return;
        };
        if let Ok(payload) = serde_json::to_string(entry) {
            let _ = tx.send(payload);
        }
    }
}

/// Render an error's `source()` chain, innermost cause last.
fn render_source_chain(error: &dyn std::error::Error) -> Option<String> {
    let mut frames = Vec::new();
    let mut source = error.source();
    while let Some(cause) = source {
        frames.push(format!("caused by: {}", cause));
        source = cause.source();
    }

    if frames.is_empty() {
        None
    } else {
        Some(frames.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::SinkError;
    use std::fmt;
    use std::sync::mpsc::channel as std_channel;
    use std::time::Duration;

    /// Console double that records every echoed line.
    #[derive(Default)]
    struct RecordingConsole {
        lines: Mutex<Vec<(LogLevel, String)>>,
    }

    impl RecordingConsole {
        fn lines(&self) -> Vec<(LogLevel, String)> {
            self.lines.lock().unwrap().clone()
        }
    }

    impl ConsoleSink for Arc<RecordingConsole> {
        fn error(&self, line: &str, _entry: &LogEntry) {
            self.lines.lock().unwrap().push((LogLevel::Error, line.to_string()));
        }

        fn warn(&self, line: &str, _entry: &LogEntry) {
            self.lines.lock().unwrap().push((LogLevel::Warning, line.to_string()));
        }

        fn info(&self, line: &str, _entry: &LogEntry) {
            self.lines.lock().unwrap().push((LogLevel::Info, line.to_string()));
        }
    }

    /// Remote double that rejects every delivery.
    struct FailingRemote;

    impl RemoteSink for FailingRemote {
        fn send(&self, _payload: &str) -> Result<(), SinkError> {
            Err(SinkError("connection refused".to_string()))
        }
    }

    /// Remote double that reports every delivery on a channel.
    struct NotifyingRemote(Sender<String>);

    impl RemoteSink for NotifyingRemote {
        fn send(&self, payload: &str) -> Result<(), SinkError> {
            let _ = self.0.send(payload.to_string());
            Ok(())
        }
    }

    #[derive(Debug)]
    struct LeafError;

    impl fmt::Display for LeafError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "disk full")
        }
    }

    impl std::error::Error for LeafError {}

    #[derive(Debug)]
    struct WrapError(LeafError);

    impl fmt::Display for WrapError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "failed to persist budget")
        }
    }

    impl std::error::Error for WrapError {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    fn quiet_logger(max_local_logs: usize) -> DiagnosticsLogger {
        DiagnosticsLogger::new(
            LoggerConfig::default()
                .with_max_local_logs(max_local_logs)
                .with_console_logging(false),
        )
    }

    #[test]
    fn test_fifo_eviction_capacity_three() {
        let logger = quiet_logger(3);
        for message in ["1", "2", "3", "4"] {
            logger.log_info("Test", message, None);
        }

        let logs = logger.local_logs();
        let messages: Vec<&str> = logs.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["2", "3", "4"]);
    }

    #[test]
    fn test_fifo_eviction_capacity_two() {
        let logger = quiet_logger(2);
        logger.log_info("A", "1", None);
        logger.log_info("A", "2", None);
        logger.log_info("A", "3", None);

        let messages: Vec<String> = logger
            .local_logs()
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(messages, ["2", "3"]);
    }

    #[test]
    fn test_update_retry_count() {
        let logger = quiet_logger(10);
        let id = logger.log_warning("Budget", "save failed, will retry", None);

        logger.update_retry_count(id, 2);

        let logs = logger.local_logs();
        let entry = logs.iter().find(|e| e.id == id).unwrap();
        assert_eq!(entry.retry_count, 2);
    }

    #[test]
    fn test_update_retry_count_unknown_id_is_noop() {
        let logger = quiet_logger(10);
        logger.log_info("A", "1", None);

        let before = logger.local_logs();
        logger.update_retry_count(Uuid::new_v4(), 7);
        let after = logger.local_logs();

        assert_eq!(before.len(), after.len());
        assert!(after.iter().all(|e| e.retry_count == 0));
    }

    #[test]
    fn test_local_logs_is_a_defensive_copy() {
        let logger = quiet_logger(10);
        logger.log_info("A", "1", None);

        let mut copy = logger.local_logs();
        copy.clear();

        assert_eq!(logger.local_logs().len(), 1);
    }

    #[test]
    fn test_filters_by_context_and_level() {
        let logger = quiet_logger(10);
        logger.log_info("Budget", "created pocket", None);
        logger.log_warning("Prefs", "corrupt value", None);
        logger.log_info("Budget", "recorded transaction", None);

        assert_eq!(logger.logs_by_context("Budget").len(), 2);
        assert_eq!(logger.logs_by_context("Prefs").len(), 1);
        assert_eq!(logger.logs_by_level(LogLevel::Warning).len(), 1);
        assert_eq!(logger.logs_by_level(LogLevel::Error).len(), 0);
    }

    #[test]
    fn test_recent_logs_keeps_chronological_order() {
        let logger = quiet_logger(10);
        for message in ["1", "2", "3", "4"] {
            logger.log_info("A", message, None);
        }

        let recent: Vec<String> = logger
            .recent_logs(2)
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(recent, ["3", "4"]);

        // Asking for more than exists returns everything.
        assert_eq!(logger.recent_logs(99).len(), 4);
    }

    #[test]
    fn test_clear_logs_keeps_session_id() {
        let logger = quiet_logger(10);
        logger.log_info("A", "1", None);
        let session_id = logger.session_id().to_string();

        logger.clear_logs();

        assert!(logger.local_logs().is_empty());
        assert_eq!(logger.session_id(), session_id);
    }

    #[test]
    fn test_log_error_captures_source_chain() {
        let logger = quiet_logger(10);
        let id = logger.log_error(
            "Budget",
            &WrapError(LeafError),
            Some("PocketList > PocketRow".to_string()),
            None,
        );

        let logs = logger.local_logs();
        let entry = logs.iter().find(|e| e.id == id).unwrap();
        assert_eq!(entry.message, "failed to persist budget");
        assert_eq!(entry.stack.as_deref(), Some("caused by: disk full"));
        assert_eq!(entry.component_stack.as_deref(), Some("PocketList > PocketRow"));
    }

    #[test]
    fn test_log_error_without_source_has_no_stack() {
        let logger = quiet_logger(10);
        let id = logger.log_error("Budget", &LeafError, None, None);

        let logs = logger.local_logs();
        assert_eq!(logs.iter().find(|e| e.id == id).unwrap().stack, None);
    }

    #[test]
    fn test_console_echo_line_format() {
        let console = Arc::new(RecordingConsole::default());
        let logger = DiagnosticsLogger::new(LoggerConfig::default().with_max_local_logs(10))
            .with_console_sink(Box::new(console.clone()));

        let id = logger.log_info("Budget", "created pocket", None);

        let lines = console.lines();
        assert_eq!(lines.len(), 1);
        let (level, line) = &lines[0];
        assert_eq!(*level, LogLevel::Info);
        assert!(line.starts_with('['));
        assert!(line.contains("] INFO [Budget] created pocket"));
        assert!(line.ends_with(&format!("(ID: {})", id)));
    }

    #[test]
    fn test_remote_sink_failure_never_reaches_caller() {
        let logger = DiagnosticsLogger::new(
            LoggerConfig::default()
                .with_max_local_logs(10)
                .with_console_logging(false)
                .with_remote_logging(true),
        )
        .with_remote_sink(Arc::new(FailingRemote));

        // The call returns normally and the local buffer is intact.
        let id = logger.log_error("Budget", &LeafError, None, None);
        assert!(logger.local_logs().iter().any(|e| e.id == id));
    }

    #[test]
    fn test_remote_sink_receives_serialized_entries() {
        let (tx, rx) = std_channel();
        let logger = DiagnosticsLogger::new(
            LoggerConfig::default()
                .with_max_local_logs(10)
                .with_console_logging(false)
                .with_remote_logging(true),
        )
        .with_remote_sink(Arc::new(NotifyingRemote(tx)));

        logger.log_info("Budget", "created pocket", None);

        let payload = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        let value: Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["message"], "created pocket");
        assert_eq!(value["session_id"], logger.session_id());
    }

    #[test]
    fn test_remote_sink_ignored_when_disabled() {
        let (tx, rx) = std_channel();
        let logger = DiagnosticsLogger::new(
            LoggerConfig::default()
                .with_max_local_logs(10)
                .with_console_logging(false),
        )
        .with_remote_sink(Arc::new(NotifyingRemote(tx)));

        logger.log_info("Budget", "created pocket", None);

        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    }

    #[test]
    fn test_export_logs_snapshot_shape() {
        let logger = quiet_logger(10);
        logger.log_info("Budget", "created pocket", None);
        logger.log_warning("Prefs", "corrupt value", None);

        let snapshot: Value = serde_json::from_str(&logger.export_logs()).unwrap();
        assert_eq!(snapshot["session_id"], logger.session_id());
        assert!(snapshot["timestamp"].is_string());
        assert_eq!(snapshot["logs"].as_array().unwrap().len(), 2);
        assert_eq!(snapshot["logs"][0]["message"], "created pocket");
    }
}
