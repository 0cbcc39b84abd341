use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

// NOTE: Schema Design Goals
//
// 1. Immutability: an entry is frozen at creation time; `retry_count` is the
//    single field that may be rewritten afterwards (keyed by `id`), so retry
//    bookkeeping never forks the record.
// 2. Correlation: every entry carries the process-lifetime `session_id`,
//    letting exported snapshots from different launches be told apart.
// 3. Self-description: `stack` and `component_stack` are optional and only
//    populated for error-level entries that captured a failure chain, so
//    info/warning records stay small.

/// Severity of a diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Error,
    Warning,
    Info,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Warning => write!(f, "WARNING"),
            LogLevel::Info => write!(f, "INFO"),
        }
    }
}

/// Single diagnostic record held by the ring buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique entry ID, generated at log time.
    pub id: Uuid,

    /// Creation timestamp (UTC), never mutated.
    pub timestamp: DateTime<Utc>,

    /// Severity, fixed at creation.
    pub level: LogLevel,

    /// Logical subsystem that produced the entry (e.g. "Budget", "Prefs").
    pub context: String,

    /// Human-readable description.
    pub message: String,

    /// Rendered failure cause chain, error-level entries only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,

    /// Caller-supplied component trace, error-level entries only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_stack: Option<String>,

    /// Retry bookkeeping; the only field mutable after creation.
    #[serde(default)]
    pub retry_count: u32,

    /// Session the entry belongs to, constant for the process lifetime.
    pub session_id: String,

    /// Free-form extra context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}
