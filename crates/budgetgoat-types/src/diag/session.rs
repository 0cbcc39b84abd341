use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ambient context stamped onto every diagnostic entry.
///
/// Created once per process lifetime and never mutated; the `session_id`
/// survives `clear_logs` and only changes on the next launch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerSession {
    /// Freshly generated identifier for this process lifetime.
    pub session_id: String,

    /// Host OS name (e.g. "linux", "macos").
    pub platform: String,

    /// Host CPU architecture (e.g. "x86_64", "aarch64").
    pub arch: String,

    /// When the session was created.
    pub started_at: DateTime<Utc>,
}

impl LoggerSession {
    /// Generate a fresh session for the current process.
    pub fn generate() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            platform: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            started_at: Utc::now(),
        }
    }
}
