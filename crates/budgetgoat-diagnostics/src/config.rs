/// Tuning knobs for [`DiagnosticsLogger`](crate::DiagnosticsLogger).
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Buffer capacity; appending past it evicts the oldest entries first.
    pub max_local_logs: usize,

    /// Echo each entry to the console sink as it is recorded.
    pub enable_console_logging: bool,

    /// Forward each entry to the remote sink, if one is installed.
    pub enable_remote_logging: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_local_logs: 100,
            enable_console_logging: true,
            enable_remote_logging: false,
        }
    }
}

impl LoggerConfig {
    pub fn with_max_local_logs(mut self, max_local_logs: usize) -> Self {
        self.max_local_logs = max_local_logs;
        self
    }

    pub fn with_console_logging(mut self, enabled: bool) -> Self {
        self.enable_console_logging = enabled;
        self
    }

    pub fn with_remote_logging(mut self, enabled: bool) -> Self {
        self.enable_remote_logging = enabled;
        self
    }
}
