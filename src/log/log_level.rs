use std::fmt;

/// Severity of a diagnostic emitted by the unpacking pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Per-packet tracing (classification results, buffer moves).
    Trace,
    /// Useful while diagnosing a capture: stale packets, gated output.
    Debug,
    /// Lifecycle of legs and sessions.
    Info,
    /// Recoverable data loss: unknown units, abandoned runs, evictions.
    Warn,
    /// Malformed input that had to be dropped.
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
