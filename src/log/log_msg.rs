use crate::log::log_level::LogLevel;

/// One diagnostic line, as queued to the file logger or captured in memory.
#[derive(Debug, Clone)]
pub struct LogMsg {
    /// Severity of the entry.
    pub level: LogLevel,
    /// Wall-clock time the entry was produced, in milliseconds since the epoch.
    pub ts_ms: u128,
    /// Rendered message.
    pub text: String,
    /// Module path of the producer.
    pub target: &'static str,
}

impl LogMsg {
    /// Creates a new `LogMsg`.
    ///
    /// ```rust,ignore
    /// let msg = LogMsg::new(LogLevel::Warn, "fragment run abandoned", module_path!(), 0);
    /// ```
    pub fn new(
        level: LogLevel,
        text: impl Into<String>,
        target: &'static str,
        ts_ms: u128,
    ) -> Self {
        Self {
            level,
            ts_ms,
            text: text.into(),
            target,
        }
    }

    /// Single-line rendering used by the file writer.
    pub fn render(&self) -> String {
        format!(
            "[{}] {} {} | {}",
            self.level, self.ts_ms, self.target, self.text
        )
    }
}
