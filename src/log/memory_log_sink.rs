use std::sync::Mutex;

use crate::{
    log::{log_level::LogLevel, log_msg::LogMsg, log_sink::LogSink},
    utils::now_millis,
};

/// Sink that keeps every entry in memory.
///
/// Used by the replay tool's `--verbose` dump and by tests that assert a
/// diagnostic was raised.
#[derive(Debug, Default)]
pub struct MemoryLogSink {
    entries: Mutex<Vec<LogMsg>>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies out everything captured so far.
    pub fn entries(&self) -> Vec<LogMsg> {
        self.entries
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    /// Number of captured entries at `level`.
    pub fn count(&self, level: LogLevel) -> usize {
        self.entries
            .lock()
            .map(|v| v.iter().filter(|m| m.level == level).count())
            .unwrap_or(0)
    }

    /// True if any captured entry at `level` contains `needle`.
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.entries
            .lock()
            .map(|v| v.iter().any(|m| m.level == level && m.text.contains(needle)))
            .unwrap_or(false)
    }
}

impl LogSink for MemoryLogSink {
    fn log(&self, level: LogLevel, msg: &str, target: &'static str) {
        if let Ok(mut v) = self.entries.lock() {
            v.push(LogMsg::new(level, msg, target, now_millis()));
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn captures_entries_in_order() {
        let sink = MemoryLogSink::new();
        sink.log(LogLevel::Warn, "first", "t");
        sink.log(LogLevel::Error, "second", "t");

        let all = sink.entries();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].text, "first");
        assert_eq!(all[1].level, LogLevel::Error);
        assert_eq!(sink.count(LogLevel::Warn), 1);
        assert!(sink.contains(LogLevel::Error, "sec"));
        assert!(!sink.contains(LogLevel::Warn, "sec"));
    }
}
