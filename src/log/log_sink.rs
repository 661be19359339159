use crate::log::log_level::LogLevel;

/// Logging capability handed to every component at construction.
///
/// Implementations must never block: the unpacking path calls this from the
/// same context that delivered the packet.
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, msg: &str, target: &'static str);
}
