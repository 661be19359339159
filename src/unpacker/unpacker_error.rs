use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnpackerError {
    /// Clock rates below 1 kHz cannot be converted to milliseconds.
    InvalidClockRate(u32),
}

impl fmt::Display for UnpackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use UnpackerError::*;
        match self {
            InvalidClockRate(r) => write!(f, "invalid clock rate: {r} Hz (must be >= 1000)"),
        }
    }
}

impl std::error::Error for UnpackerError {}
