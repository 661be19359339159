use std::{fmt, io};

#[derive(Debug)]
pub enum DumpError {
    Io(io::Error),
    UnknownKind(u32),
    UnsupportedVersion(u32),
    /// The stream ended inside a record.
    Truncated { expected: usize, got: usize },
    BodyTooLarge(usize),
}

impl fmt::Display for DumpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use DumpError::*;
        match self {
            Io(e) => write!(f, "dump I/O error: {e}"),
            UnknownKind(k) => write!(f, "unknown dump record type {k}"),
            UnsupportedVersion(v) => write!(f, "unsupported dump version {v}"),
            Truncated { expected, got } => {
                write!(f, "truncated dump record: expected {expected} bytes, got {got}")
            }
            BodyTooLarge(n) => write!(f, "dump record body too large: {n} bytes"),
        }
    }
}

impl std::error::Error for DumpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DumpError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DumpError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
