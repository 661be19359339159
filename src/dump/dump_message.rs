use std::fmt;

use super::dump_error::DumpError;

/// Record type of a dump file entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpKind {
    FileHeader = 1,
    Sdp = 2,
    Rtp = 3,
}

impl TryFrom<u32> for DumpKind {
    type Error = DumpError;

    fn try_from(v: u32) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(Self::FileHeader),
            2 => Ok(Self::Sdp),
            3 => Ok(Self::Rtp),
            other => Err(DumpError::UnknownKind(other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpMessage {
    pub version: u32,
    pub kind: DumpKind,
    /// Wall-clock capture time in milliseconds. Informational only.
    pub capture_ms: u64,
    pub body: Vec<u8>,
}

impl fmt::Display for DumpMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "v={} kind={:?} at={}ms len={}",
            self.version,
            self.kind,
            self.capture_ms,
            self.body.len()
        )
    }
}
