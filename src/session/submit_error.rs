use std::fmt;

use crate::rtp::rtp_error::RtpError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    Parse(RtpError),
    Disposed,
    UnexpectedPayloadType(u8),
    UnexpectedSsrc(u32),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use SubmitError::*;
        match self {
            Parse(e) => write!(f, "malformed RTP packet: {e}"),
            Disposed => write!(f, "receive leg already disposed"),
            UnexpectedPayloadType(pt) => write!(f, "unexpected payload type {pt}"),
            UnexpectedSsrc(ssrc) => write!(f, "unexpected SSRC {ssrc:#010x}"),
        }
    }
}

impl std::error::Error for SubmitError {}

impl From<RtpError> for SubmitError {
    fn from(e: RtpError) -> Self {
        Self::Parse(e)
    }
}
