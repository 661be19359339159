use std::fmt;
use std::num::ParseIntError;

use super::rtp_map::RtpMapParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdpError {
    Missing(&'static str),
    Invalid(&'static str),
    ParseInt(ParseIntError),
    RtpMap(RtpMapParseError),
}

impl From<ParseIntError> for SdpError {
    fn from(e: ParseIntError) -> Self {
        Self::ParseInt(e)
    }
}

impl From<RtpMapParseError> for SdpError {
    fn from(e: RtpMapParseError) -> Self {
        Self::RtpMap(e)
    }
}

impl fmt::Display for SdpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdpError::Missing(msg) => write!(f, "Missing field: {}", msg),
            SdpError::Invalid(msg) => write!(f, "Invalid field: {}", msg),
            SdpError::ParseInt(e) => write!(f, "Parse int error: {}", e),
            SdpError::RtpMap(e) => write!(f, "Bad rtpmap: {}", e),
        }
    }
}

impl std::error::Error for SdpError {}
