use std::fmt;

use crate::{
    sdp::sdp_error::SdpError, session::stage_error::StageError,
    unpacker::unpacker_error::UnpackerError,
};

use super::dump_error::DumpError;

#[derive(Debug)]
pub enum ReplayError {
    Dump(DumpError),
    Sdp(SdpError),
    Unpacker(UnpackerError),
    Stage(StageError),
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ReplayError::*;
        match self {
            Dump(e) => write!(f, "replay: {e}"),
            Sdp(e) => write!(f, "replay: bad session description: {e}"),
            Unpacker(e) => write!(f, "replay: {e}"),
            Stage(e) => write!(f, "replay: {e}"),
        }
    }
}

impl std::error::Error for ReplayError {}

impl From<DumpError> for ReplayError {
    fn from(e: DumpError) -> Self {
        Self::Dump(e)
    }
}

impl From<SdpError> for ReplayError {
    fn from(e: SdpError) -> Self {
        Self::Sdp(e)
    }
}

impl From<UnpackerError> for ReplayError {
    fn from(e: UnpackerError) -> Self {
        Self::Unpacker(e)
    }
}

impl From<StageError> for ReplayError {
    fn from(e: StageError) -> Self {
        Self::Stage(e)
    }
}
