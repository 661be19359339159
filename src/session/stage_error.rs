use std::fmt;

use super::{session_stage::SessionStage, stage_event::StageEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageError {
    InvalidTransition { from: SessionStage, event: StageEvent },
    Disposed,
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use StageError::*;
        match self {
            InvalidTransition { from, event } => {
                write!(f, "invalid stage transition: {event} while {from}")
            }
            Disposed => write!(f, "receive leg already disposed"),
        }
    }
}

impl std::error::Error for StageError {}
