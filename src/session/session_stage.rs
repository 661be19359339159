use std::fmt;

use super::{stage_error::StageError, stage_event::StageEvent};

/// Where a receive leg is in its negotiation. Reconstructed units only leave
/// the leg while `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStage {
    #[default]
    AwaitDescribe,
    SdpSent,
    Playing,
}

impl SessionStage {
    /// Exhaustive transition table. On error the caller keeps its stage.
    pub fn on_event(self, event: StageEvent) -> Result<SessionStage, StageError> {
        use SessionStage::*;
        use StageEvent::*;
        match (self, event) {
            (AwaitDescribe, SdpReceived) => Ok(SdpSent),
            (SdpSent, SdpReceived) => Ok(SdpSent),
            (SdpSent, PlayReceived) => Ok(Playing),
            (Playing, PlayReceived) => Ok(Playing),
            (AwaitDescribe, PlayReceived) | (Playing, SdpReceived) => {
                Err(StageError::InvalidTransition { from: self, event })
            }
        }
    }

    #[inline]
    pub fn is_playing(self) -> bool {
        self == SessionStage::Playing
    }
}

impl fmt::Display for SessionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStage::AwaitDescribe => "await-describe",
            SessionStage::SdpSent => "sdp-sent",
            SessionStage::Playing => "playing",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use SessionStage::*;
    use StageEvent::*;

    #[test]
    fn happy_path_reaches_playing() {
        let s = AwaitDescribe.on_event(SdpReceived).unwrap();
        assert_eq!(s, SdpSent);
        let s = s.on_event(PlayReceived).unwrap();
        assert!(s.is_playing());
    }

    #[test]
    fn repeated_events_are_idempotent_where_allowed() {
        assert_eq!(SdpSent.on_event(SdpReceived), Ok(SdpSent));
        assert_eq!(Playing.on_event(PlayReceived), Ok(Playing));
    }

    #[test]
    fn play_before_describe_is_rejected() {
        assert_eq!(
            AwaitDescribe.on_event(PlayReceived),
            Err(StageError::InvalidTransition {
                from: AwaitDescribe,
                event: PlayReceived
            })
        );
    }

    #[test]
    fn describe_while_playing_is_rejected() {
        let err = Playing.on_event(SdpReceived).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid stage transition: sdp-received while playing"
        );
    }
}
