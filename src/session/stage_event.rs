/// Negotiation events that move a receive leg towards `Playing`. Receiving
/// a session description moves the stage to `SdpSent`; the stage is named
/// after the reply that goes back to the peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEvent {
    /// A session description for this leg was received.
    SdpReceived,
    /// The peer asked to start playback.
    PlayReceived,
}

impl std::fmt::Display for StageEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageEvent::SdpReceived => write!(f, "sdp-received"),
            StageEvent::PlayReceived => write!(f, "play-received"),
        }
    }
}
