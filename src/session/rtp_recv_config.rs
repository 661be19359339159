use crate::depacketizer::video_codec::VideoCodec;

#[derive(Debug, Clone)]
pub struct RtpRecvConfig {
    pub codec: VideoCodec,
    pub clock_rate: u32,
    /// Packets with any other payload type are rejected. `None` accepts all.
    pub payload_type: Option<u8>,
    /// If the description didn't expose an SSRC, allow None and learn it on the first packet.
    pub remote_ssrc: Option<u32>,
}

impl RtpRecvConfig {
    pub fn new(codec: VideoCodec, clock_rate: u32) -> Self {
        Self {
            codec,
            clock_rate,
            payload_type: None,
            remote_ssrc: None,
        }
    }

    pub fn with_payload_type(mut self, pt: u8) -> Self {
        self.payload_type = Some(pt);
        self
    }

    pub fn with_remote_ssrc(mut self, ssrc: u32) -> Self {
        self.remote_ssrc = Some(ssrc);
        self
    }
}
