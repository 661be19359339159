use crate::rtp::rtp_packet::RtpPacket;

use super::position_type::PositionType;

/// A buffered packet together with its cached classification.
#[derive(Debug, Clone)]
pub struct OrderedPacket {
    pub packet: RtpPacket,
    pub position: PositionType,
}

impl OrderedPacket {
    pub fn new(packet: RtpPacket, position: PositionType) -> Self {
        Self { packet, position }
    }

    #[inline]
    pub fn seq(&self) -> u16 {
        self.packet.seq()
    }

    #[inline]
    pub fn body(&self) -> &[u8] {
        self.packet.body()
    }
}
