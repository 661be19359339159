use std::fmt;

use bytes::Bytes;

use super::video_codec::VideoCodec;

/// A reconstructed frame: one or more NAL units, each prefixed with its
/// 4-byte big-endian length (AVCC layout).
///
/// Produced only by a successful reconstruction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessUnit {
    pub payload_type: VideoCodec,
    /// Presentation time in milliseconds: RTP timestamp / (clock rate / 1000).
    pub timestamp: u64,
    pub payload: Bytes,
}

impl AccessUnit {
    /// Iterates the NAL units without their length prefixes.
    ///
    /// Stops early on a truncated record; payloads built by the depacketizer
    /// are always well-formed.
    pub fn nal_units(&self) -> NalUnits<'_> {
        NalUnits { rest: &self.payload }
    }
}

impl fmt::Display for AccessUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type={}, ts={}ms, len={}, nalus={}",
            self.payload_type,
            self.timestamp,
            self.payload.len(),
            self.nal_units().count()
        )
    }
}

pub struct NalUnits<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for NalUnits<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.len() < 4 {
            return None;
        }
        let len =
            u32::from_be_bytes([self.rest[0], self.rest[1], self.rest[2], self.rest[3]]) as usize;
        if self.rest.len() - 4 < len {
            self.rest = &[];
            return None;
        }
        let (unit, tail) = self.rest[4..].split_at(len);
        self.rest = tail;
        Some(unit)
    }
}
