//! RTP packet as handed to the unpacker: decoded header plus a zero-copy view
//! of the payload (RFC 3550).

use bytes::Bytes;

use super::{rtp_error::RtpError, rtp_header::RtpHeader};

/// Complete RTP packet (header + payload). Immutable once decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpPacket {
    pub header: RtpHeader,
    /// The packet exactly as received; kept for diagnostics.
    raw: Bytes,
    /// Payload without trailing padding bytes.
    payload: Bytes,
    /// Count of padding bytes (from the last byte) if the P bit was set.
    pub padding_bytes: u8,
}

impl RtpPacket {
    /// Decodes a packet, copying `buf` once.
    pub fn decode(buf: &[u8]) -> Result<Self, RtpError> {
        Self::decode_bytes(Bytes::copy_from_slice(buf))
    }

    /// Decodes a packet that already lives in a `Bytes` without copying.
    pub fn decode_bytes(raw: Bytes) -> Result<Self, RtpError> {
        let (header, payload_off) = RtpHeader::decode(&raw)?;

        let mut end = raw.len();
        let mut padding_bytes = 0u8;
        if header.padding {
            let count = raw[end - 1];
            if count == 0 || usize::from(count) > end - payload_off {
                return Err(RtpError::PaddingTooShort);
            }
            padding_bytes = count;
            end -= usize::from(count);
        }

        let payload = raw.slice(payload_off..end);
        Ok(Self {
            header,
            raw,
            payload,
            padding_bytes,
        })
    }

    /// Builds a packet from parts, as a sender would. Mainly for fixtures.
    pub fn new(mut header: RtpHeader, payload: &[u8]) -> Self {
        header.padding = false;
        let mut out = Vec::with_capacity(12 + payload.len());
        header.encode_into(&mut out);
        let payload_off = out.len();
        out.extend_from_slice(payload);
        let raw = Bytes::from(out);
        let payload = raw.slice(payload_off..);
        Self {
            header,
            raw,
            payload,
            padding_bytes: 0,
        }
    }

    /// Convenience constructor.
    pub fn simple(
        payload_type: u8,
        marker: bool,
        seq: u16,
        ts: u32,
        ssrc: u32,
        payload: &[u8],
    ) -> Self {
        let header = RtpHeader::new(payload_type, seq, ts, ssrc).with_marker(marker);
        Self::new(header, payload)
    }

    /// Payload bytes after the header, padding stripped.
    #[inline]
    pub fn body(&self) -> &[u8] {
        &self.payload
    }

    #[inline]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    #[inline]
    pub fn seq(&self) -> u16 {
        self.header.sequence_number
    }

    #[inline]
    pub fn timestamp(&self) -> u32 {
        self.header.timestamp
    }

    #[inline]
    pub fn payload_type(&self) -> u8 {
        self.header.payload_type
    }

    #[inline]
    pub fn ssrc(&self) -> u32 {
        self.header.ssrc
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::rtp::rtp_header_extension::RtpHeaderExtension;

    #[test]
    fn decode_minimal_packet() {
        let raw = [
            0x80, 0xE0, 0x00, 0x64, 0x00, 0x01, 0x5F, 0x90, 0xDE, 0xAD, 0xBE, 0xEF, 0x65, 0x88,
        ];
        let pkt = RtpPacket::decode(&raw).expect("valid packet");
        assert_eq!(pkt.seq(), 100);
        assert_eq!(pkt.timestamp(), 90_000);
        assert_eq!(pkt.payload_type(), 96);
        assert!(pkt.header.marker);
        assert_eq!(pkt.ssrc(), 0xDEAD_BEEF);
        assert_eq!(pkt.body(), &[0x65, 0x88]);
        assert_eq!(pkt.raw(), &raw);
    }

    #[test]
    fn too_short_is_rejected() {
        assert_eq!(RtpPacket::decode(&[0x80, 0x60, 0x00]), Err(RtpError::TooShort(3)));
    }

    #[test]
    fn bad_version_is_rejected() {
        let raw = [0x40, 0x60, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(RtpPacket::decode(&raw), Err(RtpError::BadVersion(1)));
    }

    #[test]
    fn csrc_and_extension_are_skipped() {
        let header = RtpHeader::new(96, 7, 1234, 1)
            .with_csrcs(vec![0x1111_1111, 0x2222_2222])
            .with_extension(Some(RtpHeaderExtension::new(0xBEDE, vec![1, 2, 3])));
        let pkt = RtpPacket::new(header, &[0x41, 0x9A]);

        let back = RtpPacket::decode(pkt.raw()).expect("decode");
        assert_eq!(back.header.csrcs, vec![0x1111_1111, 0x2222_2222]);
        let ext = back.header.header_extension.as_ref().expect("extension");
        assert_eq!(ext.profile, 0xBEDE);
        assert_eq!(ext.data, vec![1, 2, 3, 0]);
        assert_eq!(back.body(), &[0x41, 0x9A]);
    }

    #[test]
    fn padding_is_stripped() {
        let mut raw = vec![0xA0, 0x60, 0, 5, 0, 0, 0, 9, 0, 0, 0, 1];
        raw.extend_from_slice(&[0x09, 0xF0, 0x00, 0x00, 0x03]);
        let pkt = RtpPacket::decode(&raw).expect("decode");
        assert_eq!(pkt.padding_bytes, 3);
        assert_eq!(pkt.body(), &[0x09, 0xF0]);
    }

    #[test]
    fn padding_longer_than_payload_is_rejected() {
        let mut raw = vec![0xA0, 0x60, 0, 5, 0, 0, 0, 9, 0, 0, 0, 1];
        raw.extend_from_slice(&[0x09, 0x10]);
        assert_eq!(RtpPacket::decode(&raw), Err(RtpError::PaddingTooShort));
    }

    #[test]
    fn truncated_csrc_list_is_rejected() {
        let raw = [0x82, 0x60, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4];
        assert_eq!(
            RtpPacket::decode(&raw),
            Err(RtpError::CsrcCountMismatch {
                expected: 2,
                buf_left: 4
            })
        );
    }
}
