use std::fmt;

use super::{avc, hevc};

/// Payload formats the depacketizer can reassemble.
///
/// Both share the classification and reconstruction model; they differ in
/// where the unit type lives and how long the fragmentation header is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoCodec {
    /// H.264 / AVC, RFC 6184.
    H264,
    /// H.265 / HEVC, RFC 7798.
    H265,
}

impl VideoCodec {
    /// Maps an SDP `rtpmap` encoding name (case-insensitive).
    pub fn from_encoding_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "H264" => Some(Self::H264),
            "H265" | "HEVC" => Some(Self::H265),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::H264 => "H264",
            Self::H265 => "H265",
        }
    }

    /// Length of the NAL unit header this codec reconstructs for fragments.
    #[inline]
    pub fn nalu_header_len(self) -> usize {
        match self {
            Self::H264 => avc::NALU_HEADER_LEN,
            Self::H265 => hevc::NALU_HEADER_LEN,
        }
    }

    /// Bytes in front of each fragment's payload (payload header + FU header).
    #[inline]
    pub fn fu_prefix_len(self) -> usize {
        self.nalu_header_len() + 1
    }

    /// Bytes to skip in an aggregation packet before the first sub-unit
    /// length field.
    #[inline]
    pub fn aggregation_skip(self) -> usize {
        match self {
            Self::H264 => avc::STAPA_HEADER_LEN,
            Self::H265 => hevc::AP_HEADER_LEN,
        }
    }

    /// Rebuilds the original NAL header from a FragmentStart body. Only the
    /// first [`nalu_header_len`](Self::nalu_header_len) bytes are meaningful.
    #[inline]
    pub fn fragment_nalu_header(self, start_body: &[u8]) -> [u8; 2] {
        match self {
            Self::H264 => avc::fragment_nalu_header(start_body),
            Self::H265 => hevc::fragment_nalu_header(start_body),
        }
    }
}

impl fmt::Display for VideoCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_names_map_case_insensitively() {
        assert_eq!(VideoCodec::from_encoding_name("h264"), Some(VideoCodec::H264));
        assert_eq!(VideoCodec::from_encoding_name("H265"), Some(VideoCodec::H265));
        assert_eq!(VideoCodec::from_encoding_name("hevc"), Some(VideoCodec::H265));
        assert_eq!(VideoCodec::from_encoding_name("VP8"), None);
    }

    #[test]
    fn header_layouts_differ() {
        assert_eq!(VideoCodec::H264.fu_prefix_len(), 2);
        assert_eq!(VideoCodec::H265.fu_prefix_len(), 3);
        assert_eq!(VideoCodec::H264.aggregation_skip(), 1);
        assert_eq!(VideoCodec::H265.aggregation_skip(), 2);
    }
}
