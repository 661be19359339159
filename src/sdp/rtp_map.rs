use std::str::FromStr;

use crate::depacketizer::video_codec::VideoCodec;

/// Value of an `a=rtpmap:` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpMap {
    pub payload_type: u8,
    pub encoding_name: String, // case-insensitive in SDP
    pub clock_rate: u32,
    pub encoding_params: Option<u16>, // usually channels for audio
}

impl RtpMap {
    /// The video codec this mapping announces, if it is one we reassemble.
    pub fn video_codec(&self) -> Option<VideoCodec> {
        VideoCodec::from_encoding_name(&self.encoding_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RtpMapParseError {
    MissingParts,
    InvalidPayloadType,
    InvalidClockRate,
    InvalidEncodingParams,
    PayloadTypeOutOfRange,
    TrailingGarbage,
}

impl std::fmt::Display for RtpMapParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use RtpMapParseError::*;
        match self {
            MissingParts => write!(f, "Missing required parts in rtpmap"),
            InvalidPayloadType => write!(f, "Invalid payload type"),
            InvalidClockRate => write!(f, "Invalid clock rate"),
            InvalidEncodingParams => write!(f, "Invalid encoding parameters"),
            PayloadTypeOutOfRange => write!(f, "Payload type out of [0,127]"),
            TrailingGarbage => write!(f, "Unexpected trailing tokens after rtpmap"),
        }
    }
}
impl std::error::Error for RtpMapParseError {}

impl FromStr for RtpMap {
    type Err = RtpMapParseError;

    /// Parses `<pt> <encoding>/<clock>[/<params>]`, e.g. `96 H264/90000`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use RtpMapParseError::*;

        let mut it = s.split_whitespace();
        let pt_str = it.next().ok_or(MissingParts)?;
        let rhs = it.next().ok_or(MissingParts)?;
        if it.next().is_some() {
            return Err(TrailingGarbage);
        }

        let payload_type: u8 = pt_str.parse().map_err(|_| InvalidPayloadType)?;
        if payload_type > 127 {
            return Err(PayloadTypeOutOfRange);
        }

        let mut parts = rhs.splitn(3, '/');
        let encoding_name = parts.next().ok_or(MissingParts)?.trim().to_string();
        if encoding_name.is_empty() {
            return Err(MissingParts);
        }

        let clock_rate: u32 = parts
            .next()
            .ok_or(MissingParts)?
            .trim()
            .parse()
            .map_err(|_| InvalidClockRate)?;

        let encoding_params = match parts.next().map(str::trim) {
            None | Some("") => None,
            Some(p) => {
                // "0" channels means nothing useful; drop to None
                let v: u16 = p.parse().map_err(|_| InvalidEncodingParams)?;
                if v == 0 { None } else { Some(v) }
            }
        };

        Ok(RtpMap {
            payload_type,
            encoding_name,
            clock_rate,
            encoding_params,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn parses_h264() {
        let rm: RtpMap = "96 H264/90000".parse().unwrap();
        assert_eq!(rm.payload_type, 96);
        assert_eq!(rm.clock_rate, 90_000);
        assert_eq!(rm.encoding_params, None);
        assert_eq!(rm.video_codec(), Some(VideoCodec::H264));
    }

    #[test]
    fn hevc_alias_maps_to_h265() {
        let rm: RtpMap = "98 hevc/90000".parse().unwrap();
        assert_eq!(rm.video_codec(), Some(VideoCodec::H265));
    }

    #[test]
    fn audio_is_not_a_video_codec() {
        let rm: RtpMap = "97 MPEG4-GENERIC/44100/2".parse().unwrap();
        assert_eq!(rm.encoding_params, Some(2));
        assert_eq!(rm.video_codec(), None);
    }

    #[test]
    fn tabs_and_padding_are_tolerated() {
        let rm: RtpMap = "  101\ttelephone-event/8000  ".parse().unwrap();
        assert_eq!(rm.payload_type, 101);
        assert_eq!(rm.encoding_name, "telephone-event");
    }

    #[test]
    fn rejects_malformed_values() {
        assert_eq!("".parse::<RtpMap>(), Err(RtpMapParseError::MissingParts));
        assert_eq!("96".parse::<RtpMap>(), Err(RtpMapParseError::MissingParts));
        assert_eq!("96 /90000".parse::<RtpMap>(), Err(RtpMapParseError::MissingParts));
        assert_eq!(
            "x9 H264/90000".parse::<RtpMap>(),
            Err(RtpMapParseError::InvalidPayloadType)
        );
        assert_eq!("96 H264/xx".parse::<RtpMap>(), Err(RtpMapParseError::InvalidClockRate));
        assert_eq!(
            "96 opus/48000/two".parse::<RtpMap>(),
            Err(RtpMapParseError::InvalidEncodingParams)
        );
        assert_eq!(
            "200 H264/90000".parse::<RtpMap>(),
            Err(RtpMapParseError::PayloadTypeOutOfRange)
        );
        assert_eq!(
            "96 H264/90000 extra".parse::<RtpMap>(),
            Err(RtpMapParseError::TrailingGarbage)
        );
    }
}
