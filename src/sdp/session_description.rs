//! Minimal SDP reader: just enough to map RTP payload types to codecs and
//! clock rates. Lines other than `m=`, `a=rtpmap:` and `a=control:` are
//! skipped.

use crate::depacketizer::video_codec::VideoCodec;

use super::{media_kind::MediaKind, media_section::MediaSection, sdp_error::SdpError};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionDescription {
    pub media: Vec<MediaSection>,
}

/// A payload type we know how to reassemble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoStream {
    pub payload_type: u8,
    pub codec: VideoCodec,
    pub clock_rate: u32,
    /// `a=control` of the media section the payload type belongs to.
    pub control: Option<String>,
}

/// A mapped payload type we cannot reassemble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedStream {
    pub kind: MediaKind,
    pub payload_type: u8,
    pub encoding_name: String,
}

impl SessionDescription {
    pub fn parse(text: &str) -> Result<Self, SdpError> {
        let mut media: Vec<MediaSection> = Vec::new();

        for line in text.lines() {
            let line = line.trim_end_matches('\r').trim();
            if let Some(m) = line.strip_prefix("m=") {
                media.push(m.parse()?);
            } else if let Some(v) = line.strip_prefix("a=rtpmap:") {
                let section = media
                    .last_mut()
                    .ok_or(SdpError::Invalid("rtpmap outside media section"))?;
                section.rtp_maps.push(v.parse()?);
            } else if let Some(v) = line.strip_prefix("a=control:") {
                if let Some(section) = media.last_mut() {
                    section.control = Some(v.trim().to_string());
                }
            }
        }

        if media.is_empty() {
            return Err(SdpError::Missing("m="));
        }
        Ok(Self { media })
    }

    /// Every mapped payload type whose encoding we reassemble.
    pub fn video_streams(&self) -> Vec<VideoStream> {
        self.media
            .iter()
            .flat_map(|m| m.rtp_maps.iter().map(move |rm| (m, rm)))
            .filter_map(|(m, rm)| {
                rm.video_codec().map(|codec| VideoStream {
                    payload_type: rm.payload_type,
                    codec,
                    clock_rate: rm.clock_rate,
                    control: m.control.clone(),
                })
            })
            .collect()
    }

    /// Mapped payload types we do not reassemble (audio, other video).
    pub fn unsupported_streams(&self) -> Vec<UnsupportedStream> {
        self.media
            .iter()
            .flat_map(|m| m.rtp_maps.iter().map(move |rm| (m, rm)))
            .filter(|(_, rm)| rm.video_codec().is_none())
            .map(|(m, rm)| UnsupportedStream {
                kind: m.kind.clone(),
                payload_type: rm.payload_type,
                encoding_name: rm.encoding_name.clone(),
            })
            .collect()
    }
}
