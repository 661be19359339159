use std::str::FromStr;

use super::{media_kind::MediaKind, rtp_map::RtpMap, sdp_error::SdpError};

/// One `m=` block: the announced formats plus the attributes we care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSection {
    pub kind: MediaKind,
    pub port: u16,
    pub proto: String,
    pub formats: Vec<u8>,
    pub rtp_maps: Vec<RtpMap>,
    /// `a=control:` value (RTSP track URL), if present.
    pub control: Option<String>,
}

impl MediaSection {
    pub fn rtp_map(&self, payload_type: u8) -> Option<&RtpMap> {
        self.rtp_maps.iter().find(|m| m.payload_type == payload_type)
    }
}

impl FromStr for MediaSection {
    type Err = SdpError;

    /// Parses the value of an `m=` line: `<kind> <port>[/<n>] <proto> <fmt>...`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut it = s.split_whitespace();
        let kind = MediaKind::from(it.next().ok_or(SdpError::Missing("m= kind"))?);
        let port_str = it.next().ok_or(SdpError::Missing("m= port"))?;
        // "<port>/<count>" is legal; only the base port matters here
        let port: u16 = port_str.split('/').next().unwrap_or(port_str).parse()?;
        let proto = it.next().ok_or(SdpError::Missing("m= proto"))?.to_string();

        // Non-numeric formats (e.g. "webrtc-datachannel") are not RTP payload types.
        let formats = it.filter_map(|f| f.parse::<u8>().ok()).collect();

        Ok(Self {
            kind,
            port,
            proto,
            formats,
            rtp_maps: Vec::new(),
            control: None,
        })
    }
}
