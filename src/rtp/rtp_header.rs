use super::{
    constants::{RTP_FIXED_HEADER_LEN, RTP_VERSION},
    rtp_error::RtpError,
    rtp_header_extension::RtpHeaderExtension,
};

/// RTP fixed header plus CSRC list and optional extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpHeader {
    pub version: u8,      // must be 2
    pub padding: bool,    // P bit
    pub extension: bool,  // X bit
    pub marker: bool,     // M bit
    pub payload_type: u8, // 7 bits
    pub sequence_number: u16,
    pub timestamp: u32,
    pub ssrc: u32,
    pub csrcs: Vec<u32>,
    pub header_extension: Option<RtpHeaderExtension>,
}

impl RtpHeader {
    pub fn new(payload_type: u8, sequence_number: u16, timestamp: u32, ssrc: u32) -> Self {
        Self {
            version: RTP_VERSION,
            padding: false,
            extension: false,
            marker: false,
            payload_type,
            sequence_number,
            timestamp,
            ssrc,
            csrcs: Vec::new(),
            header_extension: None,
        }
    }

    pub fn with_marker(mut self, marker: bool) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_csrcs(mut self, csrcs: Vec<u32>) -> Self {
        self.csrcs = csrcs;
        self
    }

    pub fn with_extension(mut self, ext: Option<RtpHeaderExtension>) -> Self {
        self.extension = ext.is_some();
        self.header_extension = ext;
        self
    }

    /// Parses the header at the start of `buf`.
    ///
    /// Returns the header and the offset at which the payload starts. Padding
    /// is reported through `padding` only; stripping it is the packet's job.
    pub fn decode(buf: &[u8]) -> Result<(Self, usize), RtpError> {
        if buf.len() < RTP_FIXED_HEADER_LEN {
            return Err(RtpError::TooShort(buf.len()));
        }
        let b0 = buf[0];
        let version = b0 >> 6;
        if version != RTP_VERSION {
            return Err(RtpError::BadVersion(version));
        }
        let padding = (b0 & 0x20) != 0;
        let extension = (b0 & 0x10) != 0;
        let csrc_count = usize::from(b0 & 0x0F);

        let b1 = buf[1];
        let marker = (b1 & 0x80) != 0;
        let payload_type = b1 & 0x7F;
        let sequence_number = u16::from_be_bytes([buf[2], buf[3]]);
        let timestamp = u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]);
        let ssrc = u32::from_be_bytes([buf[8], buf[9], buf[10], buf[11]]);

        let mut off = RTP_FIXED_HEADER_LEN;
        let csrc_bytes = csrc_count * 4;
        if buf.len() < off + csrc_bytes {
            return Err(RtpError::CsrcCountMismatch {
                expected: csrc_count,
                buf_left: buf.len() - off,
            });
        }
        let csrcs = buf[off..off + csrc_bytes]
            .chunks_exact(4)
            .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        off += csrc_bytes;

        let header_extension = if extension {
            if buf.len() < off + 4 {
                return Err(RtpError::HeaderExtensionTooShort);
            }
            let profile = u16::from_be_bytes([buf[off], buf[off + 1]]);
            let words = usize::from(u16::from_be_bytes([buf[off + 2], buf[off + 3]]));
            off += 4;
            if buf.len() < off + words * 4 {
                return Err(RtpError::HeaderExtensionTooShort);
            }
            let data = buf[off..off + words * 4].to_vec();
            off += words * 4;
            Some(RtpHeaderExtension::new(profile, data))
        } else {
            None
        };

        Ok((
            Self {
                version,
                padding,
                extension,
                marker,
                payload_type,
                sequence_number,
                timestamp,
                ssrc,
                csrcs,
                header_extension,
            },
            off,
        ))
    }

    pub fn encode_into(&self, out: &mut Vec<u8>) {
        let cc = (self.csrcs.len() as u8) & 0x0F;
        let b0 = (self.version & 0b11) << 6
            | u8::from(self.padding) << 5
            | u8::from(self.header_extension.is_some()) << 4
            | cc;
        out.push(b0);
        out.push(u8::from(self.marker) << 7 | (self.payload_type & 0x7F));
        out.extend_from_slice(&self.sequence_number.to_be_bytes());
        out.extend_from_slice(&self.timestamp.to_be_bytes());
        out.extend_from_slice(&self.ssrc.to_be_bytes());
        for csrc in self.csrcs.iter().take(15) {
            out.extend_from_slice(&csrc.to_be_bytes());
        }
        if let Some(ext) = &self.header_extension {
            let words = ext.data.len().div_ceil(4);
            out.extend_from_slice(&ext.profile.to_be_bytes());
            out.extend_from_slice(&(words as u16).to_be_bytes());
            out.extend_from_slice(&ext.data);
            out.resize(out.len() + (words * 4 - ext.data.len()), 0);
        }
    }
}
