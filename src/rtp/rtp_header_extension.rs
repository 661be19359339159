/// RFC 3550 generic header extension. Carried through untouched; the
/// unpacker only needs to skip it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpHeaderExtension {
    /// 16-bit profile-specific identifier.
    pub profile: u16,
    /// Raw extension payload (not including the 4-byte extension header).
    pub data: Vec<u8>,
}

impl RtpHeaderExtension {
    pub fn new(profile: u16, data: Vec<u8>) -> Self {
        Self { profile, data }
    }

    /// Bytes this extension occupies on the wire, header included.
    pub fn wire_len(&self) -> usize {
        4 + self.data.len().div_ceil(4) * 4
    }
}
