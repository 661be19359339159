/// RTP version carried in every packet (RFC 3550).
pub const RTP_VERSION: u8 = 2;
/// Fixed header size without CSRCs or extension.
pub const RTP_FIXED_HEADER_LEN: usize = 12;
/// Half of the 16-bit sequence space; distances beyond it wrap.
pub const SEQ_HALF_RANGE: u16 = 0x8000;
