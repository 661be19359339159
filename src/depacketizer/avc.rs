//! H.264 payload header layout (RFC 6184).
//!
//! ```text
//! NAL header / FU indicator     FU header
//! +---------------+             +---------------+
//! |F|NRI|  Type   |             |S|E|R|  Type   |
//! +---------------+             +---------------+
//! ```

use super::position_type::PositionType;

pub const NALU_HEADER_LEN: usize = 1;
pub const STAPA_HEADER_LEN: usize = 1;

/// Types 1..=23 are plain NAL units; 0 is accepted as well.
pub const NALU_TYPE_SINGLE_MAX: u8 = 23;
pub const NALU_TYPE_STAPA: u8 = 24;
pub const NALU_TYPE_FUA: u8 = 28;

const FU_START: u8 = 0x80;
const FU_END: u8 = 0x40;

#[inline]
pub fn nalu_type(b: u8) -> u8 {
    b & 0x1F
}

pub fn classify(body: &[u8]) -> PositionType {
    let Some(&b0) = body.first() else {
        return PositionType::Unknown;
    };
    match nalu_type(b0) {
        0..=NALU_TYPE_SINGLE_MAX => PositionType::Single,
        NALU_TYPE_STAPA => PositionType::AggregationStart,
        NALU_TYPE_FUA => match body.get(1) {
            Some(&fu_header) if fu_header & FU_START != 0 => PositionType::FragmentStart,
            Some(&fu_header) if fu_header & FU_END != 0 => PositionType::FragmentEnd,
            Some(_) => PositionType::FragmentMiddle,
            None => PositionType::Unknown,
        },
        _ => PositionType::Unknown,
    }
}

/// `F|NRI` from the FU indicator, `Type` from the FU header.
#[inline]
pub fn fragment_nalu_header(start_body: &[u8]) -> [u8; 2] {
    let fu_indicator = start_body[0];
    let fu_header = start_body[1];
    [(fu_indicator & 0xE0) | (fu_header & 0x1F), 0]
}
