//! H.265 payload header layout (RFC 7798).
//!
//! ```text
//! PayloadHdr                          FU header
//! +---------------+---------------+   +---------------+
//! |F|   Type    |  LayerId  | TID |   |S|E|  FuType   |
//! +-------------+-----------------+   +---------------+
//! ```
//!
//! DONL fields are not expected (sprop-max-don-diff = 0).

use super::position_type::PositionType;

pub const NALU_HEADER_LEN: usize = 2;
pub const AP_HEADER_LEN: usize = 2;

pub const NALU_TYPE_AP: u8 = 48;
pub const NALU_TYPE_FU: u8 = 49;

const FU_START: u8 = 0x80;
const FU_END: u8 = 0x40;

#[inline]
pub fn nalu_type(b: u8) -> u8 {
    (b >> 1) & 0x3F
}

/// VCL slices, reserved IRAP types, parameter sets, AUD and SEI.
#[inline]
fn is_single_type(t: u8) -> bool {
    matches!(t, 0..=9 | 16..=23 | 32..=35 | 39 | 40)
}

pub fn classify(body: &[u8]) -> PositionType {
    if body.len() < NALU_HEADER_LEN {
        return PositionType::Unknown;
    }
    let t = nalu_type(body[0]);
    if is_single_type(t) {
        return PositionType::Single;
    }
    match t {
        NALU_TYPE_AP => PositionType::AggregationStart,
        NALU_TYPE_FU => match body.get(2) {
            Some(&fu_header) if fu_header & FU_START != 0 => PositionType::FragmentStart,
            Some(&fu_header) if fu_header & FU_END != 0 => PositionType::FragmentEnd,
            Some(_) => PositionType::FragmentMiddle,
            None => PositionType::Unknown,
        },
        _ => PositionType::Unknown,
    }
}

/// Keeps `F` and the top layer-id bit of byte 0, swaps in `FuType`, and
/// copies byte 1 (rest of layer id, TID).
#[inline]
pub fn fragment_nalu_header(start_body: &[u8]) -> [u8; 2] {
    let fu_type = start_body[2] & 0x3F;
    [(start_body[0] & 0x81) | (fu_type << 1), start_body[1]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_sets_and_slices_are_single() {
        assert_eq!(classify(&[0x40, 0x01]), PositionType::Single); // VPS
        assert_eq!(classify(&[0x42, 0x01]), PositionType::Single); // SPS
        assert_eq!(classify(&[0x44, 0x01]), PositionType::Single); // PPS
        assert_eq!(classify(&[0x26, 0x01]), PositionType::Single); // IDR_W_RADL
        assert_eq!(classify(&[0x02, 0x01]), PositionType::Single); // TRAIL_R
    }

    #[test]
    fn ap_and_fu() {
        assert_eq!(classify(&[0x60, 0x01, 0x00, 0x02]), PositionType::AggregationStart);
        assert_eq!(classify(&[0x62, 0x01, 0x93, 0xAF]), PositionType::FragmentStart);
        assert_eq!(classify(&[0x62, 0x01, 0x13, 0xAF]), PositionType::FragmentMiddle);
        assert_eq!(classify(&[0x62, 0x01, 0x53, 0xAF]), PositionType::FragmentEnd);
    }

    #[test]
    fn unsupported_or_short() {
        assert_eq!(classify(&[0x40]), PositionType::Unknown);
        assert_eq!(classify(&[0x62, 0x01]), PositionType::Unknown); // FU without FU header
        assert_eq!(classify(&[0x64, 0x01]), PositionType::Unknown); // PACI (50)
        assert_eq!(classify(&[0x1C, 0x01]), PositionType::Unknown); // reserved 14
    }

    #[test]
    fn fragment_header_rebuilds_idr() {
        // FU of an IDR_W_RADL (19): PayloadHdr type 49, FU header S|19.
        assert_eq!(fragment_nalu_header(&[0x62, 0x01, 0x93]), [0x26, 0x01]);
    }
}
