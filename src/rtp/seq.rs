//! Arithmetic on the wrapping 16-bit RTP sequence space.

use std::cmp::Ordering;

use super::constants::SEQ_HALF_RANGE;

/// Signed distance `a - b`, taking the shorter way around the circle.
#[inline]
pub fn seq_diff(a: u16, b: u16) -> i32 {
    i32::from(a.wrapping_sub(b) as i16)
}

/// Circular ordering: `a` is after `b` when it is less than half the space
/// ahead of it.
#[inline]
pub fn seq_cmp(a: u16, b: u16) -> Ordering {
    if a == b {
        Ordering::Equal
    } else if a.wrapping_sub(b) < SEQ_HALF_RANGE {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}

/// True when `next` immediately follows `prev`.
#[inline]
pub fn seq_is_next(prev: u16, next: u16) -> bool {
    next == prev.wrapping_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_handles_wrap() {
        assert_eq!(seq_diff(5, 3), 2);
        assert_eq!(seq_diff(3, 5), -2);
        assert_eq!(seq_diff(1, 65535), 2);
        assert_eq!(seq_diff(65535, 1), -2);
    }

    #[test]
    fn cmp_is_circular() {
        assert_eq!(seq_cmp(10, 10), Ordering::Equal);
        assert_eq!(seq_cmp(11, 10), Ordering::Greater);
        assert_eq!(seq_cmp(0, 65500), Ordering::Greater);
        assert_eq!(seq_cmp(65500, 0), Ordering::Less);
    }

    #[test]
    fn next_wraps() {
        assert!(seq_is_next(65535, 0));
        assert!(seq_is_next(100, 101));
        assert!(!seq_is_next(100, 102));
    }
}
