//! Scoring policy
//!
//! Reward grows exponentially with match size so big clears pay
//! disproportionately, capped at `2^SCORE_EXPONENT_CAP` per tap.

use crate::consts::{CELEBRATE_THRESHOLD, MIN_MATCH, SCORE_EXPONENT_CAP};

/// Groups smaller than `MIN_MATCH` never clear
#[inline]
pub fn meets_minimum(match_size: usize) -> bool {
    match_size >= MIN_MATCH
}

/// Points for clearing `match_size` balls, `None` below the minimum match
pub fn score_delta(match_size: usize) -> Option<u64> {
    meets_minimum(match_size).then(|| 1u64 << match_size.min(SCORE_EXPONENT_CAP))
}

/// Whether a clear is big enough for the celebration (no score effect)
#[inline]
pub fn is_celebration(match_size: usize) -> bool {
    meets_minimum(match_size) && match_size >= CELEBRATE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_below_minimum_scores_nothing() {
        assert_eq!(score_delta(0), None);
        assert_eq!(score_delta(1), None);
        assert_eq!(score_delta(2), None);
    }

    #[test]
    fn test_score_delta_values() {
        assert_eq!(score_delta(3), Some(8));
        assert_eq!(score_delta(4), Some(16));
        assert_eq!(score_delta(10), Some(1024));
        assert_eq!(score_delta(16), Some(65536));
    }

    #[test]
    fn test_score_delta_capped() {
        assert_eq!(score_delta(17), Some(65536));
        assert_eq!(score_delta(20), Some(65536));
        assert_eq!(score_delta(usize::MAX), Some(65536));
    }

    #[test]
    fn test_celebration_threshold() {
        assert!(!is_celebration(9));
        assert!(is_celebration(10));
        assert!(is_celebration(40));
    }

    proptest! {
        #[test]
        fn prop_score_delta_monotone(a in 0usize..64, b in 0usize..64) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(score_delta(lo).unwrap_or(0) <= score_delta(hi).unwrap_or(0));
        }
    }
}
