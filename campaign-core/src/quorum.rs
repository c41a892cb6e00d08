//! Absolute-majority arithmetic
//!
//! Finalization requires strictly more approvals than half the supporter
//! count, rounded down. The comparison is done in multiplication form to
//! avoid integer-division rounding ambiguity: off by one here either locks
//! funds permanently or lets a minority spend them.

/// Whether `approvals` is an absolute majority of `supporters`
///
/// Equivalent to `approvals > supporters / 2` under floor division, e.g.
/// with 5 supporters 3 approvals pass and 2 fail; with 4 supporters 3 pass
/// and 2 fail.
pub fn has_absolute_majority(approvals: u64, supporters: u64) -> bool {
    approvals as u128 * 2 > supporters as u128
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odd_supporter_count() {
        // 5 supporters: floor(5/2) = 2, so 3 is the threshold
        assert!(!has_absolute_majority(2, 5));
        assert!(has_absolute_majority(3, 5));
        assert!(has_absolute_majority(5, 5));
    }

    #[test]
    fn test_even_supporter_count() {
        // 4 supporters: exactly half is not a majority
        assert!(!has_absolute_majority(2, 4));
        assert!(has_absolute_majority(3, 4));
    }

    #[test]
    fn test_small_counts() {
        assert!(!has_absolute_majority(0, 0));
        assert!(!has_absolute_majority(0, 1));
        assert!(has_absolute_majority(1, 1));
        assert!(!has_absolute_majority(1, 2));
        assert!(has_absolute_majority(2, 2));
        assert!(has_absolute_majority(2, 3));
    }

    #[test]
    fn test_no_overflow_at_u64_max() {
        // Widened to u128 before doubling, so the boundary holds at the top
        assert!(has_absolute_majority(u64::MAX, u64::MAX));
        assert!(!has_absolute_majority(u64::MAX / 2, u64::MAX));
    }

    #[test]
    fn test_matches_floor_division_form() {
        for supporters in 0u64..50 {
            for approvals in 0..=supporters {
                assert_eq!(
                    has_absolute_majority(approvals, supporters),
                    approvals > supporters / 2,
                    "mismatch at {}/{}",
                    approvals,
                    supporters
                );
            }
        }
    }
}
