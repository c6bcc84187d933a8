//! Fixed-point helpers for statistics.
//!
//! Averages and percentages are shown with one decimal. They are computed
//! in fixed point so the same inputs always print the same text.

use fixed::types::I64F64;

/// Fixed-point number type for averages and percentages.
///
/// 64 integer bits hold any weighted sum; 64 fraction bits are far more
/// precision than display needs.
pub type Ratio = I64F64;

/// Compute `numerator / denominator`.
///
/// Returns zero for a zero denominator.
#[must_use]
pub fn ratio(numerator: i64, denominator: i64) -> Ratio {
    if denominator == 0 {
        return Ratio::ZERO;
    }
    Ratio::from_num(numerator) / Ratio::from_num(denominator)
}

/// Compute `part / whole` in percent.
#[must_use]
pub fn percent(part: i64, whole: i64) -> Ratio {
    ratio(part, whole) * Ratio::from_num(100)
}

/// Scale `value` from denominator `old` to denominator `new`.
///
/// Rounds toward zero. A zero `old` leaves the value unchanged.
#[must_use]
pub fn rescale(value: i64, old: i64, new: i64) -> i64 {
    if old == 0 {
        value
    } else {
        value * new / old
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_and_percent() {
        assert_eq!(ratio(1, 4), Ratio::from_num(0.25));
        assert_eq!(ratio(5, 0), Ratio::ZERO);
        assert_eq!(format!("{:.1}", percent(1, 3)), "33.3");
        assert_eq!(format!("{:.1}", percent(2, 3)), "66.7");
        assert_eq!(format!("{:.1}", percent(4, 4)), "100.0");
    }

    #[test]
    fn test_rescale() {
        assert_eq!(rescale(3, 4, 8), 6);
        assert_eq!(rescale(3, 4, 6), 4);
        assert_eq!(rescale(7, 0, 6), 7);
        assert_eq!(rescale(i64::from(i32::MAX), 2, 4), 2 * i64::from(i32::MAX));
    }
}
