//! Criterion aggregation.
//!
//! Reduces the present scores of a criterion subset to a normalized [0,1]
//! value with the quadratic mean, so a single severely bad criterion
//! weighs more than it would under an arithmetic mean.

/// Root-mean-square of the present scores, normalized from [1,5] to [0,1]
/// and clamped. Returns `None` when no scores are present; a single
/// present value is a valid input, not an error.
pub fn aggregate(scores: &[u8]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }

    let sum_of_squares: f64 = scores.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
    let rms = (sum_of_squares / scores.len() as f64).sqrt();
    Some(((rms - 1.0) / 4.0).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_all_absent_is_undefined() {
        assert_eq!(aggregate(&[]), None);
    }

    #[test]
    fn test_extremes() {
        assert_close(aggregate(&[5, 5, 5]).unwrap(), 1.0);
        assert_close(aggregate(&[1, 1, 1]).unwrap(), 0.0);
        assert_eq!(
            Category::from_value(aggregate(&[5, 5, 5]).unwrap()),
            Category::VeryHigh
        );
        assert_eq!(
            Category::from_value(aggregate(&[1, 1, 1]).unwrap()),
            Category::VeryLow
        );
    }

    #[test]
    fn test_single_value_normalizes_to_itself() {
        assert_close(aggregate(&[3]).unwrap(), 0.5);
        assert_close(aggregate(&[1]).unwrap(), 0.0);
        assert_close(aggregate(&[5]).unwrap(), 1.0);
    }

    #[test]
    fn test_quadratic_mean_beats_arithmetic() {
        // rms([1,5]) = sqrt(13) > mean([1,5]) = 3
        let value = aggregate(&[1, 5]).unwrap();
        assert_close(value, (13.0_f64.sqrt() - 1.0) / 4.0);
        assert!(value > 0.5);
    }

    #[test]
    fn test_result_is_clamped() {
        for scores in [&[1u8][..], &[2, 4][..], &[5, 5, 5, 5, 5][..]] {
            let value = aggregate(scores).unwrap();
            assert!((0.0..=1.0).contains(&value));
        }
    }
}
