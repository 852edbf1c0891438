//! Chi-square goodness-of-fit against a uniform byte distribution.
//!
//! With 256 bins there are 255 degrees of freedom. The critical value at
//! p = 0.05 is about 293.25, which the classifier rounds to 300. Values near
//! that reference are consistent with a high-entropy stream; much larger
//! values indicate structure (text, headers, weak compression).

use super::histogram::{ByteHistogram, BYTE_VALUES};

/// Degrees of freedom for a 256-bin byte histogram.
pub const DEGREES_OF_FREEDOM: usize = BYTE_VALUES - 1;

/// Computes the chi-square statistic of a histogram against a uniform
/// distribution.
///
/// Returns `None` for an empty histogram, where the expected frequency
/// would be zero.
pub fn chi_square(histogram: &ByteHistogram) -> Option<f64> {
    if histogram.is_empty() {
        return None;
    }

    let expected = histogram.total() as f64 / BYTE_VALUES as f64;
    let statistic = histogram
        .counts()
        .iter()
        .map(|&observed| {
            let diff = observed as f64 - expected;
            diff * diff / expected
        })
        .sum();

    Some(statistic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_histogram_has_no_statistic() {
        assert!(chi_square(&ByteHistogram::new()).is_none());
    }

    #[test]
    fn test_equal_counts_is_zero() {
        let mut hist = ByteHistogram::new();
        for _ in 0..4 {
            for b in 0..=255u8 {
                hist.observe(b);
            }
        }
        assert_eq!(chi_square(&hist), Some(0.0));
    }

    #[test]
    fn test_single_value_matches_direct_formula() {
        let total = 1000u64;
        let mut hist = ByteHistogram::new();
        for _ in 0..total {
            hist.observe(0x7A);
        }

        // One bin deviates by total - e, the other 255 by e.
        let e = total as f64 / 256.0;
        let direct = (total as f64 - e).powi(2) / e + 255.0 * e * e / e;
        let stat = chi_square(&hist).unwrap();

        assert!((stat - direct).abs() < 1e-6);
        assert!((stat - 255.0 * total as f64).abs() < 1e-6);
    }

    #[test]
    fn test_single_byte_input() {
        let mut hist = ByteHistogram::new();
        hist.observe(0);
        let stat = chi_square(&hist).unwrap();
        assert!((stat - 255.0).abs() < 1e-9);
    }
}
