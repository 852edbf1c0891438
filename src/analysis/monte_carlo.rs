//! Monte Carlo estimation of pi from byte windows.
//!
//! Consecutive, non-overlapping windows of `k` bytes are split in half.
//! Each half is read as a big-endian integer, giving a point `(x, y)` in
//! `[0, M] x [0, M]` with `M = 256^(k/2) - 1`. For uniform bytes the
//! fraction of points with `x^2 + y^2 <= M^2` approaches pi / 4.
//!
//! Coordinates are at most 56 bits wide, so squares are exact in `u128`.

use std::f64::consts::PI;

use thiserror::Error;

/// Default window size in bytes.
pub const DEFAULT_WINDOW: usize = 6;

/// Smallest supported window.
pub const MIN_WINDOW: usize = 2;

/// Largest supported window; each half must fit in a `u64` coordinate
/// whose square, doubled, still fits in a `u128`.
pub const MAX_WINDOW: usize = 14;

/// A window size [`MonteCarloPi`] cannot use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid Monte Carlo window size {0} (must be even, 2-14 bytes)")]
pub struct InvalidWindowSize(pub usize);

/// Result of a Monte Carlo pi estimation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PiEstimate {
    /// Estimated value of pi.
    pub value: f64,
    /// Deviation from pi as a percentage of pi.
    pub error_percent: f64,
    /// Number of complete windows scored.
    pub samples: u64,
    /// Number of windows whose point fell inside the quarter circle.
    pub in_circle: u64,
}

impl PiEstimate {
    fn from_counts(in_circle: u64, samples: u64) -> Self {
        let value = 4.0 * in_circle as f64 / samples as f64;
        Self {
            value,
            error_percent: error_percent(value),
            samples,
            in_circle,
        }
    }
}

/// Percentage deviation of an estimate from pi.
pub fn error_percent(estimate: f64) -> f64 {
    100.0 * (PI - estimate).abs() / PI
}

/// Streaming Monte Carlo pi estimator.
///
/// Holds at most one window of bytes. A trailing partial window at the
/// end of the stream is never scored.
#[derive(Debug, Clone)]
pub struct MonteCarloPi {
    window: [u8; MAX_WINDOW],
    window_size: usize,
    filled: usize,
    samples: u64,
    in_circle: u64,
    radius_squared: u128,
}

impl MonteCarloPi {
    /// Creates an estimator with the given window size.
    ///
    /// The window must be even and within [`MIN_WINDOW`, `MAX_WINDOW`].
    pub fn new(window_size: usize) -> Result<Self, InvalidWindowSize> {
        validate_window(window_size)?;
        Ok(Self::with_checked_window(window_size))
    }

    fn with_checked_window(window_size: usize) -> Self {
        let half_bits = 8 * (window_size / 2) as u32;
        let radius = (1u64 << half_bits) - 1;
        Self {
            window: [0; MAX_WINDOW],
            window_size,
            filled: 0,
            samples: 0,
            in_circle: 0,
            radius_squared: (radius as u128) * (radius as u128),
        }
    }

    /// Feeds one byte; scores the window when it becomes full.
    #[inline]
    pub fn observe(&mut self, byte: u8) {
        self.window[self.filled] = byte;
        self.filled += 1;
        if self.filled == self.window_size {
            self.score_window();
            self.filled = 0;
        }
    }

    fn score_window(&mut self) {
        let half = self.window_size / 2;
        let (xs, ys) = self.window[..self.window_size].split_at(half);
        let x = big_endian(xs) as u128;
        let y = big_endian(ys) as u128;

        self.samples += 1;
        if x * x + y * y <= self.radius_squared {
            self.in_circle += 1;
        }
    }

    /// Window size in bytes.
    #[inline]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Complete windows scored so far.
    #[inline]
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Windows whose point fell inside the circle.
    #[inline]
    pub fn in_circle(&self) -> u64 {
        self.in_circle
    }

    /// Bytes currently held in the partial window.
    #[inline]
    pub fn pending(&self) -> usize {
        self.filled
    }

    /// Squared radius of the reference circle, `(256^(k/2) - 1)^2`.
    #[inline]
    pub fn radius_squared(&self) -> u128 {
        self.radius_squared
    }

    /// Returns the pi estimate, or `None` if no complete window was seen.
    pub fn estimate(&self) -> Option<PiEstimate> {
        if self.samples == 0 {
            return None;
        }
        Some(PiEstimate::from_counts(self.in_circle, self.samples))
    }
}

impl Default for MonteCarloPi {
    fn default() -> Self {
        Self::with_checked_window(DEFAULT_WINDOW)
    }
}

/// Checks that a window size is usable by [`MonteCarloPi`].
pub fn validate_window(window_size: usize) -> Result<(), InvalidWindowSize> {
    if !(MIN_WINDOW..=MAX_WINDOW).contains(&window_size) || window_size % 2 != 0 {
        return Err(InvalidWindowSize(window_size));
    }
    Ok(())
}

fn big_endian(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_radius() {
        let mc = MonteCarloPi::default();
        let max = (1u128 << 24) - 1;
        assert_eq!(mc.radius_squared(), max * max);
        assert_eq!(mc.window_size(), 6);
    }

    #[test]
    fn test_new_matches_default() {
        let mc = MonteCarloPi::new(DEFAULT_WINDOW).unwrap();
        assert_eq!(mc.radius_squared(), MonteCarloPi::default().radius_squared());
    }

    #[test]
    fn test_invalid_windows_rejected() {
        for size in [0, 1, 3, 7, 16, 100] {
            assert!(
                MonteCarloPi::new(size).err() == Some(InvalidWindowSize(size)),
                "window {size} should be rejected"
            );
        }
        assert!(MonteCarloPi::new(MAX_WINDOW).is_ok());
    }

    #[test]
    fn test_partial_window_not_scored() {
        let mut mc = MonteCarloPi::default();
        for b in 0..5u8 {
            mc.observe(b);
        }
        assert_eq!(mc.samples(), 0);
        assert_eq!(mc.pending(), 5);
        assert!(mc.estimate().is_none());

        mc.observe(5);
        assert_eq!(mc.samples(), 1);
        assert_eq!(mc.pending(), 0);
    }

    #[test]
    fn test_origin_is_inside() {
        let mut mc = MonteCarloPi::default();
        for _ in 0..6 {
            mc.observe(0);
        }
        assert_eq!(mc.in_circle(), 1);
        assert_eq!(mc.estimate().unwrap().value, 4.0);
    }

    #[test]
    fn test_far_corner_is_outside() {
        let mut mc = MonteCarloPi::default();
        for _ in 0..6 {
            mc.observe(0xFF);
        }
        assert_eq!(mc.in_circle(), 0);
        assert_eq!(mc.estimate().unwrap().value, 0.0);
    }

    #[test]
    fn test_axis_point_on_boundary_is_inside() {
        // x = M, y = 0 lies exactly on the circle.
        let mut mc = MonteCarloPi::default();
        for b in [0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00] {
            mc.observe(b);
        }
        assert_eq!(mc.in_circle(), 1);
    }

    #[test]
    fn test_coordinates_are_big_endian() {
        assert_eq!(big_endian(&[0x01, 0x02, 0x03]), 0x010203);
        assert_eq!(big_endian(&[0xFF]), 0xFF);
    }

    #[test]
    fn test_error_percent() {
        assert_eq!(error_percent(PI), 0.0);
        assert!((error_percent(4.0) - 100.0 * (4.0 - PI) / PI).abs() < 1e-12);
        assert!((error_percent(0.0) - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_estimate_from_counts() {
        let est = PiEstimate::from_counts(3, 4);
        assert_eq!(est.value, 3.0);
        assert_eq!(est.samples, 4);
        assert_eq!(est.in_circle, 3);
    }
}
