//! Per-input accumulator state.
//!
//! One [`AnalysisState`] is created for every input. It owns the byte
//! histogram and the Monte Carlo estimator, both fed from the same single
//! pass, and is consumed by [`AnalysisState::finish`] once the stream is
//! exhausted.

use super::{
    chi_square::chi_square,
    error::AnalysisError,
    histogram::ByteHistogram,
    monte_carlo::{InvalidWindowSize, MonteCarloPi, PiEstimate},
};

/// Final statistics for one fully consumed input.
#[derive(Debug, Clone)]
pub struct Statistics {
    /// Number of bytes consumed.
    pub bytes: u64,
    /// Chi-square statistic against a uniform distribution.
    pub chi_square: f64,
    /// Monte Carlo pi estimate.
    pub pi: PiEstimate,
    /// Final byte histogram.
    pub histogram: ByteHistogram,
}

/// Accumulators for a single input.
#[derive(Debug, Clone, Default)]
pub struct AnalysisState {
    histogram: ByteHistogram,
    monte_carlo: MonteCarloPi,
}

impl AnalysisState {
    /// Creates a state with the default 6-byte Monte Carlo window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state with a custom Monte Carlo window size.
    pub fn with_window(window_size: usize) -> Result<Self, InvalidWindowSize> {
        Ok(Self {
            histogram: ByteHistogram::new(),
            monte_carlo: MonteCarloPi::new(window_size)?,
        })
    }

    /// Feeds one byte to both accumulators.
    #[inline]
    pub fn observe(&mut self, byte: u8) {
        self.histogram.observe(byte);
        self.monte_carlo.observe(byte);
    }

    /// Feeds a chunk of bytes in stream order.
    pub fn observe_slice(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.observe(byte);
        }
    }

    /// Bytes consumed so far.
    #[inline]
    pub fn bytes_consumed(&self) -> u64 {
        self.histogram.total()
    }

    /// Histogram accumulated so far.
    pub fn histogram(&self) -> &ByteHistogram {
        &self.histogram
    }

    /// Monte Carlo estimator state.
    pub fn monte_carlo(&self) -> &MonteCarloPi {
        &self.monte_carlo
    }

    /// Finalizes the accumulated state into statistics.
    ///
    /// Empty input fails with [`AnalysisError::EmptyInput`]. Input shorter
    /// than one window fails with
    /// [`AnalysisError::InsufficientDataForMonteCarlo`], which still carries
    /// the chi-square statistic.
    pub fn finish(self, input: &str) -> Result<Statistics, AnalysisError> {
        let chi_square = chi_square(&self.histogram).ok_or_else(|| AnalysisError::EmptyInput {
            input: input.to_string(),
        })?;

        let pi = self.monte_carlo.estimate().ok_or_else(|| {
            AnalysisError::InsufficientDataForMonteCarlo {
                input: input.to_string(),
                length: self.histogram.total(),
                window: self.monte_carlo.window_size(),
                chi_square,
            }
        })?;

        Ok(Statistics {
            bytes: self.histogram.total(),
            chi_square,
            pi,
            histogram: self.histogram,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_rejected() {
        let state = AnalysisState::new();
        assert!(matches!(
            state.finish("empty"),
            Err(AnalysisError::EmptyInput { .. })
        ));
    }

    #[test]
    fn test_short_input_keeps_chi_square() {
        for len in 1..6u8 {
            let mut state = AnalysisState::new();
            state.observe_slice(&vec![0xAB; len as usize]);

            match state.finish("short") {
                Err(AnalysisError::InsufficientDataForMonteCarlo {
                    length,
                    window,
                    chi_square,
                    ..
                }) => {
                    assert_eq!(length, len as u64);
                    assert_eq!(window, 6);
                    assert!((chi_square - 255.0 * len as f64).abs() < 1e-9);
                }
                other => panic!("unexpected result for {len} bytes: {other:?}"),
            }
        }
    }

    #[test]
    fn test_sample_count_is_floor_of_length() {
        let data: Vec<u8> = (0..1003u32).map(|i| (i * 7) as u8).collect();
        let mut state = AnalysisState::new();
        state.observe_slice(&data);

        let stats = state.finish("data").unwrap();
        assert_eq!(stats.bytes, 1003);
        assert_eq!(stats.pi.samples, 1003 / 6);
    }

    #[test]
    fn test_custom_window() {
        let mut state = AnalysisState::with_window(4).unwrap();
        state.observe_slice(&[0u8; 10]);
        assert_eq!(state.monte_carlo().samples(), 2);
        assert_eq!(state.monte_carlo().pending(), 2);
        assert_eq!(
            AnalysisState::with_window(5).err(),
            Some(InvalidWindowSize(5))
        );
    }

    #[test]
    fn test_both_accumulators_fed() {
        let mut state = AnalysisState::new();
        state.observe_slice(&[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(state.bytes_consumed(), 7);
        assert_eq!(state.histogram().count(7), 1);
        assert_eq!(state.monte_carlo().samples(), 1);
    }
}
