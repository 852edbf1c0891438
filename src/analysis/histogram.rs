//! Byte-value histogram.

/// Number of distinct byte values.
pub const BYTE_VALUES: usize = 256;

/// Observation counts for every byte value, plus the running total.
///
/// The sum of all counters always equals [`ByteHistogram::total`].
#[derive(Clone, PartialEq, Eq)]
pub struct ByteHistogram {
    counts: [u64; BYTE_VALUES],
    total: u64,
}

impl ByteHistogram {
    /// Creates an empty histogram.
    pub fn new() -> Self {
        Self {
            counts: [0; BYTE_VALUES],
            total: 0,
        }
    }

    /// Records one byte.
    #[inline]
    pub fn observe(&mut self, byte: u8) {
        self.counts[byte as usize] += 1;
        self.total += 1;
    }

    /// Records every byte of a slice.
    pub fn observe_slice(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.observe(byte);
        }
    }

    /// Returns the count for a single byte value.
    #[inline]
    pub fn count(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Returns all 256 counters, indexed by byte value.
    #[inline]
    pub fn counts(&self) -> &[u64; BYTE_VALUES] {
        &self.counts
    }

    /// Returns the number of bytes observed.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns true if no byte has been observed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of byte values seen at least once.
    pub fn distinct_values(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }
}

impl Default for ByteHistogram {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ByteHistogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteHistogram")
            .field("total", &self.total)
            .field("distinct_values", &self.distinct_values())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_updates_bin_and_total() {
        let mut hist = ByteHistogram::new();
        hist.observe(0x41);
        hist.observe(0x41);
        hist.observe(0x00);

        assert_eq!(hist.count(0x41), 2);
        assert_eq!(hist.count(0x00), 1);
        assert_eq!(hist.count(0xFF), 0);
        assert_eq!(hist.total(), 3);
        assert_eq!(hist.distinct_values(), 2);
    }

    #[test]
    fn test_counts_sum_to_total() {
        let mut hist = ByteHistogram::new();
        let data: Vec<u8> = (0..5000u32).map(|i| (i * 31 % 251) as u8).collect();
        hist.observe_slice(&data);

        let sum: u64 = hist.counts().iter().sum();
        assert_eq!(sum, hist.total());
        assert_eq!(hist.total(), 5000);
    }

    #[test]
    fn test_new_is_empty() {
        let hist = ByteHistogram::default();
        assert!(hist.is_empty());
        assert_eq!(hist.distinct_values(), 0);
    }
}
