//! Per-input analysis errors.

use thiserror::Error;

/// Errors that can occur while analyzing a single input.
///
/// Every variant names the input it belongs to, so a batch run can
/// report failures alongside successful reports without losing context.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The input could not be opened or read.
    #[error("cannot read {input}: {source}")]
    InputUnavailable {
        input: String,
        #[source]
        source: std::io::Error,
    },

    /// The input yielded zero bytes.
    #[error("{input} is empty; nothing to analyze")]
    EmptyInput { input: String },

    /// The input is shorter than one Monte Carlo window.
    ///
    /// The chi-square statistic is still well defined and is carried along.
    #[error(
        "{input} has {length} bytes, fewer than one {window}-byte Monte Carlo window \
         (chi-square {chi_square:.4})"
    )]
    InsufficientDataForMonteCarlo {
        input: String,
        length: u64,
        window: usize,
        chi_square: f64,
    },

    /// Analysis was interrupted before the input was exhausted.
    #[error("analysis of {input} cancelled after {consumed} bytes")]
    Cancelled { input: String, consumed: u64 },
}

impl AnalysisError {
    /// Stable short label for the error, used as a metrics label value.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InputUnavailable { .. } => "input_unavailable",
            Self::EmptyInput { .. } => "empty_input",
            Self::InsufficientDataForMonteCarlo { .. } => "insufficient_data",
            Self::Cancelled { .. } => "cancelled",
        }
    }

    /// Returns the identifier of the input that failed.
    pub fn input(&self) -> &str {
        match self {
            Self::InputUnavailable { input, .. }
            | Self::EmptyInput { input }
            | Self::InsufficientDataForMonteCarlo { input, .. }
            | Self::Cancelled { input, .. } => input,
        }
    }

    /// Chi-square statistic computed before the failure, if any.
    pub fn partial_chi_square(&self) -> Option<f64> {
        match self {
            Self::InsufficientDataForMonteCarlo { chi_square, .. } => Some(*chi_square),
            _ => None,
        }
    }
}
