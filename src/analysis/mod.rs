//! Randomness estimators over a byte stream.
//!
//! Two independent statistics are accumulated in a single pass: a byte
//! histogram for the chi-square test and a windowed Monte Carlo estimate
//! of pi. Both are heuristics, not a formal randomness test suite.

mod chi_square;
mod error;
mod histogram;
mod monte_carlo;
mod state;

pub use chi_square::{chi_square, DEGREES_OF_FREEDOM};
pub use error::AnalysisError;
pub use histogram::{ByteHistogram, BYTE_VALUES};
pub use monte_carlo::{
    error_percent, validate_window, InvalidWindowSize, MonteCarloPi, PiEstimate, DEFAULT_WINDOW,
    MAX_WINDOW, MIN_WINDOW,
};
pub use state::{AnalysisState, Statistics};
