//! Encryption Detection Library
//!
//! Estimates how likely a byte stream is to be ciphertext, as opposed to
//! plaintext, compressed, or otherwise structured data. Two randomness
//! estimators are computed in a single sequential pass and fused by a
//! fixed empirical rule table into a confidence percentage.
//!
//! # Architecture
//!
//! ```text
//! ingest → analysis (histogram + Monte Carlo) → classification → report
//!                                                       ↓
//!                                                    metrics
//! ```
//!
//! # Design Principles
//!
//! - **Single pass**: every input is read once, front to back, never buffered whole
//! - **Isolated state**: each input owns its accumulators; batches can run in parallel
//! - **Deterministic**: all "randomness" comes from the analyzed bytes
//! - **No cryptanalysis**: the score is a heuristic, not a statistical proof
//!
//! # Example
//!
//! ```no_run
//! use encdetect::{Detector, InputSource};
//!
//! let detector = Detector::default();
//! let report = detector
//!     .analyze(&InputSource::from_arg("suspicious.bin"))
//!     .unwrap();
//!
//! println!("{report}");
//! if report.confidence >= 95 {
//!     println!("likely encrypted");
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod classification;
pub mod detector;
pub mod ingest;
pub mod metrics;
pub mod report;

// Re-export commonly used types at crate root
pub use analysis::{AnalysisError, AnalysisState, ByteHistogram, MonteCarloPi, PiEstimate};
pub use classification::{classify, Classification, HeuristicRules, Rule};
pub use detector::Detector;
pub use ingest::{AnalysisConfig, CancelToken, FileConfig, InputSource};
pub use report::AnalysisReport;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
