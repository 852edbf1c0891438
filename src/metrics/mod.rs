//! Prometheus metrics for batch runs.
//!
//! Results of a run are summarized in Prometheus text format, suitable for
//! a node_exporter textfile collector.
//!
//! # Metrics Exposed
//!
//! - `encdetect_inputs_total{outcome}` - Inputs processed, by outcome
//! - `encdetect_bytes_analyzed_total` - Bytes consumed by successful analyses
//! - `encdetect_confidence_percent{input}` - Encryption confidence per input
//! - `encdetect_chi_square{input}` - Chi-square statistic per input
//! - `encdetect_pi_error_percent{input}` - Monte Carlo pi error per input
//!
//! # Example
//!
//! ```no_run
//! use encdetect::{metrics::MetricsRegistry, Detector};
//!
//! let registry = MetricsRegistry::new().expect("Failed to create registry");
//! let report = Detector::default()
//!     .analyze_bytes("sample", &[0x17; 4096])
//!     .expect("analysis failed");
//!
//! registry.record_report(&report);
//! println!("{}", registry.encode().expect("encoding failed"));
//! ```

mod collector;

pub use collector::{MetricsError, MetricsRegistry};
