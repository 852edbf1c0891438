//! Per-input analysis reports.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};

use crate::analysis::{AnalysisError, ByteHistogram, Statistics};
use crate::classification::{Classification, Rule};

/// Result of analyzing one input.
///
/// All numeric fields are deterministic for a fixed input; only
/// `analyzed_at` varies between runs.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Input identifier.
    pub source: String,
    /// Bytes consumed.
    pub bytes: u64,
    /// Chi-square statistic against a uniform byte distribution.
    pub chi_square: f64,
    /// Monte Carlo estimate of pi.
    pub monte_carlo_pi: f64,
    /// Deviation of the estimate from pi, in percent.
    pub monte_carlo_error_percent: f64,
    /// Complete windows scored.
    pub monte_carlo_samples: u64,
    /// Windows inside the reference circle.
    pub monte_carlo_in_circle: u64,
    /// Confidence of encryption, 0 to 99.
    pub confidence: u8,
    /// Heuristic rules that fired.
    pub rules_fired: Vec<Rule>,
    /// When the analysis finished.
    pub analyzed_at: DateTime<Utc>,
    #[serde(skip)]
    histogram: ByteHistogram,
}

impl AnalysisReport {
    /// Builds a report from final statistics and their classification.
    pub fn new(source: impl Into<String>, stats: Statistics, classification: Classification) -> Self {
        Self {
            source: source.into(),
            bytes: stats.bytes,
            chi_square: stats.chi_square,
            monte_carlo_pi: stats.pi.value,
            monte_carlo_error_percent: stats.pi.error_percent,
            monte_carlo_samples: stats.pi.samples,
            monte_carlo_in_circle: stats.pi.in_circle,
            confidence: classification.confidence,
            rules_fired: classification.fired,
            analyzed_at: Utc::now(),
            histogram: stats.histogram,
        }
    }

    /// Final byte histogram of the input.
    pub fn histogram(&self) -> &ByteHistogram {
        &self.histogram
    }

    /// Writes one line per byte value: `0xNN count`.
    pub fn write_histogram<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (value, count) in self.histogram.counts().iter().enumerate() {
            writeln!(out, "0x{value:02x} {count}")?;
        }
        Ok(())
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File: {}", self.source)?;
        writeln!(f, "Bytes: {}", self.bytes)?;
        writeln!(f, "Chi-Square Distribution: {:.4}", self.chi_square)?;
        writeln!(f, "Monte Carlo Pi Value: {:.6}", self.monte_carlo_pi)?;
        writeln!(
            f,
            "Monte Carlo Pi Error Rate: {:.4}%",
            self.monte_carlo_error_percent
        )?;
        if !self.rules_fired.is_empty() {
            let rules: Vec<&str> = self.rules_fired.iter().map(Rule::describe).collect();
            writeln!(f, "Signals: {}", rules.join("; "))?;
        }
        write!(
            f,
            "The file has a {}% confidence of encryption.",
            self.confidence
        )
    }
}

/// Serializable record of a failed input.
#[derive(Debug, Clone, Serialize)]
pub struct FailureRecord {
    /// Input identifier.
    pub source: String,
    /// Short error label, see [`AnalysisError::kind`].
    pub kind: &'static str,
    /// Full error message.
    pub error: String,
    /// Chi-square computed before the failure, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chi_square: Option<f64>,
}

impl From<&AnalysisError> for FailureRecord {
    fn from(err: &AnalysisError) -> Self {
        Self {
            source: err.input().to_string(),
            kind: err.kind(),
            error: err.to_string(),
            chi_square: err.partial_chi_square(),
        }
    }
}

/// All results of one run, rendered as a single TOML document.
#[derive(Debug, Default, Serialize)]
pub struct BatchDocument {
    /// Successful analyses.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub report: Vec<AnalysisReport>,
    /// Failed inputs.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failure: Vec<FailureRecord>,
}

impl BatchDocument {
    /// Splits results into reports and failures, keeping their order.
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a Result<AnalysisReport, AnalysisError>>,
    {
        let mut doc = Self::default();
        for result in results {
            match result {
                Ok(report) => doc.report.push(report.clone()),
                Err(err) => doc.failure.push(FailureRecord::from(err)),
            }
        }
        doc
    }

    /// Renders the document as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}
