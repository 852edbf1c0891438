//! Metrics collection and registry.

use prometheus::{Encoder, GaugeVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::report::AnalysisReport;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
    #[error("failed to write metrics: {0}")]
    Io(#[from] std::io::Error),
}

/// Prometheus registry describing one batch run.
pub struct MetricsRegistry {
    registry: Registry,

    inputs_total: IntCounterVec,
    bytes_analyzed_total: IntCounter,

    confidence: GaugeVec,
    chi_square: GaugeVec,
    pi_error: GaugeVec,
}

impl MetricsRegistry {
    /// Creates a new registry with all batch metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let inputs_total = IntCounterVec::new(
            Opts::new(
                "encdetect_inputs_total",
                "Inputs processed, by outcome (ok or error kind)",
            ),
            &["outcome"],
        )?;
        let bytes_analyzed_total = IntCounter::new(
            "encdetect_bytes_analyzed_total",
            "Bytes consumed by successful analyses",
        )?;

        let confidence = GaugeVec::new(
            Opts::new(
                "encdetect_confidence_percent",
                "Encryption confidence per input (0-99)",
            ),
            &["input"],
        )?;
        let chi_square = GaugeVec::new(
            Opts::new(
                "encdetect_chi_square",
                "Chi-square statistic per input against a uniform distribution",
            ),
            &["input"],
        )?;
        let pi_error = GaugeVec::new(
            Opts::new(
                "encdetect_pi_error_percent",
                "Monte Carlo pi error per input, in percent",
            ),
            &["input"],
        )?;

        registry.register(Box::new(inputs_total.clone()))?;
        registry.register(Box::new(bytes_analyzed_total.clone()))?;
        registry.register(Box::new(confidence.clone()))?;
        registry.register(Box::new(chi_square.clone()))?;
        registry.register(Box::new(pi_error.clone()))?;

        Ok(Self {
            registry,
            inputs_total,
            bytes_analyzed_total,
            confidence,
            chi_square,
            pi_error,
        })
    }

    /// Records a successful analysis.
    pub fn record_report(&self, report: &AnalysisReport) {
        let input = [report.source.as_str()];
        self.inputs_total.with_label_values(&["ok"]).inc();
        self.bytes_analyzed_total.inc_by(report.bytes);
        self.confidence
            .with_label_values(&input)
            .set(report.confidence as f64);
        self.chi_square.with_label_values(&input).set(report.chi_square);
        self.pi_error
            .with_label_values(&input)
            .set(report.monte_carlo_error_percent);
    }

    /// Records a failed analysis.
    pub fn record_failure(&self, err: &AnalysisError) {
        self.inputs_total.with_label_values(&[err.kind()]).inc();
        if let Some(chi) = err.partial_chi_square() {
            self.chi_square.with_label_values(&[err.input()]).set(chi);
        }
    }

    /// Records every result of a batch.
    pub fn record_all<'a, I>(&self, results: I)
    where
        I: IntoIterator<Item = &'a Result<AnalysisReport, AnalysisError>>,
    {
        for result in results {
            match result {
                Ok(report) => self.record_report(report),
                Err(err) => self.record_failure(err),
            }
        }
    }

    /// Returns the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Writes the text encoding to a file, replacing it.
    pub fn write_to(&self, path: impl AsRef<std::path::Path>) -> Result<(), MetricsError> {
        std::fs::write(path, self.encode()?)?;
        Ok(())
    }
}
