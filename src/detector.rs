//! End-to-end analysis pipeline.
//!
//! ```text
//! source → StreamReader → AnalysisState → Statistics → HeuristicRules → AnalysisReport
//! ```
//!
//! Every input gets its own [`AnalysisState`]; nothing is shared between
//! analyses except the read-only configuration and the cancellation flag,
//! so a batch can be spread across threads.

use std::io::{self, Read};

use rayon::prelude::*;

use crate::analysis::{AnalysisError, AnalysisState};
use crate::classification::HeuristicRules;
use crate::ingest::{
    AnalysisConfig, ByteSource, CancelToken, ConfigError, FileConfig, InputSource, MemorySource,
    StreamReader,
};
use crate::report::AnalysisReport;

/// Runs complete analyses with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Detector {
    config: AnalysisConfig,
    fresh_state: AnalysisState,
    rules: HeuristicRules,
    cancel: CancelToken,
}

impl Detector {
    /// Creates a detector after validating its configuration.
    pub fn new(config: AnalysisConfig, rules: HeuristicRules) -> Result<Self, ConfigError> {
        config.validate()?;
        rules.validate()?;
        Ok(Self {
            fresh_state: AnalysisState::with_window(config.window_size)?,
            config,
            rules,
            cancel: CancelToken::new(),
        })
    }

    /// Creates a detector from a loaded configuration file.
    pub fn from_config(config: &FileConfig) -> Result<Self, ConfigError> {
        Self::new(config.analysis.clone(), config.heuristic.clone())
    }

    /// Replaces the cancellation token.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that cancels analyses run by this detector.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Rule table used for classification.
    pub fn rules(&self) -> &HeuristicRules {
        &self.rules
    }

    /// Opens and analyzes a source.
    pub fn analyze<S: ByteSource + ?Sized>(&self, source: &S) -> Result<AnalysisReport, AnalysisError> {
        let label = source.label();
        let mut reader = source
            .open()
            .map_err(|source| AnalysisError::InputUnavailable {
                input: label.clone(),
                source,
            })?;
        self.analyze_reader(&label, &mut reader)
    }

    /// Analyzes an in-memory buffer.
    pub fn analyze_bytes(&self, label: &str, data: &[u8]) -> Result<AnalysisReport, AnalysisError> {
        self.analyze(&MemorySource::new(label, data))
    }

    /// Analyzes an already opened reader, consuming it to the end.
    pub fn analyze_reader<R: Read + ?Sized>(
        &self,
        label: &str,
        reader: &mut R,
    ) -> Result<AnalysisReport, AnalysisError> {
        tracing::debug!(input = label, "Starting analysis");

        let mut state = self.fresh_state.clone();
        StreamReader::new(self.config.read_buffer_size, self.cancel.clone())
            .consume(label, reader, &mut state)?;

        let stats = state.finish(label)?;
        let classification = self.rules.classify(stats.chi_square, stats.pi.error_percent);

        tracing::debug!(
            input = label,
            bytes = stats.bytes,
            chi_square = stats.chi_square,
            pi = stats.pi.value,
            pi_error = stats.pi.error_percent,
            confidence = classification.confidence,
            "Analysis complete"
        );

        Ok(AnalysisReport::new(label, stats, classification))
    }

    /// Analyzes every input independently, returning results in input order.
    ///
    /// With `jobs > 1` the inputs are spread over a work-stealing pool of
    /// `jobs` threads. A failure never affects other inputs. Standard input
    /// can be read only once, so every `-` after the first is reported as
    /// unavailable instead of being analyzed as an empty stream.
    pub fn analyze_all(
        &self,
        sources: &[InputSource],
        jobs: usize,
    ) -> Vec<Result<AnalysisReport, AnalysisError>> {
        let first_stdin = sources.iter().position(|s| *s == InputSource::Stdin);
        let jobs = jobs.clamp(1, sources.len().max(1));

        if jobs > 1 {
            match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
                Ok(pool) => {
                    tracing::info!(inputs = sources.len(), jobs, "Analyzing inputs in parallel");
                    return pool.install(|| {
                        sources
                            .par_iter()
                            .enumerate()
                            .map(|(index, source)| self.analyze_entry(index, source, first_stdin))
                            .collect()
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Could not start worker pool; analyzing sequentially");
                }
            }
        }

        sources
            .iter()
            .enumerate()
            .map(|(index, source)| self.analyze_entry(index, source, first_stdin))
            .collect()
    }

    fn analyze_entry(
        &self,
        index: usize,
        source: &InputSource,
        first_stdin: Option<usize>,
    ) -> Result<AnalysisReport, AnalysisError> {
        if *source == InputSource::Stdin && first_stdin != Some(index) {
            return Err(AnalysisError::InputUnavailable {
                input: source.label(),
                source: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "standard input already consumed by an earlier argument",
                ),
            });
        }
        self.analyze(source)
    }
}
