//! Analysis and output configuration.
//!
//! Defaults reproduce the reference heuristic. A TOML file may override
//! any subset of fields; missing sections fall back to defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analysis::{validate_window, InvalidWindowSize, DEFAULT_WINDOW};
use crate::classification::{HeuristicRules, RulesError};

/// Settings for a single analysis pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Monte Carlo window size in bytes.
    pub window_size: usize,
    /// Size of each sequential read from the input.
    pub read_buffer_size: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW,
            read_buffer_size: 64 * 1024,
        }
    }
}

impl AnalysisConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_window(self.window_size)?;
        if self.read_buffer_size == 0 {
            return Err(ConfigError::InvalidBufferSize);
        }
        Ok(())
    }
}

/// Report rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// A TOML document with one table per input.
    Toml,
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format.
    pub format: OutputFormat,
    /// Print all 256 byte counters after each text report.
    pub show_histogram: bool,
    /// Write Prometheus text-format metrics here after the run.
    pub metrics_file: Option<PathBuf>,
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    InvalidWindow(#[from] InvalidWindowSize),
    #[error("read buffer size must be greater than zero")]
    InvalidBufferSize,
    #[error("invalid heuristic rules: {0}")]
    InvalidRules(#[from] RulesError),
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub heuristic: HeuristicRules,
    #[serde(default)]
    pub output: OutputConfig,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analysis.validate()?;
        self.heuristic.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_odd_window_invalid() {
        let config = AnalysisConfig {
            window_size: 7,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidWindow(InvalidWindowSize(7))));
    }

    #[test]
    fn test_zero_buffer_invalid() {
        let config = AnalysisConfig {
            read_buffer_size: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidBufferSize));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = FileConfig::from_toml(
            r#"
            [analysis]
            window_size = 8

            [heuristic]
            reset_pi_error = 25.0

            [output]
            format = "toml"
            "#,
        )
        .unwrap();

        assert_eq!(config.analysis.window_size, 8);
        assert_eq!(config.analysis.read_buffer_size, 64 * 1024);
        assert_eq!(config.heuristic.reset_pi_error, 25.0);
        assert_eq!(config.heuristic.chi_square_reference, 300.0);
        assert_eq!(config.output.format, OutputFormat::Toml);
        assert!(!config.output.show_histogram);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(FileConfig::from_toml("").unwrap(), FileConfig::default());
    }

    #[test]
    fn test_invalid_rules_in_file() {
        let result = FileConfig::from_toml("[heuristic]\ncap = 150\n");
        assert!(matches!(result, Err(ConfigError::InvalidRules(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let result = FileConfig::from_toml("[analysis\nwindow_size = 6");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = FileConfig::from_file("/nonexistent/encdetect.toml");
        assert!(matches!(result, Err(ConfigError::FileReadError(_))));
    }
}
