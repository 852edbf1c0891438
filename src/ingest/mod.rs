//! Input handling and configuration.
//!
//! Inputs are read exactly once, front to back, in fixed-size chunks.
//! Nothing is buffered beyond the current chunk and one Monte Carlo window.

mod config;
mod reader;
mod source;

pub use config::{AnalysisConfig, ConfigError, FileConfig, OutputConfig, OutputFormat};
pub use reader::{CancelToken, StreamReader};
pub use source::{ByteSource, InputSource, MemorySource, STDIN_MARKER};
