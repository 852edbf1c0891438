//! Input sources.
//!
//! A trait-based abstraction over where analyzed bytes come from, so the
//! pipeline can run over files, standard input, or in-memory buffers.

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

/// Identifier used on the command line for standard input.
pub const STDIN_MARKER: &str = "-";

/// Something that can be opened for one sequential read.
pub trait ByteSource {
    /// Label used in reports and errors.
    fn label(&self) -> String;

    /// Opens the source for reading from the start.
    fn open(&self) -> io::Result<Box<dyn Read + '_>>;
}

/// An input named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A filesystem path.
    Path(PathBuf),
    /// Standard input.
    Stdin,
}

impl InputSource {
    /// Parses a command-line argument; `-` means standard input.
    pub fn from_arg(arg: &str) -> Self {
        if arg == STDIN_MARKER {
            Self::Stdin
        } else {
            Self::Path(PathBuf::from(arg))
        }
    }
}

impl From<PathBuf> for InputSource {
    fn from(path: PathBuf) -> Self {
        if path.as_os_str() == STDIN_MARKER {
            Self::Stdin
        } else {
            Self::Path(path)
        }
    }
}

impl ByteSource for InputSource {
    fn label(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Stdin => "<stdin>".to_string(),
        }
    }

    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        match self {
            Self::Path(path) => {
                let file = File::open(path)?;
                if file.metadata()?.is_dir() {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "is a directory",
                    ));
                }
                Ok(Box::new(file))
            }
            Self::Stdin => Ok(Box::new(io::stdin().lock())),
        }
    }
}

/// In-memory source.
#[derive(Debug, Clone)]
pub struct MemorySource<'a> {
    label: String,
    data: &'a [u8],
}

impl<'a> MemorySource<'a> {
    /// Wraps a borrowed buffer under the given label.
    pub fn new(label: impl Into<String>, data: &'a [u8]) -> Self {
        Self {
            label: label.into(),
            data,
        }
    }
}

impl ByteSource for MemorySource<'_> {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(self.data))
    }
}
