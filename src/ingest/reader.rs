//! Single sequential pass over an input.

use std::io::{ErrorKind, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::analysis::{AnalysisError, AnalysisState};

/// Shared cancellation flag, checked at every read boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of every analysis holding this token.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns true once [`CancelToken::cancel`] has been called.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Drives an [`AnalysisState`] from a reader until end of stream.
pub struct StreamReader {
    buffer: Vec<u8>,
    cancel: CancelToken,
}

impl StreamReader {
    /// Creates a reader with the given chunk size.
    pub fn new(buffer_size: usize, cancel: CancelToken) -> Self {
        Self {
            buffer: vec![0; buffer_size.max(1)],
            cancel,
        }
    }

    /// Reads `reader` to exhaustion, feeding every byte to `state` in order.
    ///
    /// End of stream is the normal termination. Interrupted reads are
    /// retried; any other I/O error is reported as
    /// [`AnalysisError::InputUnavailable`].
    pub fn consume<R: Read + ?Sized>(
        &mut self,
        input: &str,
        reader: &mut R,
        state: &mut AnalysisState,
    ) -> Result<(), AnalysisError> {
        loop {
            if self.cancel.is_cancelled() {
                tracing::warn!(input, consumed = state.bytes_consumed(), "Analysis cancelled");
                return Err(AnalysisError::Cancelled {
                    input: input.to_string(),
                    consumed: state.bytes_consumed(),
                });
            }

            let n = match reader.read(&mut self.buffer) {
                Ok(0) => return Ok(()),
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(AnalysisError::InputUnavailable {
                        input: input.to_string(),
                        source,
                    })
                }
            };

            state.observe_slice(&self.buffer[..n]);

            tracing::trace!(
                input,
                chunk = n,
                consumed = state.bytes_consumed(),
                "Read chunk"
            );
        }
    }
}
