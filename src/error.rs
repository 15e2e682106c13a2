//! Error types for benchmark runs.
//!
//! Only [`BenchError::UnrecognizedOperation`] can occur during a normal
//! program run; the other variants guard the library entry points and the
//! worker threads.

use thiserror::Error;

use crate::bench::Label;

/// Errors that can stop a benchmark run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BenchError {
    /// The operation symbol is not one of `+`, `-`, `*`, `/`.
    #[error("Invalid operator.")]
    UnrecognizedOperation(char),

    /// Buffers A and B differ in length.
    #[error("Buffer length mismatch: a has {a} elements, b has {b}")]
    LengthMismatch { a: usize, b: usize },

    /// The buffer length leaves a partial lane group.
    #[error("Buffer length {len} is not a multiple of the lane count {lanes}")]
    LaneRemainder { len: usize, lanes: usize },

    /// Another holder of the shared buffer panicked while holding the lock.
    #[error("Shared buffer lock poisoned")]
    LockPoisoned,

    /// A worker thread panicked before reporting.
    #[error("{0} worker panicked")]
    WorkerPanicked(Label),
}

/// Result type alias for benchmark operations.
pub type Result<T> = std::result::Result<T, BenchError>;

/// Checks that both buffers have the same length.
pub fn check_lengths(a: &[f32], b: &[f32]) -> Result<()> {
    if a.len() != b.len() {
        return Err(BenchError::LengthMismatch {
            a: a.len(),
            b: b.len(),
        });
    }
    Ok(())
}
