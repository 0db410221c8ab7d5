//! Error types for history operations.

use thiserror::Error;

/// Errors from the history log.
///
/// Appends fail only when the backing storage is unavailable; that failure
/// propagates and aborts the enclosing operation rather than being
/// swallowed.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The backing store is unavailable (I/O failure, poisoned lock).
    #[error("history storage unavailable: {0}")]
    Unavailable(String),
}

/// Convenience alias for history operations.
pub type HistoryResult<T> = Result<T, HistoryError>;
