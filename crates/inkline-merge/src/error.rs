//! Error types for merge computation.

use thiserror::Error;

use inkline_types::{Field, TypeError};

/// Errors from merge computation.
///
/// These are invariant violations, not merge conflicts: a detected conflict
/// is reported through [`MergeOutcome`](crate::MergeOutcome), never as an
/// `Err`.
#[derive(Debug, Error)]
pub enum MergeError {
    /// A field value of the wrong shape reached snapshot application. Cannot
    /// occur for entries produced by the diff engine.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// Manual resolution left a conflicted field without a chosen value.
    #[error("no resolution supplied for conflicted field '{field}'")]
    MissingResolution { field: Field },

    /// A resolution was supplied for a field that is not conflicted.
    #[error("resolution supplied for non-conflicted field '{field}'")]
    UnexpectedResolution { field: Field },
}

/// Convenience alias for merge computation results.
pub type MergeResult<T> = Result<T, MergeError>;
