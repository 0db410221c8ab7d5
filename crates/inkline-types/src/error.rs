//! Error types for the foundation crate.

use thiserror::Error;

use crate::field::Field;

/// Errors from type construction and conversion.
///
/// `FieldTypeMismatch` is a programming-error class: it cannot occur when
/// field values are taken from a snapshot and written back to the same field.
#[derive(Debug, Error)]
pub enum TypeError {
    /// A field value of the wrong shape was applied to a snapshot field.
    #[error("value has wrong type for field '{field}'")]
    FieldTypeMismatch { field: Field },

    /// A branch reference string was neither `"main"` nor a valid branch id.
    #[error("invalid branch reference '{input}': {reason}")]
    InvalidBranchRef { input: String, reason: String },
}
