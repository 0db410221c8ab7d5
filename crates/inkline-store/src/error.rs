//! Error taxonomy for storage operations.

use thiserror::Error;

use inkline_types::{BranchId, PostId};

/// Errors from branch and document storage operations.
///
/// `Conflict` is the one retryable class: the caller should re-read and
/// retry. Everything else is a lifecycle or identity violation and is not
/// retried automatically.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The branch does not exist, or is inactive where an active branch was
    /// required.
    #[error("branch not found: {branch}")]
    NotFound { branch: BranchId },

    /// The document does not exist.
    #[error("document not found: {post}")]
    DocumentNotFound { post: PostId },

    /// An active branch with this name already exists for the post.
    #[error("branch name '{name}' already active for {post}")]
    DuplicateName { post: PostId, name: String },

    /// Optimistic-concurrency loss: the record changed since it was read.
    #[error("concurrent modification of {reference}; re-read and retry")]
    Conflict { reference: String },

    /// The branch has been merged and no longer accepts edits.
    #[error("branch {branch} is merged and read-only")]
    Immutable { branch: BranchId },

    /// Deletion is forbidden for this branch.
    #[error("branch {branch} is protected: {reason}")]
    Protected { branch: BranchId, reason: String },

    /// The backing store is unavailable (I/O failure, poisoned lock).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Convenience alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
