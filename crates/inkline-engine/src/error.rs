//! Error types for the version controller.

use thiserror::Error;

use inkline_history::HistoryError;
use inkline_merge::MergeError;
use inkline_store::StoreError;
use inkline_types::{BranchId, PostId};

/// Errors from version-controller operations.
///
/// Merge conflicts are not represented here — they come back as a normal
/// [`MergeResult`](crate::MergeResult) variant. An `Err` from `merge` means
/// the operation could not run or could not commit, not that content
/// conflicted.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A lifecycle, identity, or concurrency violation from the store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The audit log could not be appended to; the operation is aborted.
    #[error(transparent)]
    History(#[from] HistoryError),

    /// Invariant violation inside merge computation (programming-error
    /// class).
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// The referenced branch belongs to a different document.
    #[error("branch {branch} does not belong to {post}")]
    WrongDocument { branch: BranchId, post: PostId },

    /// A branch cannot be merged into itself.
    #[error("cannot merge branch {branch} into itself")]
    SelfMerge { branch: BranchId },
}

/// Convenience alias for controller operations.
pub type EngineResult<T> = Result<T, EngineError>;
