//! The [`BranchStore`] and [`DocumentStore`] traits defining the storage
//! interface.
//!
//! Any backend (in-memory, relational, keyed record store) implements these
//! to provide branch lifecycle management. Implementations must be
//! thread-safe (`Send + Sync`); the only write-coordination primitive they
//! must offer is a compare-and-swap on the record's modification timestamp.

use chrono::{DateTime, Utc};

use inkline_types::{Branch, BranchId, BranchKind, Document, PostId, Snapshot, SnapshotPatch};

use crate::error::StoreResult;

/// Retention policy for merged branches.
///
/// The deletability of merged branches is deliberately a policy flag rather
/// than a hard-coded rule. Either way the record survives soft deletion and
/// stays resolvable from history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Merged branches may be soft-deleted (the default).
    #[default]
    AllowMergedDelete,
    /// Merged branches are protected from deletion.
    RetainMerged,
}

/// Parameters for creating a branch.
///
/// `base` is the fork-point snapshot resolved by the caller: the parent
/// branch's working snapshot, or the document's current snapshot when the
/// parent is main. It becomes the branch's immutable `base_snapshot`.
#[derive(Clone, Debug)]
pub struct NewBranch {
    pub post_id: PostId,
    pub name: String,
    pub kind: BranchKind,
    /// The branch forked from; `None` means main.
    pub parent: Option<BranchId>,
    /// Snapshot captured at fork time.
    pub base: Snapshot,
    /// Initial edits applied on top of the base to seed the working
    /// snapshot.
    pub overrides: Option<SnapshotPatch>,
    pub created_by: String,
}

/// Storage backend for branch records.
pub trait BranchStore: Send + Sync {
    /// Create a branch.
    ///
    /// Fails with `DuplicateName` if an active branch with the same
    /// `(post_id, name)` exists. The new branch's `base_snapshot` is fixed
    /// to `new.base`; its working snapshot is the base with `new.overrides`
    /// applied.
    fn create(&self, new: NewBranch) -> StoreResult<Branch>;

    /// Read a branch by id.
    ///
    /// With `active_only`, an inactive (soft-deleted) branch reads as
    /// `NotFound`.
    fn get(&self, id: BranchId, active_only: bool) -> StoreResult<Branch>;

    /// All active branches of a post, ordered by `created_date` ascending.
    ///
    /// Branch counts are small (tens, not millions), so this is a
    /// materialized list, not a cursor.
    fn list_active(&self, post: PostId) -> StoreResult<Vec<Branch>>;

    /// Replace the working snapshot via compare-and-swap on
    /// `modified_date`.
    ///
    /// Fails with `Conflict` if `expected_modified` does not match the
    /// stored value (a concurrent editor won), and with `Immutable` if the
    /// branch has been merged. On success `modified_date` is set to now.
    fn update(
        &self,
        id: BranchId,
        expected_modified: Option<DateTime<Utc>>,
        snapshot: Snapshot,
        modified_by: &str,
    ) -> StoreResult<Branch>;

    /// Soft-delete a branch: mark it inactive without removing the record.
    ///
    /// Fails with `Protected` when the configured [`DeletePolicy`] forbids
    /// deleting a merged branch.
    fn soft_delete(&self, id: BranchId) -> StoreResult<()>;

    /// Mark a branch merged. A merged branch stays active and visible but
    /// rejects further edits.
    fn mark_merged(&self, id: BranchId, merged_by: &str) -> StoreResult<()>;
}

/// Publishing-subsystem contract for the document's canonical snapshot (the
/// virtual main branch).
pub trait DocumentStore: Send + Sync {
    /// Read a document.
    fn get(&self, post: PostId) -> StoreResult<Document>;

    /// Replace the document's snapshot via compare-and-swap on
    /// `modified_at`, with the same semantics as [`BranchStore::update`].
    fn set_snapshot(
        &self,
        post: PostId,
        snapshot: Snapshot,
        expected_modified_at: DateTime<Utc>,
    ) -> StoreResult<Document>;
}
