//! Branch records: named lines of divergent editing over one document.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{BranchId, PostId};
use crate::snapshot::Snapshot;

/// Classification of a branch's purpose.
///
/// Main is never a physical branch and therefore has no kind.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BranchKind {
    #[default]
    Feature,
    Hotfix,
    Draft,
    Review,
}

impl BranchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BranchKind::Feature => "feature",
            BranchKind::Hotfix => "hotfix",
            BranchKind::Draft => "draft",
            BranchKind::Review => "review",
        }
    }
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, independently editable working copy of a document's content.
///
/// Invariants enforced by the store:
///
/// - `base_snapshot` is fixed at creation and equals the parent's working
///   snapshot (or the document's snapshot if the parent is main) at that
///   instant. It is the common ancestor for three-way diff and merge.
/// - `branch_id` is never reused, even after deletion, so history references
///   stay valid forever.
/// - A merged branch stays active (merged is not deleted) but rejects any
///   further edit.
/// - `name` is unique among the *active* branches of the same post; deleted
///   and merged-then-deleted branches free the name for reuse.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub branch_id: BranchId,
    pub post_id: PostId,
    pub name: String,
    pub kind: BranchKind,
    /// The branch this one forked from; `None` means main.
    pub parent: Option<BranchId>,
    /// Common ancestor captured at fork time. Never changes after creation.
    pub base_snapshot: Snapshot,
    /// The branch's current editable content.
    pub working_snapshot: Snapshot,
    pub created_by: String,
    pub created_date: DateTime<Utc>,
    pub modified_by: Option<String>,
    /// Optimistic-concurrency token: every working-snapshot write compares
    /// and swaps on this value.
    pub modified_date: Option<DateTime<Utc>>,
    /// `false` once soft-deleted. Records are never physically removed.
    pub is_active: bool,
    pub is_merged: bool,
    pub merged_date: Option<DateTime<Utc>>,
    pub merged_by: Option<String>,
}

impl Branch {
    /// Returns `true` if the branch accepts working-snapshot edits.
    pub fn is_editable(&self) -> bool {
        self.is_active && !self.is_merged
    }
}
