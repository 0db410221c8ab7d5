//! Result types returned by the version controller.

use serde::{Deserialize, Serialize};

use inkline_diff::DiffEntry;
use inkline_merge::MergeStrategy;
use inkline_types::{Field, Snapshot};

/// The result of a two-way comparison between two content refs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    pub diffs: Vec<DiffEntry>,
    /// Deterministic 0–100 change-impact estimate.
    pub impact_score: u8,
    /// Distinct changed fields, in canonical order.
    pub change_types: Vec<Field>,
    pub summary: String,
    pub recommended_actions: Vec<String>,
}

/// The result of one merge attempt.
///
/// `Failed` and `ConflictsPending` are expected outcomes carried in the
/// `Ok` path: conflicting edits are normal, not a fault. In both cases no
/// durable state was touched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergeResult {
    /// The target was durably updated and the source branch marked merged.
    Applied {
        /// The snapshot now stored on the target.
        snapshot: Snapshot,
        strategy: MergeStrategy,
        /// Fields applied cleanly from the source.
        merged_fields: Vec<Field>,
        /// Conflicted fields resolved heuristically (`ai-assisted`) or by
        /// explicit resolutions — reported separately so a heuristic guess
        /// is never mistaken for a clean match.
        resolved_fields: Vec<Field>,
    },
    /// Conflicts await explicit resolution; retry via `resolve_merge`.
    ConflictsPending {
        strategy: MergeStrategy,
        /// Target snapshot with the clean changes pre-applied, for preview
        /// only.
        preview: Snapshot,
        applied_fields: Vec<Field>,
        conflicts: Vec<DiffEntry>,
    },
    /// The strategy refused to proceed; retry with another strategy or
    /// supply resolutions.
    Failed {
        strategy: MergeStrategy,
        conflicts: Vec<DiffEntry>,
    },
}

impl MergeResult {
    /// Returns `true` if the merge committed.
    pub fn is_applied(&self) -> bool {
        matches!(self, MergeResult::Applied { .. })
    }

    /// The conflicted entries, empty when applied.
    pub fn conflicts(&self) -> &[DiffEntry] {
        match self {
            MergeResult::Applied { .. } => &[],
            MergeResult::ConflictsPending { conflicts, .. } => conflicts,
            MergeResult::Failed { conflicts, .. } => conflicts,
        }
    }
}
