//! Three-way merge strategies over content snapshots.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use inkline_diff::{diff_three_way, DiffEntry};
use inkline_types::{Field, FieldValue, Snapshot};

use crate::error::{MergeError, MergeResult};

/// How conflicting edits are handled during a merge.
///
/// A closed variant set: adding a strategy means adding a variant and a
/// branch in [`merge`], never interpreting free-form text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeStrategy {
    /// All-or-nothing: any conflict fails the whole merge so no intended
    /// change is silently dropped.
    #[default]
    Auto,
    /// Apply clean changes, hand conflicts back for explicit resolution.
    Manual,
    /// Apply clean changes and resolve conflicts with deterministic
    /// heuristics, reporting which fields were resolved that way.
    AiAssisted,
}

impl MergeStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeStrategy::Auto => "auto",
            MergeStrategy::Manual => "manual",
            MergeStrategy::AiAssisted => "ai-assisted",
        }
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(MergeStrategy::Auto),
            "manual" => Ok(MergeStrategy::Manual),
            "ai-assisted" => Ok(MergeStrategy::AiAssisted),
            other => Err(format!("unknown merge strategy '{other}'")),
        }
    }
}

/// Terminal state of one merge attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergeOutcome {
    /// The merge produced a new target snapshot.
    Applied {
        /// The merged snapshot to be written to the target by the caller.
        snapshot: Snapshot,
        /// Fields applied cleanly from the source.
        applied: Vec<Field>,
        /// Fields that were conflicted and resolved heuristically
        /// (`ai-assisted` only). Distinct from `applied`: the caller must be
        /// able to tell a clean match from a heuristic guess.
        auto_resolved: Vec<Field>,
    },
    /// Clean changes were applied to the preview; conflicted fields await an
    /// explicit resolution via [`apply_resolutions`]. Nothing is durable yet.
    ConflictsPending {
        /// Target snapshot with the clean changes already applied.
        preview: Snapshot,
        applied: Vec<Field>,
        conflicts: Vec<DiffEntry>,
    },
    /// The strategy refused to proceed (auto with conflicts). The target is
    /// untouched.
    Failed { conflicts: Vec<DiffEntry> },
}

impl MergeOutcome {
    /// Returns `true` if the attempt produced an applicable snapshot.
    pub fn is_applied(&self) -> bool {
        matches!(self, MergeOutcome::Applied { .. })
    }

    /// The conflicted entries, if the attempt did not fully apply.
    pub fn conflicts(&self) -> &[DiffEntry] {
        match self {
            MergeOutcome::Applied { .. } => &[],
            MergeOutcome::ConflictsPending { conflicts, .. } => conflicts,
            MergeOutcome::Failed { conflicts } => conflicts,
        }
    }
}

/// Run one merge attempt: three-way diff, then strategy application.
///
/// Pure computation — the caller owns the durable write of the returned
/// snapshot. The `Err` case is an invariant violation and cannot occur for
/// well-formed snapshots.
pub fn merge(
    base: &Snapshot,
    source: &Snapshot,
    target: &Snapshot,
    strategy: MergeStrategy,
) -> MergeResult<MergeOutcome> {
    let diffs = diff_three_way(base, source, target);
    let (conflicts, clean): (Vec<DiffEntry>, Vec<DiffEntry>) =
        diffs.into_iter().partition(|d| d.conflicted);

    match strategy {
        MergeStrategy::Auto => {
            if !conflicts.is_empty() {
                return Ok(MergeOutcome::Failed { conflicts });
            }
            let (snapshot, applied) = apply_entries(target, &clean)?;
            Ok(MergeOutcome::Applied {
                snapshot,
                applied,
                auto_resolved: Vec::new(),
            })
        }
        MergeStrategy::Manual => {
            let (preview, applied) = apply_entries(target, &clean)?;
            if conflicts.is_empty() {
                Ok(MergeOutcome::Applied {
                    snapshot: preview,
                    applied,
                    auto_resolved: Vec::new(),
                })
            } else {
                Ok(MergeOutcome::ConflictsPending {
                    preview,
                    applied,
                    conflicts,
                })
            }
        }
        MergeStrategy::AiAssisted => {
            let (mut snapshot, applied) = apply_entries(target, &clean)?;
            let mut auto_resolved = Vec::with_capacity(conflicts.len());
            for entry in &conflicts {
                let resolved = resolve_heuristically(entry);
                snapshot = snapshot.with_field(entry.field, resolved)?;
                auto_resolved.push(entry.field);
            }
            Ok(MergeOutcome::Applied {
                snapshot,
                applied,
                auto_resolved,
            })
        }
    }
}

/// Complete a pending manual merge by supplying a chosen value per
/// conflicted field.
///
/// Every conflicted field must receive exactly one resolution; extra or
/// missing resolutions are rejected.
pub fn apply_resolutions(
    preview: &Snapshot,
    conflicts: &[DiffEntry],
    resolutions: &BTreeMap<Field, FieldValue>,
) -> MergeResult<Snapshot> {
    for field in resolutions.keys() {
        if !conflicts.iter().any(|c| c.field == *field) {
            return Err(MergeError::UnexpectedResolution { field: *field });
        }
    }
    let mut snapshot = preview.clone();
    for entry in conflicts {
        let chosen = resolutions
            .get(&entry.field)
            .ok_or(MergeError::MissingResolution { field: entry.field })?;
        snapshot = snapshot.with_field(entry.field, chosen.clone())?;
    }
    Ok(snapshot)
}

fn apply_entries(target: &Snapshot, entries: &[DiffEntry]) -> MergeResult<(Snapshot, Vec<Field>)> {
    let mut snapshot = target.clone();
    let mut applied = Vec::with_capacity(entries.len());
    for entry in entries {
        snapshot = snapshot.with_field(entry.field, entry.new.clone())?;
        applied.push(entry.field);
    }
    Ok((snapshot, applied))
}

/// Deterministic per-field conflict resolution for the `ai-assisted`
/// strategy.
///
/// - tags: union of both lists (target order first, then source extras)
/// - title/content/excerpt: the longer value wins (more content retained);
///   ties keep the target's value
/// - status: the target's value (a published state is never silently
///   overwritten by a stale branch)
fn resolve_heuristically(entry: &DiffEntry) -> FieldValue {
    match (&entry.original, &entry.new) {
        (FieldValue::Tags(target_tags), FieldValue::Tags(source_tags)) => {
            let mut union = target_tags.clone();
            for tag in source_tags {
                if !union.contains(tag) {
                    union.push(tag.clone());
                }
            }
            FieldValue::Tags(union)
        }
        (FieldValue::Status(_), _) | (_, FieldValue::Status(_)) => entry.original.clone(),
        (target_value, source_value) => {
            if source_value.char_len() > target_value.char_len() {
                source_value.clone()
            } else {
                target_value.clone()
            }
        }
    }
}
