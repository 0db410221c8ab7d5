//! The [`VersionController`] façade.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use inkline_diff::{classify, diff_two_way, impact_score, summarize};
use inkline_history::{ChangeType, HistoryEntry, HistoryLog};
use inkline_merge::{apply_resolutions, merge as run_merge, MergeOutcome, MergeStrategy};
use inkline_store::{BranchStore, DocumentStore, NewBranch, StoreError};
use inkline_types::{
    Branch, BranchId, BranchKind, BranchRef, Field, FieldValue, PostId, Snapshot, SnapshotPatch,
};

use crate::error::{EngineError, EngineResult};
use crate::report::{DiffReport, MergeResult};

/// Parameters for creating a branch.
#[derive(Clone, Debug)]
pub struct CreateBranchRequest {
    pub post_id: PostId,
    pub name: String,
    pub kind: BranchKind,
    /// The branch to fork from; `None` forks from main.
    pub parent: Option<BranchId>,
    /// Initial edits applied on top of the fork point.
    pub overrides: Option<SnapshotPatch>,
}

/// Sequences branch storage, diff, merge, and history per document.
///
/// The stores are injected — there is no process-wide singleton. Each
/// mutating operation performs its durable write first and then appends one
/// history entry; if the append fails, the error propagates and the
/// operation reports failure. Reads (`diff`, `list_branches`, `history`)
/// are not audited.
pub struct VersionController<B, D, H> {
    branches: B,
    documents: D,
    history: H,
}

/// The target of a merge, with the concurrency token observed when the
/// merge began. The final write swaps against this token, so a target that
/// changed mid-merge fails with `Conflict` and the merge must be retried.
enum MergeTarget {
    Main { observed: DateTime<Utc> },
    Branch { id: BranchId, observed: Option<DateTime<Utc>> },
}

impl<B, D, H> VersionController<B, D, H>
where
    B: BranchStore,
    D: DocumentStore,
    H: HistoryLog,
{
    pub fn new(branches: B, documents: D, history: H) -> Self {
        Self {
            branches,
            documents,
            history,
        }
    }

    /// Fork a new branch from main or from an active parent branch.
    pub fn create_branch(&self, req: CreateBranchRequest, actor: &str) -> EngineResult<Branch> {
        let base = match req.parent {
            None => self.documents.get(req.post_id)?.snapshot,
            Some(parent_id) => {
                let parent = self.branches.get(parent_id, true)?;
                if parent.post_id != req.post_id {
                    return Err(EngineError::WrongDocument {
                        branch: parent_id,
                        post: req.post_id,
                    });
                }
                parent.working_snapshot
            }
        };

        let parent_label = req
            .parent
            .map_or_else(|| BranchRef::MAIN.to_string(), |id| id.to_string());
        let branch = self.branches.create(NewBranch {
            post_id: req.post_id,
            name: req.name,
            kind: req.kind,
            parent: req.parent,
            base,
            overrides: req.overrides,
            created_by: actor.to_string(),
        })?;

        self.history.append(HistoryEntry::now(
            branch.post_id,
            Some(branch.branch_id),
            ChangeType::Create,
            actor,
            format!(
                "created branch '{}' ({}) from {}",
                branch.name, branch.kind, parent_label
            ),
        ))?;
        info!(branch = %branch.branch_id, post = %branch.post_id, name = %branch.name, "branch created");
        Ok(branch)
    }

    /// Apply field changes to a branch's working snapshot.
    ///
    /// `expected_modified_date` is the optimistic-concurrency token from the
    /// caller's last read; a concurrent editor winning the race surfaces as
    /// `Conflict`, after which the caller re-reads and retries.
    pub fn edit_branch(
        &self,
        branch_id: BranchId,
        expected_modified_date: Option<DateTime<Utc>>,
        changes: &SnapshotPatch,
        actor: &str,
    ) -> EngineResult<Branch> {
        let branch = self.branches.get(branch_id, true)?;
        if changes.is_empty() {
            return Ok(branch);
        }

        let next = branch.working_snapshot.apply(changes);
        let updated = self
            .branches
            .update(branch_id, expected_modified_date, next, actor)?;

        let fields = changes.changed_fields();
        let joined = fields
            .iter()
            .map(Field::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        self.history.append(
            HistoryEntry::now(
                updated.post_id,
                Some(branch_id),
                ChangeType::Edit,
                actor,
                format!("edited {joined}"),
            )
            .with_field_name(joined.clone()),
        )?;
        debug!(branch = %branch_id, fields = %joined, "branch edited");
        Ok(updated)
    }

    /// Compare two refs of the same document. Pure read, not audited.
    pub fn diff(&self, post: PostId, from: BranchRef, to: BranchRef) -> EngineResult<DiffReport> {
        let from_snapshot = self.resolve_snapshot(post, from)?;
        let to_snapshot = self.resolve_snapshot(post, to)?;
        let diffs = diff_two_way(&from_snapshot, &to_snapshot);
        Ok(build_report(diffs))
    }

    /// Merge a branch into main or into another branch of the same
    /// document.
    ///
    /// On `Applied` the target write is a compare-and-swap against the
    /// modification token observed before the three-way comparison, and the
    /// source branch is marked merged. A `Merge` history entry is appended
    /// whether or not the merge applied.
    pub fn merge(
        &self,
        post: PostId,
        from_branch: BranchId,
        to: BranchRef,
        strategy: MergeStrategy,
        actor: &str,
    ) -> EngineResult<MergeResult> {
        let (source, target_snapshot, target) = self.prepare_merge(post, from_branch, to)?;

        let outcome = run_merge(
            &source.base_snapshot,
            &source.working_snapshot,
            &target_snapshot,
            strategy,
        )?;

        match outcome {
            MergeOutcome::Applied {
                snapshot,
                applied,
                auto_resolved,
            } => self.commit_merge(
                post, from_branch, to, target, snapshot, strategy, applied, auto_resolved, actor,
            ),
            MergeOutcome::ConflictsPending {
                preview,
                applied,
                conflicts,
            } => {
                self.history.append(HistoryEntry::now(
                    post,
                    Some(from_branch),
                    ChangeType::Merge,
                    actor,
                    format!(
                        "merge of branch {from_branch} into {to} ({strategy}) pending: {} conflict(s)",
                        conflicts.len()
                    ),
                ))?;
                Ok(MergeResult::ConflictsPending {
                    strategy,
                    preview,
                    applied_fields: applied,
                    conflicts,
                })
            }
            MergeOutcome::Failed { conflicts } => {
                self.history.append(HistoryEntry::now(
                    post,
                    Some(from_branch),
                    ChangeType::Merge,
                    actor,
                    format!(
                        "merge of branch {from_branch} into {to} ({strategy}) failed: {} conflict(s)",
                        conflicts.len()
                    ),
                ))?;
                Ok(MergeResult::Failed {
                    strategy,
                    conflicts,
                })
            }
        }
    }

    /// Complete a pending manual merge by supplying a chosen value per
    /// conflicted field.
    ///
    /// Recomputes the three-way comparison (the target may have moved since
    /// the pending result was returned), applies clean changes and the
    /// supplied resolutions, and commits with the same compare-and-swap
    /// discipline as [`VersionController::merge`].
    pub fn resolve_merge(
        &self,
        post: PostId,
        from_branch: BranchId,
        to: BranchRef,
        resolutions: &BTreeMap<Field, FieldValue>,
        actor: &str,
    ) -> EngineResult<MergeResult> {
        let (source, target_snapshot, target) = self.prepare_merge(post, from_branch, to)?;

        let outcome = run_merge(
            &source.base_snapshot,
            &source.working_snapshot,
            &target_snapshot,
            MergeStrategy::Manual,
        )?;
        let (preview, applied, conflicts) = match outcome {
            MergeOutcome::Applied {
                snapshot, applied, ..
            } => (snapshot, applied, Vec::new()),
            MergeOutcome::ConflictsPending {
                preview,
                applied,
                conflicts,
            } => (preview, applied, conflicts),
            // Manual never fails outright; nothing to resolve if it did.
            MergeOutcome::Failed { conflicts } => {
                return Ok(MergeResult::Failed {
                    strategy: MergeStrategy::Manual,
                    conflicts,
                })
            }
        };

        let snapshot = apply_resolutions(&preview, &conflicts, resolutions)?;
        let resolved: Vec<Field> = conflicts.iter().map(|c| c.field).collect();
        self.commit_merge(
            post,
            from_branch,
            to,
            target,
            snapshot,
            MergeStrategy::Manual,
            applied,
            resolved,
            actor,
        )
    }

    /// Soft-delete a branch. The record survives for history.
    pub fn delete_branch(&self, branch_id: BranchId, actor: &str) -> EngineResult<()> {
        let branch = self.branches.get(branch_id, true)?;
        self.branches.soft_delete(branch_id)?;
        self.history.append(HistoryEntry::now(
            branch.post_id,
            Some(branch_id),
            ChangeType::Delete,
            actor,
            format!("deleted branch '{}'", branch.name),
        ))?;
        info!(branch = %branch_id, post = %branch.post_id, "branch deleted");
        Ok(())
    }

    /// All active branches of a document, oldest first. Pure read.
    pub fn list_branches(&self, post: PostId) -> EngineResult<Vec<Branch>> {
        Ok(self.branches.list_active(post)?)
    }

    /// The document's full audit trail, oldest first. Pure read.
    pub fn history(&self, post: PostId) -> EngineResult<Vec<HistoryEntry>> {
        Ok(self.history.for_post(post)?)
    }

    fn resolve_snapshot(&self, post: PostId, reference: BranchRef) -> EngineResult<Snapshot> {
        match reference {
            BranchRef::Main => Ok(self.documents.get(post)?.snapshot),
            BranchRef::Branch(id) => {
                let branch = self.branches.get(id, true)?;
                if branch.post_id != post {
                    return Err(EngineError::WrongDocument { branch: id, post });
                }
                Ok(branch.working_snapshot)
            }
        }
    }

    /// Load the source branch and the target's snapshot plus concurrency
    /// token, validating lifecycle rules before any comparison runs.
    fn prepare_merge(
        &self,
        post: PostId,
        from_branch: BranchId,
        to: BranchRef,
    ) -> EngineResult<(Branch, Snapshot, MergeTarget)> {
        let source = self.branches.get(from_branch, true)?;
        if source.post_id != post {
            return Err(EngineError::WrongDocument {
                branch: from_branch,
                post,
            });
        }
        if source.is_merged {
            return Err(StoreError::Immutable {
                branch: from_branch,
            }
            .into());
        }
        if to == BranchRef::Branch(from_branch) {
            return Err(EngineError::SelfMerge {
                branch: from_branch,
            });
        }

        let (target_snapshot, target) = match to {
            BranchRef::Main => {
                let document = self.documents.get(post)?;
                (
                    document.snapshot,
                    MergeTarget::Main {
                        observed: document.modified_at,
                    },
                )
            }
            BranchRef::Branch(target_id) => {
                let branch = self.branches.get(target_id, true)?;
                if branch.post_id != post {
                    return Err(EngineError::WrongDocument {
                        branch: target_id,
                        post,
                    });
                }
                if branch.is_merged {
                    return Err(StoreError::Immutable { branch: target_id }.into());
                }
                (
                    branch.working_snapshot,
                    MergeTarget::Branch {
                        id: target_id,
                        observed: branch.modified_date,
                    },
                )
            }
        };
        Ok((source, target_snapshot, target))
    }

    /// Durably apply a merged snapshot: CAS-write the target, mark the
    /// source merged, then append the audit entry.
    #[allow(clippy::too_many_arguments)]
    fn commit_merge(
        &self,
        post: PostId,
        from_branch: BranchId,
        to: BranchRef,
        target: MergeTarget,
        snapshot: Snapshot,
        strategy: MergeStrategy,
        merged_fields: Vec<Field>,
        resolved_fields: Vec<Field>,
        actor: &str,
    ) -> EngineResult<MergeResult> {
        match target {
            MergeTarget::Main { observed } => {
                self.documents
                    .set_snapshot(post, snapshot.clone(), observed)?;
            }
            MergeTarget::Branch { id, observed } => {
                self.branches
                    .update(id, observed, snapshot.clone(), actor)?;
            }
        }
        self.branches.mark_merged(from_branch, actor)?;

        self.history.append(HistoryEntry::now(
            post,
            Some(from_branch),
            ChangeType::Merge,
            actor,
            format!(
                "merged branch {from_branch} into {to} ({strategy}): {} field(s) applied, {} resolved",
                merged_fields.len(),
                resolved_fields.len()
            ),
        ))?;
        info!(
            branch = %from_branch, %post, target = %to, %strategy,
            applied = merged_fields.len(), resolved = resolved_fields.len(),
            "merge applied"
        );
        Ok(MergeResult::Applied {
            snapshot,
            strategy,
            merged_fields,
            resolved_fields,
        })
    }
}

fn build_report(diffs: Vec<inkline_diff::DiffEntry>) -> DiffReport {
    let score = impact_score(&diffs);
    let change_types = classify(&diffs);
    let summary = summarize(&diffs);
    let mut recommended_actions = Vec::new();
    if !diffs.is_empty() {
        recommended_actions.push("Review changes before merging".to_string());
        if score >= 50 {
            recommended_actions.push("High impact: verify the rendered result".to_string());
        }
        if change_types.contains(&Field::Status) {
            recommended_actions.push("Status changes publication visibility".to_string());
        }
    }
    DiffReport {
        diffs,
        impact_score: score,
        change_types,
        summary,
        recommended_actions,
    }
}
