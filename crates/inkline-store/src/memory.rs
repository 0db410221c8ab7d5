//! In-memory stores for tests and ephemeral embedding.
//!
//! [`InMemoryBranchStore`] and [`InMemoryDocumentStore`] keep records in a
//! `HashMap` protected by a `RwLock`. They implement the full storage traits
//! and are suitable for unit tests and short-lived processes; data is lost
//! when the store is dropped.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use tracing::debug;

use inkline_types::{Branch, BranchId, Document, PostId, Snapshot};

use crate::error::{StoreError, StoreResult};
use crate::traits::{BranchStore, DeletePolicy, DocumentStore, NewBranch};

/// An in-memory implementation of [`BranchStore`].
#[derive(Debug, Default)]
pub struct InMemoryBranchStore {
    policy: DeletePolicy,
    branches: RwLock<HashMap<BranchId, Branch>>,
}

impl InMemoryBranchStore {
    /// Create an empty store with the default delete policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with an explicit delete policy.
    pub fn with_policy(policy: DeletePolicy) -> Self {
        Self {
            policy,
            branches: RwLock::new(HashMap::new()),
        }
    }
}

fn poisoned(e: impl std::fmt::Display) -> StoreError {
    StoreError::Unavailable(format!("lock poisoned: {e}"))
}

impl BranchStore for InMemoryBranchStore {
    fn create(&self, new: NewBranch) -> StoreResult<Branch> {
        let mut branches = self.branches.write().map_err(poisoned)?;

        let duplicate = branches
            .values()
            .any(|b| b.is_active && b.post_id == new.post_id && b.name == new.name);
        if duplicate {
            return Err(StoreError::DuplicateName {
                post: new.post_id,
                name: new.name,
            });
        }

        let working = match &new.overrides {
            Some(patch) => new.base.apply(patch),
            None => new.base.clone(),
        };
        let branch = Branch {
            branch_id: BranchId::generate(),
            post_id: new.post_id,
            name: new.name,
            kind: new.kind,
            parent: new.parent,
            base_snapshot: new.base,
            working_snapshot: working,
            created_by: new.created_by,
            created_date: Utc::now(),
            modified_by: None,
            modified_date: None,
            is_active: true,
            is_merged: false,
            merged_date: None,
            merged_by: None,
        };
        debug!(branch = %branch.branch_id, post = %branch.post_id, name = %branch.name, "branch created");
        branches.insert(branch.branch_id, branch.clone());
        Ok(branch)
    }

    fn get(&self, id: BranchId, active_only: bool) -> StoreResult<Branch> {
        let branches = self.branches.read().map_err(poisoned)?;
        match branches.get(&id) {
            Some(branch) if !active_only || branch.is_active => Ok(branch.clone()),
            _ => Err(StoreError::NotFound { branch: id }),
        }
    }

    fn list_active(&self, post: PostId) -> StoreResult<Vec<Branch>> {
        let branches = self.branches.read().map_err(poisoned)?;
        let mut active: Vec<Branch> = branches
            .values()
            .filter(|b| b.is_active && b.post_id == post)
            .cloned()
            .collect();
        // created_date ascending; branch id breaks same-instant ties.
        active.sort_by(|a, b| {
            a.created_date
                .cmp(&b.created_date)
                .then(a.branch_id.cmp(&b.branch_id))
        });
        Ok(active)
    }

    fn update(
        &self,
        id: BranchId,
        expected_modified: Option<DateTime<Utc>>,
        snapshot: Snapshot,
        modified_by: &str,
    ) -> StoreResult<Branch> {
        let mut branches = self.branches.write().map_err(poisoned)?;
        let branch = branches
            .get_mut(&id)
            .filter(|b| b.is_active)
            .ok_or(StoreError::NotFound { branch: id })?;

        if branch.is_merged {
            return Err(StoreError::Immutable { branch: id });
        }
        if branch.modified_date != expected_modified {
            return Err(StoreError::Conflict {
                reference: format!("branch {id}"),
            });
        }

        branch.working_snapshot = snapshot;
        branch.modified_by = Some(modified_by.to_string());
        branch.modified_date = Some(Utc::now());
        debug!(branch = %id, by = modified_by, "working snapshot updated");
        Ok(branch.clone())
    }

    fn soft_delete(&self, id: BranchId) -> StoreResult<()> {
        let mut branches = self.branches.write().map_err(poisoned)?;
        let branch = branches
            .get_mut(&id)
            .filter(|b| b.is_active)
            .ok_or(StoreError::NotFound { branch: id })?;

        if branch.is_merged && self.policy == DeletePolicy::RetainMerged {
            return Err(StoreError::Protected {
                branch: id,
                reason: "merged branches are retained by policy".into(),
            });
        }

        branch.is_active = false;
        debug!(branch = %id, "branch soft-deleted");
        Ok(())
    }

    fn mark_merged(&self, id: BranchId, merged_by: &str) -> StoreResult<()> {
        let mut branches = self.branches.write().map_err(poisoned)?;
        let branch = branches
            .get_mut(&id)
            .filter(|b| b.is_active)
            .ok_or(StoreError::NotFound { branch: id })?;

        branch.is_merged = true;
        branch.merged_date = Some(Utc::now());
        branch.merged_by = Some(merged_by.to_string());
        debug!(branch = %id, by = merged_by, "branch marked merged");
        Ok(())
    }
}

/// An in-memory implementation of [`DocumentStore`].
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<PostId, Document>>,
}

impl InMemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a document. Stands in for the publishing
    /// subsystem's own writes.
    pub fn put(&self, document: Document) -> StoreResult<()> {
        let mut documents = self.documents.write().map_err(poisoned)?;
        documents.insert(document.post_id, document);
        Ok(())
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn get(&self, post: PostId) -> StoreResult<Document> {
        let documents = self.documents.read().map_err(poisoned)?;
        documents
            .get(&post)
            .cloned()
            .ok_or(StoreError::DocumentNotFound { post })
    }

    fn set_snapshot(
        &self,
        post: PostId,
        snapshot: Snapshot,
        expected_modified_at: DateTime<Utc>,
    ) -> StoreResult<Document> {
        let mut documents = self.documents.write().map_err(poisoned)?;
        let document = documents
            .get_mut(&post)
            .ok_or(StoreError::DocumentNotFound { post })?;

        if document.modified_at != expected_modified_at {
            return Err(StoreError::Conflict {
                reference: format!("{post}"),
            });
        }

        document.snapshot = snapshot;
        document.modified_at = Utc::now();
        debug!(%post, "document snapshot replaced");
        Ok(document.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkline_types::{BranchKind, ContentStatus, SnapshotPatch};

    fn base_snapshot() -> Snapshot {
        Snapshot {
            title: "Post".into(),
            content: "body".into(),
            excerpt: "ex".into(),
            tags: vec!["t".into()],
            status: ContentStatus::Draft,
        }
    }

    fn new_branch(post: u64, name: &str) -> NewBranch {
        NewBranch {
            post_id: PostId(post),
            name: name.into(),
            kind: BranchKind::Feature,
            parent: None,
            base: base_snapshot(),
            overrides: None,
            created_by: "editor@example.com".into(),
        }
    }

    #[test]
    fn create_fixes_base_and_applies_overrides() {
        let store = InMemoryBranchStore::new();
        let mut req = new_branch(1, "feature/x");
        req.overrides = Some(SnapshotPatch {
            title: Some("Branched title".into()),
            ..SnapshotPatch::default()
        });

        let branch = store.create(req).unwrap();
        assert_eq!(branch.base_snapshot, base_snapshot());
        assert_eq!(branch.working_snapshot.title, "Branched title");
        assert_eq!(branch.working_snapshot.content, "body");
        assert!(branch.is_active);
        assert!(!branch.is_merged);
        assert!(branch.modified_date.is_none());
    }

    #[test]
    fn duplicate_active_name_is_rejected() {
        let store = InMemoryBranchStore::new();
        store.create(new_branch(1, "feature/x")).unwrap();
        let err = store.create(new_branch(1, "feature/x")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName { .. }));

        // Same name on a different post is fine.
        store.create(new_branch(2, "feature/x")).unwrap();
    }

    #[test]
    fn deleted_branch_frees_its_name() {
        let store = InMemoryBranchStore::new();
        let branch = store.create(new_branch(1, "feature/x")).unwrap();
        store.soft_delete(branch.branch_id).unwrap();
        // Name is reusable; the old id stays resolvable for history.
        let again = store.create(new_branch(1, "feature/x")).unwrap();
        assert_ne!(branch.branch_id, again.branch_id);
        let old = store.get(branch.branch_id, false).unwrap();
        assert!(!old.is_active);
    }

    #[test]
    fn get_active_only_hides_deleted() {
        let store = InMemoryBranchStore::new();
        let branch = store.create(new_branch(1, "feature/x")).unwrap();
        store.soft_delete(branch.branch_id).unwrap();

        let err = store.get(branch.branch_id, true).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert!(store.get(branch.branch_id, false).is_ok());
    }

    #[test]
    fn list_active_orders_by_creation() {
        let store = InMemoryBranchStore::new();
        let a = store.create(new_branch(1, "a")).unwrap();
        let b = store.create(new_branch(1, "b")).unwrap();
        let c = store.create(new_branch(1, "c")).unwrap();
        store.soft_delete(b.branch_id).unwrap();
        store.create(new_branch(2, "other-post")).unwrap();

        let listed = store.list_active(PostId(1)).unwrap();
        let ids: Vec<BranchId> = listed.iter().map(|b| b.branch_id).collect();
        assert_eq!(ids, vec![a.branch_id, c.branch_id]);
    }

    #[test]
    fn update_swaps_on_modified_date() {
        let store = InMemoryBranchStore::new();
        let branch = store.create(new_branch(1, "feature/x")).unwrap();

        let mut edited = branch.working_snapshot.clone();
        edited.title = "v2".into();
        let updated = store
            .update(branch.branch_id, None, edited.clone(), "alice@example.com")
            .unwrap();
        assert_eq!(updated.working_snapshot.title, "v2");
        assert!(updated.modified_date.is_some());
        assert_eq!(updated.modified_by.as_deref(), Some("alice@example.com"));

        // A second writer holding the stale (None) token loses.
        let err = store
            .update(branch.branch_id, None, edited, "bob@example.com")
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));

        // The winner's token keeps working.
        let mut edited2 = updated.working_snapshot.clone();
        edited2.title = "v3".into();
        store
            .update(branch.branch_id, updated.modified_date, edited2, "alice@example.com")
            .unwrap();
    }

    #[test]
    fn merged_branch_rejects_updates() {
        let store = InMemoryBranchStore::new();
        let branch = store.create(new_branch(1, "feature/x")).unwrap();
        store.mark_merged(branch.branch_id, "alice@example.com").unwrap();

        let err = store
            .update(branch.branch_id, None, base_snapshot(), "alice@example.com")
            .unwrap_err();
        assert!(matches!(err, StoreError::Immutable { .. }));

        // Merged is not deleted: the branch is still active and visible.
        let merged = store.get(branch.branch_id, true).unwrap();
        assert!(merged.is_active);
        assert!(merged.is_merged);
        assert!(merged.merged_date.is_some());
    }

    #[test]
    fn retain_policy_protects_merged_branches() {
        let store = InMemoryBranchStore::with_policy(DeletePolicy::RetainMerged);
        let branch = store.create(new_branch(1, "feature/x")).unwrap();
        store.mark_merged(branch.branch_id, "alice@example.com").unwrap();

        let err = store.soft_delete(branch.branch_id).unwrap_err();
        assert!(matches!(err, StoreError::Protected { .. }));
    }

    #[test]
    fn default_policy_allows_deleting_merged_branches() {
        let store = InMemoryBranchStore::new();
        let branch = store.create(new_branch(1, "feature/x")).unwrap();
        store.mark_merged(branch.branch_id, "alice@example.com").unwrap();
        store.soft_delete(branch.branch_id).unwrap();

        let gone = store.get(branch.branch_id, false).unwrap();
        assert!(!gone.is_active);
        assert!(gone.is_merged);
    }

    #[test]
    fn document_store_cas() {
        let store = InMemoryDocumentStore::new();
        let doc = Document {
            post_id: PostId(1),
            snapshot: base_snapshot(),
            author: "author@example.com".into(),
            published_at: None,
            modified_at: Utc::now(),
        };
        store.put(doc.clone()).unwrap();

        let mut snapshot = base_snapshot();
        snapshot.title = "merged".into();
        let updated = store
            .set_snapshot(PostId(1), snapshot.clone(), doc.modified_at)
            .unwrap();
        assert_eq!(updated.snapshot.title, "merged");

        // Stale token loses.
        let err = store
            .set_snapshot(PostId(1), snapshot, doc.modified_at)
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
    }

    #[test]
    fn missing_document_reads_as_not_found() {
        let store = InMemoryDocumentStore::new();
        let err = store.get(PostId(404)).unwrap_err();
        assert!(matches!(err, StoreError::DocumentNotFound { .. }));
    }
}
