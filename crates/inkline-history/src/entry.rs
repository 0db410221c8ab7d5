//! Audit entry types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use inkline_types::{BranchId, PostId};

/// The kind of mutating operation an entry records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Create,
    Edit,
    Merge,
    Delete,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Create => "create",
            ChangeType::Edit => "edit",
            ChangeType::Merge => "merge",
            ChangeType::Delete => "delete",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable audit record.
///
/// `branch` may reference a branch that has since been soft-deleted; branch
/// ids are never reused, so the reference stays valid forever.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub post_id: PostId,
    pub branch: Option<BranchId>,
    pub change: ChangeType,
    pub changed_by: String,
    pub changed_at: DateTime<Utc>,
    pub description: String,
    /// Joined field names for edits; unset for other change types.
    pub field_name: Option<String>,
}

impl HistoryEntry {
    /// Build an entry stamped with a fresh id and the current time.
    pub fn now(
        post_id: PostId,
        branch: Option<BranchId>,
        change: ChangeType,
        changed_by: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            post_id,
            branch,
            change,
            changed_by: changed_by.into(),
            changed_at: Utc::now(),
            description: description.into(),
            field_name: None,
        }
    }

    /// Attach the changed-field annotation.
    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }
}
