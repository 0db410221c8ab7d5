//! Content snapshots: the immutable unit of versioned editorial state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::field::{Field, FieldValue};

/// Publication status of a content snapshot.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    #[default]
    Draft,
    Published,
    Archived,
    Scheduled,
}

impl ContentStatus {
    /// The status's wire/display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Published => "published",
            ContentStatus::Archived => "archived",
            ContentStatus::Scheduled => "scheduled",
        }
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable value holding the five versioned fields of a content document
/// at one point in time.
///
/// Snapshots are compared field-by-field and never mutated in place: every
/// edit produces a new snapshot via [`Snapshot::apply`], and merge produces a
/// new snapshot from a three-way comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub title: String,
    /// Markup body, compared line-by-line by the diff engine.
    pub content: String,
    pub excerpt: String,
    /// Ordered tag list; equality for diff purposes is set-based.
    pub tags: Vec<String>,
    pub status: ContentStatus,
}

impl Snapshot {
    /// Read one field as a typed [`FieldValue`].
    pub fn field(&self, field: Field) -> FieldValue {
        match field {
            Field::Title => FieldValue::Text(self.title.clone()),
            Field::Content => FieldValue::Text(self.content.clone()),
            Field::Excerpt => FieldValue::Text(self.excerpt.clone()),
            Field::Tags => FieldValue::Tags(self.tags.clone()),
            Field::Status => FieldValue::Status(self.status),
        }
    }

    /// Write one field from a typed value, producing a new snapshot.
    ///
    /// Fails with [`TypeError::FieldTypeMismatch`] if the value's shape does
    /// not fit the field. Values read via [`Snapshot::field`] always fit.
    pub fn with_field(&self, field: Field, value: FieldValue) -> Result<Snapshot, TypeError> {
        let mut next = self.clone();
        match (field, value) {
            (Field::Title, FieldValue::Text(s)) => next.title = s,
            (Field::Content, FieldValue::Text(s)) => next.content = s,
            (Field::Excerpt, FieldValue::Text(s)) => next.excerpt = s,
            (Field::Tags, FieldValue::Tags(tags)) => next.tags = tags,
            (Field::Status, FieldValue::Status(status)) => next.status = status,
            (field, _) => return Err(TypeError::FieldTypeMismatch { field }),
        }
        Ok(next)
    }

    /// Produce a new snapshot with the patch's populated fields applied.
    pub fn apply(&self, patch: &SnapshotPatch) -> Snapshot {
        Snapshot {
            title: patch.title.clone().unwrap_or_else(|| self.title.clone()),
            content: patch.content.clone().unwrap_or_else(|| self.content.clone()),
            excerpt: patch.excerpt.clone().unwrap_or_else(|| self.excerpt.clone()),
            tags: patch.tags.clone().unwrap_or_else(|| self.tags.clone()),
            status: patch.status.unwrap_or(self.status),
        }
    }
}

/// Partial per-field overrides.
///
/// Used both for the initial changes applied when a branch is forked and for
/// the field changes of a branch edit. Unset fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ContentStatus>,
}

impl SnapshotPatch {
    /// Returns `true` if no field is populated.
    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }

    /// The fields this patch would touch, in canonical order.
    pub fn changed_fields(&self) -> Vec<Field> {
        let mut fields = Vec::new();
        if self.title.is_some() {
            fields.push(Field::Title);
        }
        if self.content.is_some() {
            fields.push(Field::Content);
        }
        if self.excerpt.is_some() {
            fields.push(Field::Excerpt);
        }
        if self.tags.is_some() {
            fields.push(Field::Tags);
        }
        if self.status.is_some() {
            fields.push(Field::Status);
        }
        fields
    }
}
