//! Typed field identity and values for the five versioned content fields.
//!
//! Diff and merge operate field-by-field. [`Field`] names a slot of a
//! [`Snapshot`](crate::Snapshot) and [`FieldValue`] carries one slot's value
//! without losing its type (tags stay a list, status stays an enum).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::snapshot::ContentStatus;

/// One of the five versioned fields of a content snapshot.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Content,
    Excerpt,
    Tags,
    Status,
}

impl Field {
    /// All fields in canonical order (the order diffs are reported in).
    pub const ALL: [Field; 5] = [
        Field::Title,
        Field::Content,
        Field::Excerpt,
        Field::Tags,
        Field::Status,
    ];

    /// The field's wire/display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Content => "content",
            Field::Excerpt => "excerpt",
            Field::Tags => "tags",
            Field::Status => "status",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value of a single snapshot field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldValue {
    /// Title, content, or excerpt text.
    Text(String),
    /// The full ordered tag list.
    Tags(Vec<String>),
    /// Publication status.
    Status(ContentStatus),
}

impl FieldValue {
    /// Returns `true` for empty text or an empty tag list. A status is never
    /// considered empty.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Tags(tags) => tags.is_empty(),
            FieldValue::Status(_) => false,
        }
    }

    /// Character count used for size-based comparisons (tags count their
    /// joined length, a status counts its display name).
    pub fn char_len(&self) -> usize {
        match self {
            FieldValue::Text(s) => s.chars().count(),
            FieldValue::Tags(tags) => {
                tags.iter().map(|t| t.chars().count()).sum::<usize>()
                    + tags.len().saturating_sub(1)
            }
            FieldValue::Status(s) => s.as_str().len(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Tags(tags) => f.write_str(&tags.join(",")),
            FieldValue::Status(s) => f.write_str(s.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_display_names() {
        assert_eq!(Field::Title.to_string(), "title");
        assert_eq!(Field::Tags.to_string(), "tags");
        assert_eq!(Field::ALL.len(), 5);
    }

    #[test]
    fn emptiness() {
        assert!(FieldValue::Text(String::new()).is_empty());
        assert!(!FieldValue::Text("x".into()).is_empty());
        assert!(FieldValue::Tags(vec![]).is_empty());
        assert!(!FieldValue::Status(ContentStatus::Draft).is_empty());
    }

    #[test]
    fn char_len_counts_characters_not_bytes() {
        assert_eq!(FieldValue::Text("héllo".into()).char_len(), 5);
    }

    #[test]
    fn tags_len_includes_separators() {
        let v = FieldValue::Tags(vec!["ab".into(), "cd".into()]);
        // "ab,cd"
        assert_eq!(v.char_len(), 5);
    }
}
