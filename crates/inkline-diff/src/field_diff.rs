//! Field-by-field snapshot comparison, two-way and three-way.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use inkline_types::{Field, FieldValue, Snapshot};

/// How a field changed between two snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Empty on the `from` side, populated on the `to` side.
    Added,
    /// Populated on both sides with different values.
    Modified,
    /// Populated on the `from` side, empty on the `to` side.
    Removed,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Modified => "modified",
            ChangeKind::Removed => "removed",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field's difference between two snapshots.
///
/// Values are reported whole: tags carry both full lists in a single entry,
/// and content carries both full bodies even though comparison is
/// line-oriented (line-level rendering is the caller's concern).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub field: Field,
    pub change: ChangeKind,
    /// In a three-way conflict this is the target's current value; otherwise
    /// the `from`/base-side value.
    pub original: FieldValue,
    /// In a three-way conflict this is the source's divergent value;
    /// otherwise the `to`-side value.
    pub new: FieldValue,
    /// `true` only for three-way entries where both sides diverged from the
    /// base to different values. Always `false` for two-way diffs.
    pub conflicted: bool,
}

/// Field equality as the diff engine sees it: tags compare as sets, content
/// compares line-by-line, everything else compares atomically.
fn fields_equal(field: Field, a: &Snapshot, b: &Snapshot) -> bool {
    match field {
        Field::Title => a.title == b.title,
        Field::Excerpt => a.excerpt == b.excerpt,
        Field::Status => a.status == b.status,
        Field::Tags => {
            let a: BTreeSet<&str> = a.tags.iter().map(String::as_str).collect();
            let b: BTreeSet<&str> = b.tags.iter().map(String::as_str).collect();
            a == b
        }
        Field::Content => {
            a.content.lines().eq(b.content.lines())
        }
    }
}

/// Classify an empty/populated transition. Tags and status differences are
/// always reported as `Modified` (tags as one whole-field entry, status
/// because an enum is never empty).
fn classify_change(field: Field, from: &FieldValue, to: &FieldValue) -> ChangeKind {
    match field {
        Field::Tags | Field::Status => ChangeKind::Modified,
        _ => {
            if from.is_empty() && !to.is_empty() {
                ChangeKind::Added
            } else if !from.is_empty() && to.is_empty() {
                ChangeKind::Removed
            } else {
                ChangeKind::Modified
            }
        }
    }
}

/// Compare two snapshots field-by-field.
///
/// Unchanged fields are omitted; `conflicted` is always `false` (conflict is
/// a three-way concept).
pub fn diff_two_way(from: &Snapshot, to: &Snapshot) -> Vec<DiffEntry> {
    let mut diffs = Vec::new();
    for field in Field::ALL {
        if fields_equal(field, from, to) {
            continue;
        }
        let original = from.field(field);
        let new = to.field(field);
        diffs.push(DiffEntry {
            field,
            change: classify_change(field, &original, &new),
            original,
            new,
            conflicted: false,
        });
    }
    diffs
}

/// Compare source and target snapshots against their common ancestor.
///
/// Per field:
/// - unchanged on both sides → omitted
/// - changed only in source → one entry to apply, `conflicted = false`
/// - changed only in target → omitted (target already holds the intent)
/// - changed on both sides to the same value → omitted
/// - changed on both sides to different values → one entry with
///   `conflicted = true`, `original` = target's value, `new` = source's value
pub fn diff_three_way(base: &Snapshot, source: &Snapshot, target: &Snapshot) -> Vec<DiffEntry> {
    let mut diffs = Vec::new();
    for field in Field::ALL {
        let source_changed = !fields_equal(field, base, source);
        let target_changed = !fields_equal(field, base, target);

        match (source_changed, target_changed) {
            (false, _) => {
                // Nothing to apply from source; either untouched everywhere
                // or target already carries its own intended value.
            }
            (true, false) => {
                let original = base.field(field);
                let new = source.field(field);
                diffs.push(DiffEntry {
                    field,
                    change: classify_change(field, &original, &new),
                    original,
                    new,
                    conflicted: false,
                });
            }
            (true, true) => {
                if fields_equal(field, source, target) {
                    // Both sides converged on the same value.
                    continue;
                }
                diffs.push(DiffEntry {
                    field,
                    change: ChangeKind::Modified,
                    original: target.field(field),
                    new: source.field(field),
                    conflicted: true,
                });
            }
        }
    }
    diffs
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkline_types::ContentStatus;

    fn snap(title: &str, content: &str, excerpt: &str, tags: &[&str], status: ContentStatus) -> Snapshot {
        Snapshot {
            title: title.into(),
            content: content.into(),
            excerpt: excerpt.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            status,
        }
    }

    fn base() -> Snapshot {
        snap(
            "A title",
            "first line\nsecond line",
            "an excerpt",
            &["x"],
            ContentStatus::Draft,
        )
    }

    #[test]
    fn identical_snapshots_diff_empty() {
        let s = base();
        assert!(diff_two_way(&s, &s).is_empty());
    }

    #[test]
    fn title_added_from_empty() {
        let mut from = base();
        from.title.clear();
        let to = base();
        let diffs = diff_two_way(&from, &to);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].field, Field::Title);
        assert_eq!(diffs[0].change, ChangeKind::Added);
        assert!(!diffs[0].conflicted);
    }

    #[test]
    fn excerpt_removed_to_empty() {
        let from = base();
        let mut to = base();
        to.excerpt.clear();
        let diffs = diff_two_way(&from, &to);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].field, Field::Excerpt);
        assert_eq!(diffs[0].change, ChangeKind::Removed);
    }

    #[test]
    fn tags_compared_as_sets_and_reported_whole() {
        let from = snap("t", "", "", &["a", "b"], ContentStatus::Draft);
        // Same set, different order: no diff.
        let reordered = snap("t", "", "", &["b", "a"], ContentStatus::Draft);
        assert!(diff_two_way(&from, &reordered).is_empty());

        // Different set: exactly one whole-field entry.
        let to = snap("t", "", "", &["a", "c"], ContentStatus::Draft);
        let diffs = diff_two_way(&from, &to);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].field, Field::Tags);
        assert_eq!(diffs[0].change, ChangeKind::Modified);
        assert_eq!(diffs[0].original, FieldValue::Tags(vec!["a".into(), "b".into()]));
        assert_eq!(diffs[0].new, FieldValue::Tags(vec!["a".into(), "c".into()]));
    }

    #[test]
    fn content_line_change_emits_single_entry_with_full_values() {
        let from = base();
        let mut to = base();
        to.content = "first line\nsecond line edited".into();
        let diffs = diff_two_way(&from, &to);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].field, Field::Content);
        assert_eq!(diffs[0].original, FieldValue::Text(from.content.clone()));
        assert_eq!(diffs[0].new, FieldValue::Text(to.content.clone()));
    }

    #[test]
    fn trailing_newline_is_not_a_content_change() {
        let from = base();
        let mut to = base();
        to.content.push('\n');
        assert!(diff_two_way(&from, &to).is_empty());
    }

    #[test]
    fn status_change_is_modified() {
        let from = base();
        let mut to = base();
        to.status = ContentStatus::Published;
        let diffs = diff_two_way(&from, &to);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].field, Field::Status);
        assert_eq!(diffs[0].change, ChangeKind::Modified);
    }

    #[test]
    fn three_way_identity() {
        let b = base();
        assert!(diff_three_way(&b, &b, &b).is_empty());
    }

    #[test]
    fn three_way_source_only_change_is_applied() {
        let b = base();
        let mut source = base();
        source.title = "B".into();
        let diffs = diff_three_way(&b, &source, &b);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].field, Field::Title);
        assert!(!diffs[0].conflicted);
        assert_eq!(diffs[0].new, FieldValue::Text("B".into()));
    }

    #[test]
    fn three_way_target_only_change_is_omitted() {
        let b = base();
        let mut target = base();
        target.title = "C".into();
        assert!(diff_three_way(&b, &b, &target).is_empty());
    }

    #[test]
    fn three_way_same_change_on_both_sides_is_omitted() {
        let b = base();
        let mut source = base();
        source.title = "B".into();
        let target = source.clone();
        assert!(diff_three_way(&b, &source, &target).is_empty());
    }

    #[test]
    fn three_way_divergent_change_conflicts() {
        let mut b = base();
        b.title = "A".into();
        let mut source = b.clone();
        source.title = "B".into();
        let mut target = b.clone();
        target.title = "C".into();

        let diffs = diff_three_way(&b, &source, &target);
        assert_eq!(diffs.len(), 1);
        let entry = &diffs[0];
        assert_eq!(entry.field, Field::Title);
        assert!(entry.conflicted);
        assert_eq!(entry.original, FieldValue::Text("C".into()));
        assert_eq!(entry.new, FieldValue::Text("B".into()));
    }

    #[test]
    fn three_way_mixed_fields() {
        let b = base();
        let mut source = base();
        source.excerpt = "rewritten".into();
        source.tags = vec!["x".into(), "y".into()];
        let mut target = base();
        target.excerpt = "different rewrite".into();
        target.status = ContentStatus::Published;

        let diffs = diff_three_way(&b, &source, &target);
        // excerpt conflicts; tags apply cleanly; status changed only in target.
        assert_eq!(diffs.len(), 2);
        let excerpt = diffs.iter().find(|d| d.field == Field::Excerpt).unwrap();
        assert!(excerpt.conflicted);
        let tags = diffs.iter().find(|d| d.field == Field::Tags).unwrap();
        assert!(!tags.conflicted);
    }

    proptest::proptest! {
        #[test]
        fn two_way_self_diff_is_always_empty(
            title in ".{0,24}",
            content in "(?s).{0,128}",
            tags in proptest::collection::vec("[a-z]{1,8}", 0..5),
        ) {
            let s = Snapshot {
                title,
                content,
                excerpt: String::new(),
                tags,
                status: ContentStatus::Draft,
            };
            proptest::prop_assert!(diff_two_way(&s, &s).is_empty());
            proptest::prop_assert!(diff_three_way(&s, &s, &s).is_empty());
        }
    }
}
