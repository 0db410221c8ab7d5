//! Change analysis over a diff: impact scoring, field classification, and
//! human-readable summaries.

use inkline_types::{Field, FieldValue};

use crate::field_diff::DiffEntry;

const TITLE_WEIGHT: u32 = 25;
const STATUS_WEIGHT: u32 = 10;
const TAGS_WEIGHT: u32 = 10;
const EXCERPT_WEIGHT: u32 = 10;
const CONTENT_WEIGHT_MAX: u32 = 45;
const SCORE_CAP: u32 = 100;

/// Deterministic 0–100 estimate of how much a change set alters a document.
///
/// Weighted sum: title 25, status 10, tags 10, excerpt 10, content up to 45
/// scaled by the proportion of changed characters relative to the longer of
/// the two content values. This is a character-count ratio, not a true edit
/// distance: cheap, deterministic, and monotone in the number of changed
/// fields.
pub fn impact_score(diffs: &[DiffEntry]) -> u8 {
    let mut score: u32 = 0;
    for entry in diffs {
        score += match entry.field {
            Field::Title => TITLE_WEIGHT,
            Field::Status => STATUS_WEIGHT,
            Field::Tags => TAGS_WEIGHT,
            Field::Excerpt => EXCERPT_WEIGHT,
            Field::Content => content_weight(&entry.original, &entry.new),
        };
    }
    score.min(SCORE_CAP) as u8
}

/// Scale the content weight by how much of the longer value changed.
fn content_weight(original: &FieldValue, new: &FieldValue) -> u32 {
    let (FieldValue::Text(a), FieldValue::Text(b)) = (original, new) else {
        // Content entries always carry text; anything else scores as a full
        // rewrite.
        return CONTENT_WEIGHT_MAX;
    };
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let longer = a.len().max(b.len());
    if longer == 0 {
        return 0;
    }
    // Positionally differing characters plus the length delta. Not an edit
    // distance, but stable and cheap.
    let shared_changed = a.iter().zip(b.iter()).filter(|(x, y)| x != y).count();
    let changed = shared_changed + a.len().abs_diff(b.len());
    let ratio = changed as f64 / longer as f64;
    // A content entry always represents a real change; never score it zero.
    ((CONTENT_WEIGHT_MAX as f64 * ratio).ceil() as u32).clamp(1, CONTENT_WEIGHT_MAX)
}

/// The distinct fields present in a diff, in canonical field order.
pub fn classify(diffs: &[DiffEntry]) -> Vec<Field> {
    Field::ALL
        .into_iter()
        .filter(|field| diffs.iter().any(|d| d.field == *field))
        .collect()
}

/// One-line human-readable summary of a change set.
pub fn summarize(diffs: &[DiffEntry]) -> String {
    if diffs.is_empty() {
        return "no changes".to_string();
    }
    let fields = classify(diffs);
    let names: Vec<&str> = fields.iter().map(Field::as_str).collect();
    let conflicts = diffs.iter().filter(|d| d.conflicted).count();
    if conflicts > 0 {
        format!(
            "{} change(s) across {} ({} conflicted)",
            diffs.len(),
            names.join(", "),
            conflicts
        )
    } else {
        format!("{} change(s) across {}", diffs.len(), names.join(", "))
    }
}
