//! The canonical published document, as seen by the branching engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::PostId;
use crate::snapshot::Snapshot;

/// The canonical published content unit.
///
/// Owned by the publishing subsystem; the branching engine treats it as the
/// implicit main branch: always present, never deletable, never a branch
/// record. `modified_at` carries the same optimistic-concurrency role as a
/// branch's `modified_date`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub post_id: PostId,
    /// The current published snapshot (main's content).
    pub snapshot: Snapshot,
    pub author: String,
    pub published_at: Option<DateTime<Utc>>,
    /// Compare-and-swap token for writes targeting main.
    pub modified_at: DateTime<Utc>,
}
