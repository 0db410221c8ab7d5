//! In-memory history log for tests and ephemeral use.

use std::sync::RwLock;

use tracing::debug;

use inkline_types::PostId;

use crate::entry::HistoryEntry;
use crate::error::{HistoryError, HistoryResult};
use crate::traits::HistoryLog;

/// An in-memory implementation of [`HistoryLog`].
///
/// Entries live in a `Vec` behind a `RwLock`, in insertion order. The type
/// exposes no way to modify or remove an appended entry.
#[derive(Debug, Default)]
pub struct InMemoryHistoryLog {
    entries: RwLock<Vec<HistoryEntry>>,
}

impl InMemoryHistoryLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total entry count across all documents.
    pub fn len(&self) -> HistoryResult<usize> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.len())
    }

    /// Returns `true` if no entries have been appended.
    pub fn is_empty(&self) -> HistoryResult<bool> {
        Ok(self.len()? == 0)
    }
}

fn poisoned(e: impl std::fmt::Display) -> HistoryError {
    HistoryError::Unavailable(format!("lock poisoned: {e}"))
}

impl HistoryLog for InMemoryHistoryLog {
    fn append(&self, entry: HistoryEntry) -> HistoryResult<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        debug!(post = %entry.post_id, change = %entry.change, "history append");
        entries.push(entry);
        Ok(())
    }

    fn for_post(&self, post: PostId) -> HistoryResult<Vec<HistoryEntry>> {
        let entries = self.entries.read().map_err(poisoned)?;
        let mut matched: Vec<HistoryEntry> = entries
            .iter()
            .filter(|e| e.post_id == post)
            .cloned()
            .collect();
        // Stable sort keeps insertion order for same-timestamp entries.
        matched.sort_by_key(|e| e.changed_at);
        Ok(matched)
    }
}
