//! The [`HistoryLog`] trait defining the audit storage interface.

use inkline_types::PostId;

use crate::entry::HistoryEntry;
use crate::error::HistoryResult;

/// Append-only audit storage.
///
/// Implementations must be thread-safe (`Send + Sync`). There is
/// deliberately no update or delete operation: once appended, an entry is
/// immutable.
pub trait HistoryLog: Send + Sync {
    /// Append one entry. Fails only on storage unavailability.
    fn append(&self, entry: HistoryEntry) -> HistoryResult<()>;

    /// All entries for a document, ordered by `changed_at` ascending with
    /// ties broken by insertion order.
    fn for_post(&self, post: PostId) -> HistoryResult<Vec<HistoryEntry>>;
}
