//! Append-only audit history for Inkline.
//!
//! Every mutating operation against a document's branch set produces exactly
//! one [`HistoryEntry`]. Entries are never updated or deleted — the log is
//! the sole owner of irreversible audit state, and no such operations exist
//! on the [`HistoryLog`] trait by design.
//!
//! # Modules
//!
//! - [`entry`] — [`HistoryEntry`] and [`ChangeType`]
//! - [`traits`] — The [`HistoryLog`] trait
//! - [`memory`] — In-memory [`InMemoryHistoryLog`] for tests
//! - [`error`] — Error types

pub mod entry;
pub mod error;
pub mod memory;
pub mod traits;

pub use entry::{ChangeType, HistoryEntry};
pub use error::{HistoryError, HistoryResult};
pub use memory::InMemoryHistoryLog;
pub use traits::HistoryLog;
