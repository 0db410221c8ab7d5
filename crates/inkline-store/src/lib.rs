//! Branch and document storage for Inkline.
//!
//! This crate owns the durable representation of a document's branch set and
//! enforces the identity and lifecycle invariants: active-name uniqueness,
//! soft deletion, merged-branch immutability, and optimistic-concurrency
//! writes. It contains no diff or merge logic.
//!
//! # Architecture
//!
//! - [`BranchStore`] is the storage trait for branch records. Any backend
//!   (in-memory, database, keyed record store) implements it. The one
//!   mutual-exclusion mechanism is the compare-and-swap on `modified_date`
//!   in [`BranchStore::update`] — there is no locking across branches.
//! - [`DocumentStore`] is the publishing-subsystem contract for the virtual
//!   main branch: read the current snapshot, and replace it with the same
//!   compare-and-swap semantics.
//! - [`DeletePolicy`] decides whether merged branches may be soft-deleted
//!   (the default) or are retained until the heat death of the audit trail.
//!
//! # Modules
//!
//! - [`error`] — Error taxonomy for lifecycle and concurrency violations
//! - [`traits`] — The [`BranchStore`] and [`DocumentStore`] traits
//! - [`memory`] — In-memory implementations for tests and embedding

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::{InMemoryBranchStore, InMemoryDocumentStore};
pub use traits::{BranchStore, DeletePolicy, DocumentStore, NewBranch};
