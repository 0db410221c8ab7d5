//! Foundation types for Inkline, the content branching & merge engine.
//!
//! This crate provides the value types shared by every other Inkline crate:
//! document snapshots, branch records, field identities, and identifiers.
//!
//! # Key Types
//!
//! - [`Snapshot`] — Immutable value holding the five versioned content fields
//! - [`SnapshotPatch`] — Partial field overrides applied to produce a new snapshot
//! - [`Branch`] — A named line of divergent editing over one document
//! - [`BranchRef`] — Either the virtual `main` branch or a concrete [`BranchId`]
//! - [`Field`] / [`FieldValue`] — Typed field identity and value, used by diff and merge
//! - [`Document`] — The canonical published content unit (the implicit main branch)

pub mod branch;
pub mod document;
pub mod error;
pub mod field;
pub mod ids;
pub mod snapshot;

pub use branch::{Branch, BranchKind};
pub use document::Document;
pub use error::TypeError;
pub use field::{Field, FieldValue};
pub use ids::{BranchId, BranchRef, PostId};
pub use snapshot::{ContentStatus, Snapshot, SnapshotPatch};
