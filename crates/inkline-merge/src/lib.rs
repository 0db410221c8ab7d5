//! Merge engine for Inkline.
//!
//! Implements three-way merge over content snapshots with conflict
//! detection, automatic and heuristic resolution strategies, and explicit
//! manual resolution.
//!
//! The engine is pure: it computes a new target snapshot (or a conflict
//! report) and never writes to a store. A merge attempt is a small state
//! machine, `Computing → { Applied | ConflictsPending | Failed }`, where
//! `Failed` is a normal result variant — conflicting edits are an expected
//! outcome, not a fault.

pub mod error;
pub mod merge;

pub use error::{MergeError, MergeResult};
pub use merge::{apply_resolutions, merge, MergeOutcome, MergeStrategy};
