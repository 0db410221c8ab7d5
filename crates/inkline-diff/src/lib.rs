//! Diff engine for Inkline.
//!
//! Computes field-by-field differences between content snapshots, either
//! two-way (from/to) or three-way against a common ancestor, and derives a
//! deterministic 0–100 change-impact score.
//!
//! Everything in this crate is a pure function of its inputs: no I/O, no
//! mutable state.
//!
//! # Key Types
//!
//! - [`DiffEntry`] / [`ChangeKind`] — One field's difference
//! - [`diff_two_way`] / [`diff_three_way`] — Snapshot comparison
//! - [`impact_score`] / [`classify`] / [`summarize`] — Change analysis

pub mod field_diff;
pub mod impact;

pub use field_diff::{diff_three_way, diff_two_way, ChangeKind, DiffEntry};
pub use impact::{classify, impact_score, summarize};
