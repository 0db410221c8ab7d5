//! Version controller for Inkline, the content branching & merge engine.
//!
//! [`VersionController`] is the façade other subsystems call. It sequences
//! branch storage, diffing, merging, and history logging per document:
//! every mutating call performs its durable write first and then appends
//! exactly one audit entry; reads are not audited.
//!
//! # Example
//!
//! ```
//! use inkline_engine::{CreateBranchRequest, VersionController};
//! use inkline_history::InMemoryHistoryLog;
//! use inkline_store::{InMemoryBranchStore, InMemoryDocumentStore};
//! use inkline_types::{BranchKind, Document, PostId, Snapshot};
//! use chrono::Utc;
//!
//! let documents = InMemoryDocumentStore::new();
//! documents.put(Document {
//!     post_id: PostId(1),
//!     snapshot: Snapshot::default(),
//!     author: "author@example.com".into(),
//!     published_at: None,
//!     modified_at: Utc::now(),
//! }).unwrap();
//!
//! let controller = VersionController::new(
//!     InMemoryBranchStore::new(),
//!     documents,
//!     InMemoryHistoryLog::new(),
//! );
//! let branch = controller
//!     .create_branch(
//!         CreateBranchRequest {
//!             post_id: PostId(1),
//!             name: "feature/rewrite".into(),
//!             kind: BranchKind::Feature,
//!             parent: None,
//!             overrides: None,
//!         },
//!         "editor@example.com",
//!     )
//!     .unwrap();
//! assert!(branch.is_editable());
//! ```

pub mod controller;
pub mod error;
pub mod report;

pub use controller::{CreateBranchRequest, VersionController};
pub use error::{EngineError, EngineResult};
pub use report::{DiffReport, MergeResult};
