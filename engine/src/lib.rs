//! # Canvass Engine
//!
//! The ordering and version-diff core for Canvass questionnaires.
//!
//! This crate provides the deterministic logic shared by every part of the
//! platform that orders sibling records or compares study versions: project
//! reordering, module-question reordering, questionnaire-line sequencing, and
//! version comparison. It computes canonical orderings, snapshot-vs-live
//! diffs, and audit-ready change logs with guaranteed determinism - the same
//! inputs always produce the same outputs.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine has no knowledge of storage, network, or host
//! - **Deterministic**: same inputs always produce same outputs
//! - **Testable**: pure logic, no mocks needed
//! - **Storage-agnostic**: changes come back as value objects, never as
//!   in-place mutation
//!
//! ## Core Concepts
//!
//! ### Sequencing
//!
//! Sibling items under one parent carry a persisted sort key. The key is not
//! assumed unique: inserts and imports routinely leave collisions behind.
//! [`compute_order`] sorts by `(sort_key, created_at, label)`, assigns dense
//! keys `1..=N`, and returns a [`SequencePlan`] holding the canonical id
//! order plus the minimal set of [`SortKeyUpdate`]s needed to realize it.
//!
//! ### Diffing
//!
//! A [`Snapshot`] freezes a parent's child records at a point in time. Given
//! a baseline and a current set of [`VersionedRecord`]s, [`compute_diff`]
//! partitions the ids into added/removed/common and compares the configured
//! tracked fields, producing a [`DiffResult`].
//!
//! ### Change logs
//!
//! [`build_change_log`] flattens a [`DiffResult`] into [`ChangeRecord`]s in a
//! fixed order, so audit trails and snapshot-based tests reproduce exactly.
//!
//! ## Quick Start
//!
//! ```rust
//! use canvass_engine::{compute_order, SequenceItem};
//!
//! // Three questions whose sort keys have drifted apart.
//! let items = vec![
//!     SequenceItem::new("q_income", 7, 1_706_745_900_000, "Income"),
//!     SequenceItem::new("q_intro", 2, 1_706_745_600_000, "Intro"),
//!     SequenceItem::new("q_age", 4, 1_706_745_700_000, "Age"),
//! ];
//!
//! let plan = compute_order(&items).unwrap();
//! assert_eq!(plan.ordered_ids, vec!["q_intro", "q_age", "q_income"]);
//! // Every key moves: 2 -> 1, 4 -> 2, 7 -> 3.
//! assert_eq!(plan.updates.len(), 3);
//! ```
//!
//! ## Persistence
//!
//! The engine never reads or writes storage. The host fetches the relevant
//! item set, calls the engine, and persists the returned plan or change log
//! through its own repository. The [`RecordRepository`] trait names that
//! contract, and [`MemoryStore`] is an in-memory implementation for tests.
//!
//! Callers that need to serialize writes for the same parent must do so
//! themselves (per-parent lock or optimistic token); calls for different
//! parents are independent and safe to run concurrently.

pub mod changelog;
pub mod diff;
pub mod error;
pub mod item;
pub mod record;
pub mod sequence;
pub mod snapshot;
pub mod store;

// Re-export main types at crate root
pub use changelog::{build_change_log, ChangeKind, ChangeRecord};
pub use diff::{compute_diff, DiffResult, FieldChange};
pub use error::Error;
pub use item::SequenceItem;
pub use record::VersionedRecord;
pub use sequence::{apply_updates, compute_order, AmbiguousPair, SequencePlan, SortKeyUpdate};
pub use snapshot::{Snapshot, SnapshotMetadata, SNAPSHOT_FORMAT_VERSION};
pub use store::{MemoryStore, RecordRepository};

/// Type aliases for clarity
pub type ItemId = String;
pub type ParentId = String;
pub type FieldName = String;
pub type SortKey = i64;
pub type Timestamp = u64;
