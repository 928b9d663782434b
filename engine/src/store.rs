//! Repository contract and an in-memory reference implementation.
//!
//! The engines never touch storage: the host fetches an item set, calls the
//! engine, and persists the returned plan or change log itself. This module
//! names that capability as a trait and ships [`MemoryStore`], an infallible
//! in-memory implementation used by the crate's own tests and handy as a
//! test double for hosts.

use crate::{ItemId, ParentId, SequenceItem, Snapshot, SortKeyUpdate, Timestamp, VersionedRecord};
use std::collections::BTreeMap;
use std::convert::Infallible;

/// The storage capability a host provides around the engines.
///
/// Implementations decide what a parent id means (a project, a module, a
/// questionnaire) and how history is stored; the engines only consume the
/// values these methods return. Serializing concurrent writes for the same
/// parent is the implementor's responsibility.
pub trait RecordRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch all sibling items under a parent, fresh for sequencing.
    fn fetch_siblings(&self, parent_id: &str) -> Result<Vec<SequenceItem>, Self::Error>;

    /// Fetch a parent's child records: live when `as_of` is `None`, else the
    /// state captured at or before the given time.
    fn fetch_records(
        &self,
        parent_id: &str,
        as_of: Option<Timestamp>,
    ) -> Result<BTreeMap<ItemId, VersionedRecord>, Self::Error>;

    /// Persist the sort-key writes from a sequencing plan.
    fn persist_sort_keys(
        &mut self,
        parent_id: &str,
        updates: &[SortKeyUpdate],
    ) -> Result<(), Self::Error>;
}

/// In-memory repository keyed by parent scope.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: BTreeMap<ParentId, Vec<SequenceItem>>,
    records: BTreeMap<ParentId, BTreeMap<ItemId, VersionedRecord>>,
    snapshots: BTreeMap<ParentId, Vec<Snapshot>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sequencable item under a parent.
    pub fn insert_item(&mut self, parent_id: impl Into<ParentId>, item: SequenceItem) {
        self.items.entry(parent_id.into()).or_default().push(item);
    }

    /// Add or replace a live record under a parent.
    pub fn insert_record(&mut self, parent_id: impl Into<ParentId>, record: VersionedRecord) {
        self.records
            .entry(parent_id.into())
            .or_default()
            .insert(record.id.clone(), record);
    }

    /// Capture the parent's live records as a snapshot and retain it.
    pub fn capture_snapshot(&mut self, parent_id: &str, captured_at: Timestamp) -> Snapshot {
        let mut snapshot = Snapshot::new(parent_id, captured_at);
        if let Some(records) = self.records.get(parent_id) {
            for record in records.values() {
                snapshot.add_record(record.clone());
            }
        }
        self.snapshots
            .entry(parent_id.to_string())
            .or_default()
            .push(snapshot.clone());
        snapshot
    }
}

impl RecordRepository for MemoryStore {
    type Error = Infallible;

    fn fetch_siblings(&self, parent_id: &str) -> Result<Vec<SequenceItem>, Self::Error> {
        Ok(self.items.get(parent_id).cloned().unwrap_or_default())
    }

    fn fetch_records(
        &self,
        parent_id: &str,
        as_of: Option<Timestamp>,
    ) -> Result<BTreeMap<ItemId, VersionedRecord>, Self::Error> {
        match as_of {
            None => Ok(self.records.get(parent_id).cloned().unwrap_or_default()),
            Some(at) => {
                // Newest capture taken at or before the requested time.
                let snapshot = self
                    .snapshots
                    .get(parent_id)
                    .into_iter()
                    .flatten()
                    .filter(|s| s.captured_at <= at)
                    .max_by_key(|s| s.captured_at);
                Ok(snapshot.map(|s| s.records.clone()).unwrap_or_default())
            }
        }
    }

    fn persist_sort_keys(
        &mut self,
        parent_id: &str,
        updates: &[SortKeyUpdate],
    ) -> Result<(), Self::Error> {
        if let Some(items) = self.items.get_mut(parent_id) {
            for item in items.iter_mut() {
                if let Some(update) = updates.iter().find(|u| u.id == item.id) {
                    item.sort_key = update.new_sort_key;
                }
            }
        }
        Ok(())
    }
}
