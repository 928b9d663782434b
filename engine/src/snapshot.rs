//! Snapshot types for capturing the baseline side of a diff.
//!
//! A snapshot freezes one parent's child records at a point in time. The
//! caller persists it however it likes (the JSON form is deterministic) and
//! later feeds it back as the baseline for [`compute_diff`](crate::compute_diff).

use crate::{
    error::Result, compute_diff, DiffResult, Error, FieldName, ItemId, ParentId, Timestamp,
    VersionedRecord,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version of the snapshot format for future compatibility.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// A point-in-time capture of one parent's child records.
///
/// Uses `BTreeMap` so serialization order is deterministic: two snapshots of
/// the same state serialize to identical JSON regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Snapshot format version
    pub format_version: u32,
    /// Parent scope the records belong to
    pub parent_id: ParentId,
    /// When the capture was taken (milliseconds since epoch)
    pub captured_at: Timestamp,
    /// Records by id
    pub records: BTreeMap<ItemId, VersionedRecord>,
}

impl Snapshot {
    /// Create an empty snapshot for a parent.
    pub fn new(parent_id: impl Into<ParentId>, captured_at: Timestamp) -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            parent_id: parent_id.into(),
            captured_at,
            records: BTreeMap::new(),
        }
    }

    /// Add a record to the snapshot, replacing any previous one with the
    /// same id.
    pub fn add_record(&mut self, record: VersionedRecord) {
        self.records.insert(record.id.clone(), record);
    }

    /// Get a record by id.
    pub fn get_record(&self, id: &str) -> Option<&VersionedRecord> {
        self.records.get(id)
    }

    /// Number of records captured.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Diff this snapshot (as baseline) against a current record set.
    pub fn diff_against(
        &self,
        current: &BTreeMap<ItemId, VersionedRecord>,
        tracked_fields: &[FieldName],
    ) -> Result<DiffResult> {
        compute_diff(&self.records, current, tracked_fields)
    }

    /// Serialize to JSON with deterministic ordering.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::InvalidSnapshot(e.to_string()))
    }

    /// Serialize to pretty JSON with deterministic ordering.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::InvalidSnapshot(e.to_string()))
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| Error::InvalidSnapshot(e.to_string()))?;

        if snapshot.format_version > SNAPSHOT_FORMAT_VERSION {
            return Err(Error::InvalidSnapshot(format!(
                "unsupported snapshot format version: {} (max supported: {})",
                snapshot.format_version, SNAPSHOT_FORMAT_VERSION
            )));
        }

        Ok(snapshot)
    }
}

/// Metadata about a snapshot (without the record data).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetadata {
    /// Snapshot format version
    pub format_version: u32,
    /// Parent scope
    pub parent_id: ParentId,
    /// Capture time
    pub captured_at: Timestamp,
    /// Record count
    pub record_count: usize,
}

impl From<&Snapshot> for SnapshotMetadata {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            format_version: snapshot.format_version,
            parent_id: snapshot.parent_id.clone(),
            captured_at: snapshot.captured_at,
            record_count: snapshot.record_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_empty_snapshot() {
        let snapshot = Snapshot::new("study_1", 1000);
        assert_eq!(snapshot.format_version, SNAPSHOT_FORMAT_VERSION);
        assert_eq!(snapshot.parent_id, "study_1");
        assert_eq!(snapshot.captured_at, 1000);
        assert_eq!(snapshot.record_count(), 0);
    }

    #[test]
    fn add_and_get_record() {
        let mut snapshot = Snapshot::new("study_1", 1000);
        snapshot.add_record(VersionedRecord::new("q_1").with_field("title", "Age"));

        assert_eq!(snapshot.record_count(), 1);
        let record = snapshot.get_record("q_1").unwrap();
        assert_eq!(record.field("title"), Some("Age"));
    }

    #[test]
    fn add_record_replaces_same_id() {
        let mut snapshot = Snapshot::new("study_1", 1000);
        snapshot.add_record(VersionedRecord::new("q_1").with_field("title", "Old"));
        snapshot.add_record(VersionedRecord::new("q_1").with_field("title", "New"));

        assert_eq!(snapshot.record_count(), 1);
        assert_eq!(snapshot.get_record("q_1").unwrap().field("title"), Some("New"));
    }

    #[test]
    fn json_roundtrip() {
        let mut snapshot = Snapshot::new("study_1", 1000);
        snapshot.add_record(
            VersionedRecord::new("q_1")
                .with_field("title", "Age")
                .with_field("order", "1"),
        );

        let json = snapshot.to_json().unwrap();
        let restored = Snapshot::from_json(&json).unwrap();
        assert_eq!(snapshot, restored);
    }

    #[test]
    fn deterministic_serialization() {
        let mut snapshot1 = Snapshot::new("study_1", 1000);
        let mut snapshot2 = Snapshot::new("study_1", 1000);

        // Add records in different order
        snapshot1.add_record(VersionedRecord::new("q_a").with_field("title", "A"));
        snapshot1.add_record(VersionedRecord::new("q_b").with_field("title", "B"));

        snapshot2.add_record(VersionedRecord::new("q_b").with_field("title", "B"));
        snapshot2.add_record(VersionedRecord::new("q_a").with_field("title", "A"));

        assert_eq!(snapshot1.to_json().unwrap(), snapshot2.to_json().unwrap());
    }

    #[test]
    fn diff_against_current_records() {
        let mut snapshot = Snapshot::new("study_1", 1000);
        snapshot.add_record(VersionedRecord::new("q_1").with_field("title", "Old"));
        snapshot.add_record(VersionedRecord::new("q_2").with_field("title", "Gone"));

        let mut current = BTreeMap::new();
        current.insert(
            "q_1".to_string(),
            VersionedRecord::new("q_1").with_field("title", "New"),
        );
        current.insert("q_3".to_string(), VersionedRecord::new("q_3"));

        let diff = snapshot
            .diff_against(&current, &["title".to_string()])
            .unwrap();

        assert!(diff.added_ids.contains("q_3"));
        assert!(diff.removed_ids.contains("q_2"));
        assert_eq!(diff.field_changes.len(), 1);
    }

    #[test]
    fn reject_future_format_version() {
        let json = r#"{
            "formatVersion": 999,
            "parentId": "study_1",
            "capturedAt": 1000,
            "records": {}
        }"#;

        let result = Snapshot::from_json(json);
        assert!(matches!(result, Err(Error::InvalidSnapshot(_))));
    }

    #[test]
    fn reject_malformed_json() {
        let result = Snapshot::from_json("{ not json");
        assert!(matches!(result, Err(Error::InvalidSnapshot(_))));
    }

    #[test]
    fn snapshot_metadata() {
        let mut snapshot = Snapshot::new("study_1", 4200);
        snapshot.add_record(VersionedRecord::new("q_1"));
        snapshot.add_record(VersionedRecord::new("q_2"));

        let metadata: SnapshotMetadata = (&snapshot).into();

        assert_eq!(metadata.format_version, SNAPSHOT_FORMAT_VERSION);
        assert_eq!(metadata.parent_id, "study_1");
        assert_eq!(metadata.captured_at, 4200);
        assert_eq!(metadata.record_count, 2);
    }
}
