//! Change-log builder: flattens a diff into audit-ready records.

use crate::{diff::FieldChange, DiffResult, FieldName, ItemId};
use serde::{Deserialize, Serialize};

/// Kind of change a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Subject exists now but not in the baseline
    Added,
    /// Subject existed in the baseline but not now
    Removed,
    /// A tracked field of the subject changed value
    Modified,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeKind::Added => write!(f, "Added"),
            ChangeKind::Removed => write!(f, "Removed"),
            ChangeKind::Modified => write!(f, "Modified"),
        }
    }
}

/// One entry in an audit change log.
///
/// For `Added` and `Removed` entries only the subject and kind matter; the
/// field/value slots stay empty and are skipped when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    /// The record the change is about
    pub subject_id: ItemId,
    /// What happened to it
    pub kind: ChangeKind,
    /// Changed field, for `Modified` entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldName>,
    /// Baseline value, for `Modified` entries with the field present before
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    /// Current value, for `Modified` entries with the field present now
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
}

impl ChangeRecord {
    /// Entry for a subject added since the baseline.
    pub fn added(subject_id: impl Into<ItemId>) -> Self {
        Self {
            subject_id: subject_id.into(),
            kind: ChangeKind::Added,
            field: None,
            old_value: None,
            new_value: None,
        }
    }

    /// Entry for a subject removed since the baseline.
    pub fn removed(subject_id: impl Into<ItemId>) -> Self {
        Self {
            subject_id: subject_id.into(),
            kind: ChangeKind::Removed,
            field: None,
            old_value: None,
            new_value: None,
        }
    }

    /// Entry for one changed field of a surviving subject.
    pub fn modified(change: &FieldChange) -> Self {
        Self {
            subject_id: change.id.clone(),
            kind: ChangeKind::Modified,
            field: Some(change.field.clone()),
            old_value: change.old_value.clone(),
            new_value: change.new_value.clone(),
        }
    }
}

/// Flatten a diff into change records in a fixed, reproducible order:
/// all `Added` (subject ascending), then all `Removed` (subject ascending),
/// then all `Modified` (subject ascending, field ascending within a subject).
///
/// Repeated calls with identical input yield identical output, so audit
/// trails and snapshot-based tests reproduce exactly. The builder knows
/// nothing about storage or what the tracked fields mean.
pub fn build_change_log(diff: &DiffResult) -> Vec<ChangeRecord> {
    let mut log = Vec::with_capacity(diff.change_count());

    // BTreeSet iteration is already ascending.
    log.extend(diff.added_ids.iter().map(ChangeRecord::added));
    log.extend(diff.removed_ids.iter().map(ChangeRecord::removed));

    let mut modified: Vec<&FieldChange> = diff.field_changes.iter().collect();
    modified.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.field.cmp(&b.field)));
    log.extend(modified.into_iter().map(ChangeRecord::modified));

    log
}
