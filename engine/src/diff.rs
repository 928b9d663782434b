//! Version-diff engine: set difference and field-level comparison.
//!
//! Compares a baseline capture of a parent's child records against the
//! current live set and reports what was added, removed, and modified.
//! Which fields count as "modified" is configuration passed at the call
//! site, so one engine serves questionnaire lines, subsets, and managed-list
//! entities alike.

use crate::{error::Result, Error, FieldName, ItemId, VersionedRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One tracked field whose value differs between baseline and current.
///
/// `None` means the field is absent on that side, which is distinct from
/// `Some("")` - a cleared value and a never-set value diff differently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    /// Record the change belongs to (always a common id)
    pub id: ItemId,
    /// Tracked field name
    pub field: FieldName,
    /// Baseline value, if the field was present
    pub old_value: Option<String>,
    /// Current value, if the field is present
    pub new_value: Option<String>,
}

/// Result of comparing a baseline record set against the current one.
///
/// The three id sets partition the union of both key sets: every id lands in
/// exactly one of them. `field_changes` only ever references common ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    /// Present in current, absent in baseline
    pub added_ids: BTreeSet<ItemId>,
    /// Present in baseline, absent in current
    pub removed_ids: BTreeSet<ItemId>,
    /// Present in both
    pub common_ids: BTreeSet<ItemId>,
    /// Tracked fields that differ, for common ids
    pub field_changes: Vec<FieldChange>,
}

impl DiffResult {
    /// True when nothing was added, removed, or modified.
    pub fn is_unchanged(&self) -> bool {
        self.added_ids.is_empty() && self.removed_ids.is_empty() && self.field_changes.is_empty()
    }

    /// Total number of change entries a change log built from this diff
    /// will contain.
    pub fn change_count(&self) -> usize {
        self.added_ids.len() + self.removed_ids.len() + self.field_changes.len()
    }
}

/// Compare two id-keyed record sets over the given tracked fields.
///
/// Field values are compared with exact string equality on the textual
/// representation the caller supplied; no Unicode or whitespace
/// normalization is applied. Empty inputs on either side and an empty
/// tracked-field list are valid. Duplicate names in `tracked_fields` are
/// applied once, first occurrence wins.
///
/// # Errors
///
/// Returns [`Error::BlankTrackedField`] if a tracked field name is empty or
/// whitespace-only; no partial result is produced.
pub fn compute_diff(
    baseline: &BTreeMap<ItemId, VersionedRecord>,
    current: &BTreeMap<ItemId, VersionedRecord>,
    tracked_fields: &[FieldName],
) -> Result<DiffResult> {
    if tracked_fields.iter().any(|name| name.trim().is_empty()) {
        return Err(Error::BlankTrackedField);
    }

    let mut tracked: Vec<&FieldName> = Vec::with_capacity(tracked_fields.len());
    for name in tracked_fields {
        if !tracked.contains(&name) {
            tracked.push(name);
        }
    }

    let mut result = DiffResult::default();

    // BTreeMap iteration is ascending, so field changes come out ordered by
    // common id, then by tracked field in caller order.
    for (id, after) in current {
        match baseline.get(id) {
            None => {
                result.added_ids.insert(id.clone());
            }
            Some(before) => {
                result.common_ids.insert(id.clone());
                for &field in &tracked {
                    let old_value = before.fields.get(field);
                    let new_value = after.fields.get(field);
                    if old_value != new_value {
                        result.field_changes.push(FieldChange {
                            id: id.clone(),
                            field: field.clone(),
                            old_value: old_value.cloned(),
                            new_value: new_value.cloned(),
                        });
                    }
                }
            }
        }
    }
    for id in baseline.keys() {
        if !current.contains_key(id) {
            result.removed_ids.insert(id.clone());
        }
    }

    tracing::debug!(
        added = result.added_ids.len(),
        removed = result.removed_ids.len(),
        common = result.common_ids.len(),
        field_changes = result.field_changes.len(),
        "computed version diff"
    );

    Ok(result)
}
