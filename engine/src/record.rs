//! Versioned record type used on both sides of a diff.

use crate::{FieldName, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A child record captured for comparison.
///
/// Field values are textual representations supplied by the caller, which is
/// responsible for canonicalizing them (numeric formatting, date rendering)
/// before the diff runs. The engine compares them with exact string equality
/// and only looks at fields named in the tracked-field list.
///
/// Uses `BTreeMap` so iteration and serialization order are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionedRecord {
    /// Unique identifier within the parent scope
    pub id: ItemId,
    /// Field values by name
    pub fields: BTreeMap<FieldName, String>,
}

impl VersionedRecord {
    /// Create a record with no fields.
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field setter.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<FieldName>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Get a field value, if present.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Set or replace a field value.
    pub fn set_field(&mut self, name: impl Into<FieldName>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }
}
