//! Sequencable item type and the canonical ordering rule.

use crate::{ItemId, SortKey, Timestamp};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A sibling item participating in one parent's linear sequence.
///
/// Ordering rules:
/// 1. Lower `sort_key` comes first
/// 2. If sort keys are equal, earlier `created_at` comes first
/// 3. If both are equal, lexicographically lower `label` comes first
///    (ordinal, case-sensitive)
///
/// The creation timestamp is a tie-break only and is never displayed; the
/// label is typically the item's name or code. Items with an identical triple
/// have no defined relative order - [`compute_order`](crate::compute_order)
/// still returns a total order but flags the collision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceItem {
    /// Unique identifier within the parent scope
    pub id: ItemId,
    /// Persisted ordering value; not assumed unique, may be sparse or negative
    pub sort_key: SortKey,
    /// When the item was created (milliseconds since epoch)
    pub created_at: Timestamp,
    /// Secondary tie-break label (name or code)
    pub label: String,
}

impl SequenceItem {
    /// Create a new sequence item.
    pub fn new(
        id: impl Into<ItemId>,
        sort_key: SortKey,
        created_at: Timestamp,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            sort_key,
            created_at,
            label: label.into(),
        }
    }

    /// Compare two items under the canonical ordering rule.
    ///
    /// Not exposed as `Ord`: two distinct items may legitimately compare
    /// `Equal` here, which the sequencing engine reports as an ambiguity.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        match self.sort_key.cmp(&other.sort_key) {
            Ordering::Equal => match self.created_at.cmp(&other.created_at) {
                Ordering::Equal => self.label.cmp(&other.label),
                other => other,
            },
            other => other,
        }
    }
}
