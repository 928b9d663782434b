//! Sequencing engine: canonical ordering and minimal renumbering.
//!
//! Given the full set of sibling items for one parent, [`compute_order`]
//! produces the canonical id order and the smallest set of sort-key writes
//! needed to realize it.
//!
//! # Algorithm
//!
//! 1. Reject inputs containing a duplicate id
//! 2. Stable-sort by `(sort_key, created_at, label)`
//! 3. Record adjacent items whose full triple collides (advisory)
//! 4. Assign dense keys `1..=N` positionally; emit an update only where the
//!    assigned key differs from the stored one

use crate::{error::Result, Error, ItemId, SequenceItem, SortKey};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// A single sort-key write the caller must persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortKeyUpdate {
    /// Item whose stored key is stale
    pub id: ItemId,
    /// Key the item must carry to match its canonical position
    pub new_sort_key: SortKey,
}

/// Two items whose `(sort_key, created_at, label)` triples collided exactly.
///
/// Advisory only: the plan still totally orders both items (stably, by input
/// position), but the caller should log or repair the collision since the
/// relative order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmbiguousPair {
    pub first: ItemId,
    pub second: ItemId,
}

/// Result of a sequencing run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequencePlan {
    /// All input ids in canonical order
    pub ordered_ids: Vec<ItemId>,
    /// Minimal set of writes to realize the order; empty when the stored
    /// keys are already dense and canonical
    pub updates: Vec<SortKeyUpdate>,
    /// Exact tie-break collisions encountered, in canonical order
    pub ambiguous: Vec<AmbiguousPair>,
}

impl SequencePlan {
    /// True when the stored keys already match the canonical order.
    pub fn is_noop(&self) -> bool {
        self.updates.is_empty()
    }

    /// True when at least one pair of items had no defined relative order.
    pub fn is_ambiguous(&self) -> bool {
        !self.ambiguous.is_empty()
    }
}

/// Compute the canonical order of one parent's sibling items and the minimal
/// renumbering plan.
///
/// Pure function: the input is read fresh from storage by the caller before
/// every run and nothing is retained between calls. Runs on every insert or
/// delete into a shared sequence, so the update set is kept minimal to avoid
/// rewriting untouched siblings.
///
/// # Errors
///
/// Returns [`Error::DuplicateItemId`] if the same id appears twice; no
/// partial plan is produced in that case.
pub fn compute_order(items: &[SequenceItem]) -> Result<SequencePlan> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id.as_str()) {
            return Err(Error::DuplicateItemId(item.id.clone()));
        }
    }

    // Stable sort: full-triple ties keep their input order.
    let mut sorted: Vec<&SequenceItem> = items.iter().collect();
    sorted.sort_by(|a, b| a.canonical_cmp(b));

    let ambiguous: Vec<AmbiguousPair> = sorted
        .windows(2)
        .filter(|w| w[0].canonical_cmp(w[1]) == Ordering::Equal)
        .map(|w| AmbiguousPair {
            first: w[0].id.clone(),
            second: w[1].id.clone(),
        })
        .collect();

    if !ambiguous.is_empty() {
        tracing::warn!(
            collisions = ambiguous.len(),
            "sibling items share an identical ordering triple; relative order is arbitrary"
        );
    }

    let mut ordered_ids = Vec::with_capacity(sorted.len());
    let mut updates = Vec::new();
    for (position, item) in sorted.iter().enumerate() {
        let assigned = position as SortKey + 1;
        if item.sort_key != assigned {
            updates.push(SortKeyUpdate {
                id: item.id.clone(),
                new_sort_key: assigned,
            });
        }
        ordered_ids.push(item.id.clone());
    }

    tracing::debug!(
        items = items.len(),
        updates = updates.len(),
        "computed canonical order"
    );

    Ok(SequencePlan {
        ordered_ids,
        updates,
        ambiguous,
    })
}

/// Apply a plan's updates to an item set, returning the re-keyed items.
///
/// Convenience for callers (and tests) that hold items in memory; hosts with
/// real storage persist [`SequencePlan::updates`] through their repository
/// instead.
pub fn apply_updates(items: &[SequenceItem], updates: &[SortKeyUpdate]) -> Vec<SequenceItem> {
    items
        .iter()
        .map(|item| {
            let mut item = item.clone();
            if let Some(update) = updates.iter().find(|u| u.id == item.id) {
                item.sort_key = update.new_sort_key;
            }
            item
        })
        .collect()
}
