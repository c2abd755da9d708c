//! Availability index: a derived, rebuildable search cache over the items
//! that are currently available.
//!
//! Invariant: an entry for item `i` exists iff `i.available` was true at
//! the last write the index observed. The index is never the system of
//! record; it can be reconstructed from the item store at any time (and is,
//! on process boot).
//!
//! One `RwLock` guards the whole map, so index mutation is a single atomic
//! upsert or removal: a concurrent `search` never observes a half-written
//! entry. Entries are keyed in a `BTreeMap`, which gives search results a
//! stable ascending-id order.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::item::Item;
use crate::types::DbId;

/// Lower-cased searchable snapshot of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
struct IndexEntry {
    name: String,
    description: String,
}

/// In-process search index over available items.
#[derive(Debug, Default)]
pub struct AvailabilityIndex {
    entries: RwLock<BTreeMap<DbId, IndexEntry>>,
}

impl AvailabilityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronize the index with an item's current state: upsert the
    /// snapshot when the item is available, evict it otherwise. Called on
    /// item creation and on every item update (with the merged result).
    pub fn apply(&self, item: &Item) {
        let mut entries = self.write();
        if item.available {
            entries.insert(
                item.id,
                IndexEntry {
                    name: item.name.to_lowercase(),
                    description: item.description.to_lowercase(),
                },
            );
        } else {
            entries.remove(&item.id);
        }
    }

    /// Evict an item unconditionally (no-op if absent). Called on item
    /// deletion.
    pub fn remove(&self, item_id: DbId) {
        self.write().remove(&item_id);
    }

    /// Reconstruct the index from an item snapshot, discarding whatever it
    /// held before.
    pub fn rebuild(&self, items: &[Item]) {
        let mut entries = self.write();
        entries.clear();
        for item in items.iter().filter(|i| i.available) {
            entries.insert(
                item.id,
                IndexEntry {
                    name: item.name.to_lowercase(),
                    description: item.description.to_lowercase(),
                },
            );
        }
        tracing::info!(indexed = entries.len(), "availability index rebuilt");
    }

    /// Ids of indexed items whose name or description contains `query`
    /// (case-insensitively) as a substring, in ascending id order.
    ///
    /// A blank or whitespace-only query returns an empty result, never
    /// "all items": an empty filter is not a match-everything filter.
    pub fn search(&self, query: &str) -> Vec<DbId> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.read()
            .iter()
            .filter(|(_, e)| e.name.contains(&needle) || e.description.contains(&needle))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Number of indexed (i.e. available) items.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<DbId, IndexEntry>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<DbId, IndexEntry>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}
