//! Items with an animation in flight
//!
//! Animations live in a slot-map arena; a hash index maps each item handle
//! to its slot. An item holds at most one entry: inserting for an item that
//! already has one is refused, so callers must resolve or cancel the old
//! animation first and two animations never own one item's transform.

use std::hash::Hash;

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a pending animation slot
    pub struct DriverId;
}

struct PendingEntry<I, T> {
    item: I,
    value: T,
}

/// Map from item handle to the animation currently moving it
pub struct DismissPendingSet<I, T> {
    entries: SlotMap<DriverId, PendingEntry<I, T>>,
    index: FxHashMap<I, DriverId>,
}

impl<I, T> DismissPendingSet<I, T>
where
    I: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            index: FxHashMap::default(),
        }
    }

    /// Register `value` as the animation for `item`
    ///
    /// Returns the value back if `item` already has an entry.
    pub fn insert(&mut self, item: I, value: T) -> Result<DriverId, T> {
        if self.index.contains_key(&item) {
            return Err(value);
        }
        let id = self.entries.insert(PendingEntry { item, value });
        self.index.insert(item, id);
        Ok(id)
    }

    /// Remove and return the entry for `item`
    pub fn remove(&mut self, item: I) -> Option<T> {
        let id = self.index.remove(&item)?;
        self.entries.remove(id).map(|entry| entry.value)
    }

    pub fn contains(&self, item: I) -> bool {
        self.index.contains_key(&item)
    }

    pub fn get(&self, item: I) -> Option<&T> {
        let id = self.index.get(&item)?;
        self.entries.get(*id).map(|entry| &entry.value)
    }

    pub fn get_mut(&mut self, item: I) -> Option<&mut T> {
        let id = self.index.get(&item)?;
        self.entries.get_mut(*id).map(|entry| &mut entry.value)
    }

    /// Snapshot of the items with an entry, in slot order
    ///
    /// Returned by value so callers can remove entries while walking it.
    pub fn items(&self) -> SmallVec<[I; 4]> {
        self.entries.values().map(|entry| entry.item).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.entries.values().map(|entry| (entry.item, &entry.value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<I, T> Default for DismissPendingSet<I, T>
where
    I: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<I: std::fmt::Debug, T> std::fmt::Debug for DismissPendingSet<I, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries(self.entries.values().map(|entry| &entry.item))
            .finish()
    }
}
