//! Keyed groups of slots.
//!
//! The same "map of key to slots" shape is used with two unrelated key
//! schemes, so each scheme gets its own key type:
//!
//! - [`GenerationBatch`] is keyed by [`BatchId`], an opaque id minted per
//!   generated day. It is what the generator returns and what the store keeps.
//! - [`CalendarDayGroup`] is keyed by the calendar date of each slot's start,
//!   for display.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::slot::Slot;

/// Opaque generation-batch key. Not a date and never parsed as one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(Uuid);

impl BatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for BatchId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Ordered map from a key to a non-empty, chronologically ordered run of slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "K: Serialize",
    deserialize = "K: Ord + Deserialize<'de>"
))]
pub struct Buckets<K> {
    buckets: BTreeMap<K, Vec<Slot>>,
}

/// Slots keyed by the generation batch that produced them.
pub type GenerationBatch = Buckets<BatchId>;

/// Slots keyed by the calendar date of their start.
pub type CalendarDayGroup = Buckets<NaiveDate>;

impl<K> Default for Buckets<K> {
    fn default() -> Self {
        Self {
            buckets: BTreeMap::new(),
        }
    }
}

impl<K: Ord> Buckets<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `slots` under `key`, replacing any previous bucket.
    ///
    /// An empty run is not stored; returns whether the bucket was kept.
    pub fn insert(&mut self, key: K, slots: Vec<Slot>) -> bool {
        if slots.is_empty() {
            return false;
        }
        self.buckets.insert(key, slots);
        true
    }

    /// Append one slot to the bucket at `key`, creating it when missing.
    pub fn push(&mut self, key: K, slot: Slot) {
        self.buckets.entry(key).or_default().push(slot);
    }

    pub fn get(&self, key: &K) -> Option<&[Slot]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.buckets.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, K, Vec<Slot>> {
        self.buckets.iter()
    }

    /// Every slot, bucket by bucket, in-bucket order preserved.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.buckets.values().flatten()
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn slot_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Fold `other` into `self`. A key present in both ends up with `other`'s slots.
    pub fn merge(&mut self, other: Buckets<K>) {
        self.buckets.extend(other.buckets);
    }

    pub fn find_slot(&self, id: Uuid) -> Option<(&K, &Slot)> {
        self.buckets
            .iter()
            .find_map(|(key, slots)| slots.iter().find(|s| s.id == id).map(|s| (key, s)))
    }

    /// Swap in `slot` for the stored slot with the same id.
    pub fn replace_slot(&mut self, slot: Slot) -> Option<Slot> {
        let id = slot.id;
        self.buckets
            .values_mut()
            .flat_map(|slots| slots.iter_mut())
            .find(|existing| existing.id == id)
            .map(|existing| std::mem::replace(existing, slot))
    }

    /// Remove the slot with `id`, dropping its bucket if it empties.
    pub fn remove_slot(&mut self, id: Uuid) -> Option<Slot>
    where
        K: Clone,
    {
        let (key, index) = self.buckets.iter().find_map(|(key, slots)| {
            slots
                .iter()
                .position(|s| s.id == id)
                .map(|index| (key.clone(), index))
        })?;

        let slots = self.buckets.get_mut(&key)?;
        let removed = slots.remove(index);
        if slots.is_empty() {
            self.buckets.remove(&key);
        }
        Some(removed)
    }

    /// Keep only the slots matching `keep`, dropping buckets left empty.
    ///
    /// Returns a new collection; `self` is untouched.
    pub fn retain_slots<F>(&self, mut keep: F) -> Self
    where
        K: Clone,
        F: FnMut(&Slot) -> bool,
    {
        self.buckets
            .iter()
            .map(|(key, slots)| {
                let kept = slots.iter().filter(|s| keep(*s)).cloned().collect();
                (key.clone(), kept)
            })
            .collect()
    }
}

impl<K: Ord> FromIterator<(K, Vec<Slot>)> for Buckets<K> {
    fn from_iter<I: IntoIterator<Item = (K, Vec<Slot>)>>(iter: I) -> Self {
        let mut buckets = Self::new();
        for (key, slots) in iter {
            buckets.insert(key, slots);
        }
        buckets
    }
}

impl<K> IntoIterator for Buckets<K> {
    type Item = (K, Vec<Slot>);
    type IntoIter = btree_map::IntoIter<K, Vec<Slot>>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_iter()
    }
}

impl<'a, K> IntoIterator for &'a Buckets<K> {
    type Item = (&'a K, &'a Vec<Slot>);
    type IntoIter = btree_map::Iter<'a, K, Vec<Slot>>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter()
    }
}
