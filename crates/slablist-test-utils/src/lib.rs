//! Test utilities and value stores for slablist development.
//!
//! Provides concrete [`ValueStore`] backends ([`VecStore`], [`SparseStore`]),
//! a call-counting [`fixtures::RecordingStore`], structural compliance
//! checks in [`compliance`], and seeded operation scripts with a reference
//! model in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod compliance;
pub mod fixtures;

use indexmap::IndexMap;
use slablist::ValueStore;

/// Dense store backed by a `Vec<T>`.
///
/// Clearing a slot resets it to `T::default()`, so `get` answers `Some` for
/// every in-range slot. Out-of-range slots are ignored.
pub struct VecStore<T> {
    slots: Vec<T>,
}

impl<T: Default> VecStore<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(T::default).take(capacity).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl<T: Default> ValueStore<T> for VecStore<T> {
    fn get(&self, slot: usize) -> Option<&T> {
        self.slots.get(slot)
    }

    fn set(&mut self, slot: usize, value: T) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = value;
        }
    }

    fn clear(&mut self, slot: usize) -> Option<T> {
        self.slots.get_mut(slot).map(std::mem::take)
    }
}

/// Sparse store backed by an `IndexMap<usize, T>`.
///
/// Only occupied slots take memory. A cleared slot is absent, so `get`
/// answers `None` for it.
pub struct SparseStore<T> {
    capacity: usize,
    entries: IndexMap<usize, T>,
}

impl<T> SparseStore<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: IndexMap::new(),
        }
    }

    /// Number of slots currently holding a value.
    pub fn occupied(&self) -> usize {
        self.entries.len()
    }
}

impl<T> ValueStore<T> for SparseStore<T> {
    fn get(&self, slot: usize) -> Option<&T> {
        self.entries.get(&slot)
    }

    fn set(&mut self, slot: usize, value: T) {
        if slot < self.capacity {
            self.entries.insert(slot, value);
        }
    }

    fn clear(&mut self, slot: usize) -> Option<T> {
        self.entries.swap_remove(&slot)
    }
}
