//! Reusable list test fixtures.
//!
//! - [`RecordingStore`]: a store that counts calls and rejects
//!   out-of-range slots, for checking how the list drives its stores.
//! - [`OpScript`]: a deterministic, seeded sequence of list operations.
//! - [`ReferenceModel`]: a `Vec`-based model of list order that mirrors
//!   the dense-index compaction rule, for differential testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use slablist::{Deletion, SlabList, ValueStore, NIL};

/// Shared call counters for every [`RecordingStore`] built by one factory.
#[derive(Debug, Default)]
pub struct StoreCalls {
    created: AtomicUsize,
    gets: AtomicUsize,
    sets: AtomicUsize,
    clears: AtomicUsize,
}

impl StoreCalls {
    pub fn created(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::Relaxed)
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::Relaxed)
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::Relaxed)
    }
}

/// Store that records every call and panics on an out-of-range slot.
///
/// Uses `AtomicUsize` counters behind an `Arc` so the list stays `Send`.
pub struct RecordingStore<T> {
    slots: Vec<Option<T>>,
    calls: Arc<StoreCalls>,
}

impl<T> RecordingStore<T> {
    /// A factory producing recording stores that share `calls`.
    pub fn factory(calls: Arc<StoreCalls>) -> impl FnMut(usize) -> Self {
        move |capacity| {
            calls.created.fetch_add(1, Ordering::Relaxed);
            Self {
                slots: std::iter::repeat_with(|| None).take(capacity).collect(),
                calls: Arc::clone(&calls),
            }
        }
    }

    fn check(&self, slot: usize) {
        assert!(
            slot < self.slots.len(),
            "slot {slot} out of range for capacity {}",
            self.slots.len()
        );
    }
}

impl<T> ValueStore<T> for RecordingStore<T> {
    fn get(&self, slot: usize) -> Option<&T> {
        self.check(slot);
        self.calls.gets.fetch_add(1, Ordering::Relaxed);
        self.slots[slot].as_ref()
    }

    fn set(&mut self, slot: usize, value: T) {
        self.check(slot);
        self.calls.sets.fetch_add(1, Ordering::Relaxed);
        self.slots[slot] = Some(value);
    }

    fn clear(&mut self, slot: usize) -> Option<T> {
        self.check(slot);
        self.calls.clears.fetch_add(1, Ordering::Relaxed);
        self.slots[slot].take()
    }
}

/// One list operation. Positions are resolved modulo the current length,
/// so any script applies to any list state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListOp {
    /// Insert before the element at `pos` in list order.
    PrevInsert { pos: usize, value: u64 },
    /// Insert after the element at `pos` in list order.
    NextInsert { pos: usize, value: u64 },
    /// Replace the value of the element at `pos`.
    Modify { pos: usize, value: u64 },
    /// Delete the element at `pos`.
    Del { pos: usize },
}

/// A deterministic sequence of [`ListOp`]s.
#[derive(Clone, Debug)]
pub struct OpScript {
    pub ops: Vec<ListOp>,
}

impl OpScript {
    /// Generate `len` operations from `seed`.
    ///
    /// `delete_percent` controls the share of deletions; the rest split
    /// evenly between the two insertions, with one in ten being a modify.
    pub fn generate(seed: u64, len: usize, delete_percent: u32) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let ops = (0..len)
            .map(|_| {
                let roll = rng.next_u32() % 100;
                let pos = rng.next_u64() as usize;
                let value = rng.next_u64();
                if roll < delete_percent {
                    ListOp::Del { pos }
                } else if roll % 10 == 0 {
                    ListOp::Modify { pos, value }
                } else if roll % 2 == 0 {
                    ListOp::PrevInsert { pos, value }
                } else {
                    ListOp::NextInsert { pos, value }
                }
            })
            .collect();
        Self { ops }
    }
}

/// `Vec`-based model of a list of `u64` values.
///
/// Tracks list order as logical indices and values by logical index,
/// renaming the last index on deletion exactly as compaction does.
#[derive(Debug)]
pub struct ReferenceModel {
    order: Vec<u64>,
    values: Vec<u64>,
}

impl Default for ReferenceModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceModel {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            values: vec![0],
        }
    }

    /// Number of elements in the model.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Expected values, head to tail.
    pub fn values(&self) -> Vec<u64> {
        self.order.iter().map(|&i| self.values[i as usize]).collect()
    }

    /// Expected head index, `0` when empty.
    pub fn head(&self) -> u64 {
        self.order.first().copied().unwrap_or(NIL)
    }

    /// Expected tail index, `0` when empty.
    pub fn tail(&self) -> u64 {
        self.order.last().copied().unwrap_or(NIL)
    }

    /// Apply `op` to both `list` and the model, asserting the list's
    /// immediate answer matches.
    pub fn apply<S, F>(&mut self, list: &mut SlabList<u64, S, F>, op: ListOp)
    where
        S: ValueStore<u64>,
        F: FnMut(usize) -> S,
    {
        match op {
            ListOp::PrevInsert { pos, value } | ListOp::NextInsert { pos, value } => {
                let before = matches!(op, ListOp::PrevInsert { .. });
                let (anchor, at) = if self.order.is_empty() {
                    (NIL, 0)
                } else {
                    let pos = pos % self.order.len();
                    (self.order[pos], if before { pos } else { pos + 1 })
                };
                let idx = if before {
                    list.prev_insert(value, anchor)
                } else {
                    list.next_insert(value, anchor)
                };
                assert_eq!(idx, self.order.len() as u64 + 1, "{op:?} got index {idx}");
                self.order.insert(at, idx);
                self.values.push(value);
            }
            ListOp::Modify { pos, value } => {
                if self.order.is_empty() {
                    return;
                }
                let idx = self.order[pos % self.order.len()];
                list.modify_value(value, idx);
                self.values[idx as usize] = value;
            }
            ListOp::Del { pos } => {
                if self.order.is_empty() {
                    assert_eq!(list.del(1), Deletion::Ignored);
                    return;
                }
                let idx = self.order.remove(pos % self.order.len());
                let last = self.values.len() as u64 - 1;
                let outcome = list.del(idx);
                if idx == last {
                    assert_eq!(outcome, Deletion::Cleared);
                } else {
                    assert_eq!(outcome, Deletion::Relocated { from: last, to: idx });
                    if let Some(slot) = self.order.iter_mut().find(|i| **i == last) {
                        *slot = idx;
                    }
                    self.values[idx as usize] = self.values[last as usize];
                }
                self.values.pop();
            }
        }
    }
}
