//! Generation-tagged handles that survive compaction.
//!
//! A [`SlabList`] index is a slot handle: deletion moves the last element
//! into the hole and its index changes. [`StableList`] wraps the list with a
//! handle table so callers can keep a [`Handle`] across deletions. The
//! `generation` field lets a removed handle be detected in O(1) after its
//! table slot is reused.

use std::fmt;

use crate::config::ListConfig;
use crate::error::ListError;
use crate::index::NIL;
use crate::list::{Deletion, SlabList};
use crate::store::ValueStore;

/// Stable reference to one element of a [`StableList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct Handle {
    slot: u32,
    generation: u32,
}

impl Handle {
    /// Handle table slot.
    pub fn slot(&self) -> u32 {
        self.slot
    }

    /// Generation of the slot when this handle was issued.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle(slot={}, gen={})", self.slot, self.generation)
    }
}

/// Handle table entry. `index == NIL` marks a free slot.
#[derive(Clone, Copy, Debug)]
struct Entry {
    generation: u32,
    index: u64,
}

const NO_OWNER: u32 = u32::MAX;

/// A [`SlabList`] addressed by stable [`Handle`]s instead of dense indices.
pub struct StableList<T, S, F = fn(usize) -> S> {
    list: SlabList<T, S, F>,
    entries: Vec<Entry>,
    free: Vec<u32>,
    /// Handle slot owning each logical index; position 0 is unused.
    owners: Vec<u32>,
}

impl<T, S, F> StableList<T, S, F>
where
    S: ValueStore<T>,
    F: FnMut(usize) -> S,
{
    /// Create an empty list; see [`SlabList::new`].
    pub fn new(segment_capacity: usize, factory: F) -> Self {
        Self::with_config(ListConfig::new(segment_capacity), factory)
    }

    /// Create an empty list from a config; see [`SlabList::with_config`].
    pub fn with_config(config: ListConfig, factory: F) -> Self {
        Self {
            list: SlabList::with_config(config, factory),
            entries: Vec::new(),
            free: Vec::new(),
            owners: vec![NO_OWNER],
        }
    }

    /// Insert `value` before `anchor`, or as the only element when `anchor`
    /// is `None` and the list is empty.
    pub fn insert_before(&mut self, value: T, anchor: Option<Handle>) -> Result<Handle, ListError> {
        let ref_idx = self.anchor_index(anchor)?;
        self.reserve_handle()?;
        let idx = self.list.prev_insert(value, ref_idx);
        Ok(self.issue(idx))
    }

    /// Insert `value` after `anchor`, or as the only element when `anchor`
    /// is `None` and the list is empty.
    pub fn insert_after(&mut self, value: T, anchor: Option<Handle>) -> Result<Handle, ListError> {
        let ref_idx = self.anchor_index(anchor)?;
        self.reserve_handle()?;
        let idx = self.list.next_insert(value, ref_idx);
        Ok(self.issue(idx))
    }

    /// Remove the element behind `handle`. The handle becomes stale.
    pub fn remove(&mut self, handle: Handle) -> Result<(), ListError> {
        let idx = self.index_of(handle)?;
        if let Deletion::Relocated { from, to } = self.list.del(idx) {
            let owner = self.owners[from as usize];
            self.owners[to as usize] = owner;
            self.entries[owner as usize].index = to;
        }
        self.owners.pop();

        let entry = &mut self.entries[handle.slot as usize];
        entry.index = NIL;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(handle.slot);
        Ok(())
    }

    /// Replace the value behind `handle`.
    pub fn set(&mut self, handle: Handle, value: T) -> Result<(), ListError> {
        let idx = self.index_of(handle)?;
        self.list.modify_value(value, idx);
        Ok(())
    }

    /// The value behind `handle`, or `None` if the handle is stale.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        let idx = self.index_of(handle).ok()?;
        self.list.get_value(idx)
    }

    fn anchor_index(&self, anchor: Option<Handle>) -> Result<u64, ListError> {
        match anchor {
            Some(handle) => self.index_of(handle),
            None if self.list.is_empty() => Ok(NIL),
            None => Err(ListError::MissingAnchor {
                len: self.list.len(),
            }),
        }
    }

    fn reserve_handle(&self) -> Result<(), ListError> {
        if self.free.is_empty() && self.entries.len() >= NO_OWNER as usize {
            return Err(ListError::HandlesExhausted {
                issued: self.entries.len(),
            });
        }
        Ok(())
    }

    /// Bind a handle slot to the freshly inserted index `idx`.
    ///
    /// `reserve_handle` has confirmed a slot is available.
    fn issue(&mut self, idx: u64) -> Handle {
        let slot = match self.free.pop() {
            Some(slot) => {
                self.entries[slot as usize].index = idx;
                slot
            }
            None => {
                self.entries.push(Entry {
                    generation: 0,
                    index: idx,
                });
                (self.entries.len() - 1) as u32
            }
        };
        debug_assert_eq!(self.owners.len() as u64, idx);
        self.owners.push(slot);
        Handle {
            slot,
            generation: self.entries[slot as usize].generation,
        }
    }
}

impl<T, S, F> StableList<T, S, F> {
    /// Current logical index of the element behind `handle`.
    ///
    /// The answer is only good until the next removal.
    pub fn index_of(&self, handle: Handle) -> Result<u64, ListError> {
        match self.entries.get(handle.slot as usize) {
            Some(entry) if entry.generation == handle.generation && entry.index != NIL => {
                Ok(entry.index)
            }
            _ => Err(ListError::StaleHandle {
                slot: handle.slot,
                generation: handle.generation,
            }),
        }
    }

    /// Whether `handle` still refers to a live element.
    pub fn contains(&self, handle: Handle) -> bool {
        self.index_of(handle).is_ok()
    }

    /// The handle of the element currently at logical index `idx`.
    pub fn handle_at(&self, idx: u64) -> Option<Handle> {
        if !self.list.contains(idx) {
            return None;
        }
        let slot = self.owners[idx as usize];
        Some(Handle {
            slot,
            generation: self.entries[slot as usize].generation,
        })
    }

    /// First element in list order.
    pub fn head(&self) -> Option<Handle> {
        self.handle_at(self.list.head())
    }

    /// Last element in list order.
    pub fn tail(&self) -> Option<Handle> {
        self.handle_at(self.list.tail())
    }

    /// Successor of `handle`, `Ok(None)` at the tail.
    pub fn next(&self, handle: Handle) -> Result<Option<Handle>, ListError> {
        let idx = self.index_of(handle)?;
        Ok(self.handle_at(self.list.next(idx)))
    }

    /// Predecessor of `handle`, `Ok(None)` at the head.
    pub fn prev(&self, handle: Handle) -> Result<Option<Handle>, ListError> {
        let idx = self.index_of(handle)?;
        Ok(self.handle_at(self.list.prev(idx)))
    }

    /// Number of elements.
    pub fn len(&self) -> u64 {
        self.list.len()
    }

    /// Whether the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// The underlying index-addressed list.
    pub fn as_list(&self) -> &SlabList<T, S, F> {
        &self.list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::boxed_slots;

    type Slots = Box<[Option<u32>]>;
    type TestStable = StableList<u32, Slots, fn(usize) -> Slots>;

    fn stable(capacity: usize) -> TestStable {
        StableList::new(capacity, boxed_slots::<u32> as fn(usize) -> Slots)
    }

    fn values(l: &TestStable) -> Vec<u32> {
        let mut out = Vec::new();
        let mut cur = l.head();
        while let Some(h) = cur {
            out.push(*l.get(h).unwrap());
            cur = l.next(h).unwrap();
        }
        out
    }

    #[test]
    fn handle_accessors() {
        let h = Handle {
            slot: 3,
            generation: 9,
        };
        assert_eq!(h.slot(), 3);
        assert_eq!(h.generation(), 9);
        assert_eq!(h.to_string(), "Handle(slot=3, gen=9)");
    }

    #[test]
    fn handles_survive_relocation() {
        let mut l = stable(4);
        let a = l.insert_after(1, None).unwrap();
        let b = l.insert_after(2, Some(a)).unwrap();
        let c = l.insert_after(3, Some(b)).unwrap();
        assert_eq!(l.index_of(c), Ok(3));

        l.remove(a).unwrap();
        // c was the last dense index and moved into a's slot.
        assert_eq!(l.index_of(c), Ok(1));
        assert_eq!(l.get(c), Some(&3));
        assert_eq!(l.get(b), Some(&2));
        assert_eq!(values(&l), [2, 3]);
    }

    #[test]
    fn removed_handle_is_stale_after_slot_reuse() {
        let mut l = stable(4);
        let a = l.insert_after(1, None).unwrap();
        l.remove(a).unwrap();
        let b = l.insert_after(2, None).unwrap();
        assert_eq!(a.slot(), b.slot());
        assert_ne!(a.generation(), b.generation());
        assert!(!l.contains(a));
        assert_eq!(l.get(a), None);
        assert_eq!(
            l.remove(a),
            Err(ListError::StaleHandle {
                slot: a.slot(),
                generation: a.generation()
            })
        );
        assert_eq!(l.get(b), Some(&2));
    }

    #[test]
    fn anchorless_insert_needs_empty_list() {
        let mut l = stable(4);
        let _only = l.insert_before(1, None).unwrap();
        assert_eq!(
            l.insert_before(2, None),
            Err(ListError::MissingAnchor { len: 1 })
        );
        assert_eq!(l.len(), 1);
    }

    #[test]
    fn navigation_by_handle() {
        let mut l = stable(4);
        let a = l.insert_after(1, None).unwrap();
        let c = l.insert_after(3, Some(a)).unwrap();
        let b = l.insert_before(2, Some(c)).unwrap();
        assert_eq!(l.head(), Some(a));
        assert_eq!(l.tail(), Some(c));
        assert_eq!(l.next(a), Ok(Some(b)));
        assert_eq!(l.prev(a), Ok(None));
        assert_eq!(l.next(c), Ok(None));
        assert_eq!(l.handle_at(l.index_of(b).unwrap()), Some(b));
    }

    #[test]
    fn set_writes_through_handle() {
        let mut l = stable(4);
        let a = l.insert_after(1, None).unwrap();
        let b = l.insert_after(2, Some(a)).unwrap();
        l.remove(a).unwrap();
        l.set(b, 20).unwrap();
        assert_eq!(l.as_list().get_value(1), Some(&20));
    }

    #[test]
    fn churn_keeps_every_live_handle_valid() {
        let mut l = stable(3);
        let mut live: Vec<(Handle, u32)> = Vec::new();
        let mut anchor = None;
        for v in 0..40u32 {
            let h = l.insert_after(v, anchor).unwrap();
            anchor = Some(h);
            live.push((h, v));
            if v % 3 == 2 {
                let (gone, _) = live.remove(live.len() / 2);
                if anchor == Some(gone) {
                    anchor = l.prev(gone).unwrap().or(l.tail());
                }
                l.remove(gone).unwrap();
                if anchor.is_some_and(|h| !l.contains(h)) {
                    anchor = l.tail();
                }
            }
            for &(h, expected) in &live {
                assert_eq!(l.get(h), Some(&expected));
            }
        }
        assert_eq!(l.len(), live.len() as u64);
    }
}
