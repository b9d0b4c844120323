//! The list controller.
//!
//! [`SlabList`] is a doubly-linked list whose links are logical indices into
//! a [`SegmentList`]. Occupied indices always form the dense range
//! `[1, len]`: insertion appends at `len + 1` regardless of where the element
//! lands in list order, and deletion fills the hole by moving the element at
//! `len` into it.
//!
//! # Index instability
//!
//! Indices are slot handles, not identities. `del(i)` with `i < len` moves
//! the element that lived at `len` to `i`, and that element's old index
//! becomes invalid. Only use an index obtained from an insertion or from
//! [`SlabList::head`], [`SlabList::tail`], [`SlabList::next`] or
//! [`SlabList::prev`] since the last deletion. [`crate::StableList`] layers
//! generation-tagged handles on top when stable identity is needed.
//!
//! # Sentinel contract
//!
//! Nothing here panics on bad input. Index-returning calls answer
//! [`NIL`] (`0`) and value-returning calls answer `None`; mutating calls
//! with an invalid index do nothing.
//!
//! # Concurrency
//!
//! There is no interior mutability. Mutation takes `&mut self`, so shared
//! read-only traversal from several threads is safe whenever `S` and `F`
//! are `Sync`.

use std::fmt;
use std::marker::PhantomData;

use crate::config::ListConfig;
use crate::error::ListError;
use crate::index::NIL;
use crate::node::Node;
use crate::segment::SegmentList;
use crate::store::ValueStore;

/// What a call to [`SlabList::del`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deletion {
    /// The index was out of range; nothing changed.
    Ignored,
    /// The deleted element was the last dense index and was simply cleared.
    Cleared,
    /// The element at `from` (the old last index) now lives at `to`.
    Relocated {
        /// Old logical index of the moved element, now invalid.
        from: u64,
        /// New logical index of the moved element.
        to: u64,
    },
}

impl Deletion {
    /// Whether an element was removed.
    pub fn is_removed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

#[derive(Clone, Copy)]
enum Side {
    Before,
    After,
}

/// Pointer-free doubly-linked list over segmented node slabs.
///
/// `T` is the element type, `S` the per-segment [`ValueStore`] and `F` the
/// factory that builds one store per segment from the segment capacity.
///
/// ```
/// use slablist::{store::boxed_slots, SlabList};
///
/// let mut list = SlabList::new(4, boxed_slots::<&str>);
/// let a = list.next_insert("A", 0);
/// let b = list.next_insert("B", a);
/// let c = list.prev_insert("C", b);
/// assert_eq!((a, b, c), (1, 2, 3));
///
/// let mut order = Vec::new();
/// let mut cur = list.head();
/// while cur != 0 {
///     order.push(*list.get_value(cur).unwrap());
///     cur = list.next(cur);
/// }
/// assert_eq!(order, ["A", "C", "B"]);
/// ```
pub struct SlabList<T, S, F = fn(usize) -> S> {
    segments: SegmentList<S>,
    factory: F,
    /// Highest occupied index, which is also the element count.
    count: u64,
    head: u64,
    tail: u64,
    _values: PhantomData<fn() -> T>,
}

impl<T, S, F> SlabList<T, S, F>
where
    S: ValueStore<T>,
    F: FnMut(usize) -> S,
{
    /// Create an empty list with `segment_capacity` slots per segment.
    ///
    /// A capacity below [`ListConfig::MIN_SEGMENT_CAPACITY`] is replaced by
    /// [`ListConfig::DEFAULT_SEGMENT_CAPACITY`]. `factory` is called once per
    /// segment allocation with the segment capacity.
    pub fn new(segment_capacity: usize, factory: F) -> Self {
        Self::with_config(ListConfig::new(segment_capacity), factory)
    }

    /// Create an empty list from a config, coercing an unusable capacity.
    pub fn with_config(config: ListConfig, factory: F) -> Self {
        let config = config.normalized();
        Self {
            segments: SegmentList::new(config.segment_capacity),
            factory,
            count: 0,
            head: NIL,
            tail: NIL,
            _values: PhantomData,
        }
    }

    /// Create an empty list, rejecting an unusable capacity.
    pub fn try_with_config(config: ListConfig, factory: F) -> Result<Self, ListError> {
        config.validate()?;
        Ok(Self::with_config(config, factory))
    }

    /// Insert `value` immediately before the element at `ref_idx`.
    ///
    /// On an empty list `ref_idx` must be `0` and the value becomes the only
    /// element. Returns the new element's index (always the new length), or
    /// `0` if `ref_idx` is not a valid reference.
    pub fn prev_insert(&mut self, value: T, ref_idx: u64) -> u64 {
        self.insert(value, ref_idx, Side::Before)
    }

    /// Insert `value` immediately after the element at `ref_idx`.
    ///
    /// Same reference rules and result as [`SlabList::prev_insert`].
    pub fn next_insert(&mut self, value: T, ref_idx: u64) -> u64 {
        self.insert(value, ref_idx, Side::After)
    }

    fn insert(&mut self, value: T, ref_idx: u64, side: Side) -> u64 {
        if !self.is_anchor(ref_idx) {
            return NIL;
        }
        let Some(idx) = self.count.checked_add(1) else {
            return NIL;
        };

        self.segments.grow_to(idx, &mut self.factory);
        let addr = self.segments.locate(idx);
        self.segments
            .segment_mut(addr.segment)
            .occupy(addr.slot, idx, value);
        self.count = idx;

        if ref_idx == NIL {
            self.head = idx;
            self.tail = idx;
            return idx;
        }
        match side {
            Side::Before => self.link_before(idx, ref_idx),
            Side::After => self.link_after(idx, ref_idx),
        }
        idx
    }

    /// Whether `ref_idx` may anchor an insertion: `0` on an empty list,
    /// an occupied index otherwise.
    fn is_anchor(&self, ref_idx: u64) -> bool {
        if self.count == 0 {
            ref_idx == NIL
        } else {
            self.contains(ref_idx)
        }
    }

    fn link_before(&mut self, idx: u64, anchor: u64) {
        let prev = self.segments.node(anchor).prev;
        let node = self.segments.node_mut(idx);
        node.prev = prev;
        node.next = anchor;
        self.segments.node_mut(anchor).prev = idx;
        if prev == NIL {
            self.head = idx;
        } else {
            self.segments.node_mut(prev).next = idx;
        }
    }

    fn link_after(&mut self, idx: u64, anchor: u64) {
        let next = self.segments.node(anchor).next;
        let node = self.segments.node_mut(idx);
        node.prev = anchor;
        node.next = next;
        self.segments.node_mut(anchor).next = idx;
        if next == NIL {
            self.tail = idx;
        } else {
            self.segments.node_mut(next).prev = idx;
        }
    }

    /// Replace the value at `idx`. No-op if `idx` is not occupied.
    pub fn modify_value(&mut self, value: T, idx: u64) {
        if !self.contains(idx) {
            return;
        }
        let addr = self.segments.locate(idx);
        let segment = self.segments.segment_mut(addr.segment);
        let slot = segment.node(addr.slot).value_slot;
        segment.store_mut().set(slot, value);
    }

    /// Remove the element at `idx`. No-op if `idx` is not occupied.
    ///
    /// If `idx` is not the last dense index, the element at `len()` is moved
    /// into `idx` and its old index stops being valid; the returned
    /// [`Deletion`] says which case happened.
    pub fn del(&mut self, idx: u64) -> Deletion {
        if !self.contains(idx) {
            return Deletion::Ignored;
        }
        self.unlink(idx);

        let last = self.count;
        let outcome = if idx == last {
            let addr = self.segments.locate(last);
            let _: Option<T> = self.segments.segment_mut(addr.segment).vacate(addr.slot);
            Deletion::Cleared
        } else {
            self.relocate(last, idx);
            Deletion::Relocated {
                from: last,
                to: idx,
            }
        };
        self.count = last - 1;
        outcome
    }

    /// Like [`SlabList::del`], but an unoccupied `idx` is an error.
    pub fn try_del(&mut self, idx: u64) -> Result<Deletion, ListError> {
        if !self.contains(idx) {
            return Err(ListError::InvalidIndex {
                index: idx,
                len: self.count,
            });
        }
        Ok(self.del(idx))
    }

    /// Splice `idx` out of the chain, moving the endpoints past it.
    fn unlink(&mut self, idx: u64) {
        let Node { prev, next, .. } = *self.segments.node(idx);
        if prev == NIL {
            self.head = next;
        } else {
            self.segments.node_mut(prev).next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.segments.node_mut(next).prev = prev;
        }
    }

    /// Move the element at `from` into the already unlinked slot `to`.
    ///
    /// Endpoints are stored as indices, so an endpoint that pointed at
    /// `from` is rewritten here along with the neighbours' links.
    fn relocate(&mut self, from: u64, to: u64) {
        let to_addr = self.segments.locate(to);
        let from_addr = self.segments.locate(from);

        let target = self.segments.segment_mut(to_addr.segment);
        let dead_slot = target.node(to_addr.slot).value_slot;
        let _: Option<T> = target.store_mut().clear(dead_slot);

        let moved = *self.segments.node(from);
        let value: Option<T> = self
            .segments
            .segment_mut(from_addr.segment)
            .vacate(from_addr.slot);

        if moved.prev == NIL {
            self.head = to;
        } else {
            self.segments.node_mut(moved.prev).next = to;
        }
        if moved.next == NIL {
            self.tail = to;
        } else {
            self.segments.node_mut(moved.next).prev = to;
        }

        let target = self.segments.segment_mut(to_addr.segment);
        *target.node_mut(to_addr.slot) = Node {
            prev: moved.prev,
            next: moved.next,
            index: to,
            value_slot: to_addr.slot,
        };
        if let Some(value) = value {
            target.store_mut().set(to_addr.slot, value);
        }
        log::trace!("slablist: relocated index {from} to {to}");
    }
}

impl<T, S: ValueStore<T>, F> SlabList<T, S, F> {
    /// The value at `idx`, or `None` if `idx` is not occupied or the store
    /// holds nothing there.
    pub fn get_value(&self, idx: u64) -> Option<&T> {
        if !self.contains(idx) {
            return None;
        }
        let addr = self.segments.locate(idx);
        let segment = self.segments.segment(addr.segment)?;
        segment.store().get(segment.node(addr.slot).value_slot)
    }
}

impl<T, S, F> SlabList<T, S, F> {
    /// Whether `idx` is an occupied index, i.e. in `[1, len]`.
    #[inline]
    pub fn contains(&self, idx: u64) -> bool {
        idx != NIL && idx <= self.count
    }

    /// Successor of `idx`, or `0` at the tail or for an invalid index.
    pub fn next(&self, idx: u64) -> u64 {
        if !self.contains(idx) {
            return NIL;
        }
        self.segments.node(idx).next
    }

    /// Predecessor of `idx`, or `0` at the head or for an invalid index.
    pub fn prev(&self, idx: u64) -> u64 {
        if !self.contains(idx) {
            return NIL;
        }
        self.segments.node(idx).prev
    }

    /// Index of the first element in list order, `0` when empty.
    pub fn head(&self) -> u64 {
        self.head
    }

    /// Index of the last element in list order, `0` when empty.
    pub fn tail(&self) -> u64 {
        self.tail
    }

    /// Number of elements, which is also the highest occupied index.
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Whether the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The link record at `idx`, if occupied.
    pub fn node(&self, idx: u64) -> Option<&Node> {
        if !self.contains(idx) {
            return None;
        }
        self.segments.get(idx)
    }

    /// Fixed number of slots per segment.
    pub fn segment_capacity(&self) -> usize {
        self.segments.segment_capacity()
    }

    /// Segments allocated so far. Segments are never released.
    pub fn segment_count(&self) -> usize {
        self.segments.segment_count()
    }

    /// Occupied slots in segment `k`, or `None` if it is not allocated.
    pub fn segment_live(&self, k: usize) -> Option<usize> {
        self.segments.segment(k).map(|s| s.live())
    }

    /// Bytes held by node arrays across all segments.
    pub fn node_bytes(&self) -> usize {
        self.segments.node_bytes()
    }
}

impl<T, S, F> fmt::Debug for SlabList<T, S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlabList")
            .field("len", &self.count)
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("segment_capacity", &self.segment_capacity())
            .field("segment_count", &self.segment_count())
            .finish_non_exhaustive()
    }
}
