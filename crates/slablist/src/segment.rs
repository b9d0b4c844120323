//! Fixed-capacity node segments and the append-only segment list.
//!
//! A [`Segment`] is a boxed array of [`Node`] records, one value store of the
//! same capacity, and a live counter. A [`SegmentList`] is the ordered,
//! growable sequence of segments. Segments are allocated lazily, never move
//! and are never freed while the list lives.

use crate::index::{segments_for, SlotAddr};
use crate::node::Node;
use crate::store::ValueStore;

/// A single fixed-capacity slab of nodes plus its value store.
pub struct Segment<S> {
    /// Node records, allocated to full capacity at creation.
    nodes: Box<[Node]>,
    /// Value storage, indexed by the same slot numbers as `nodes`.
    store: S,
    /// Number of occupied slots.
    live: usize,
}

impl<S> Segment<S> {
    /// Create a segment of `capacity` vacant nodes around `store`.
    pub fn new(capacity: usize, store: S) -> Self {
        Self {
            nodes: vec![Node::VACANT; capacity].into_boxed_slice(),
            store,
            live: 0,
        }
    }

    /// The node in `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= capacity`.
    #[inline]
    pub fn node(&self, slot: usize) -> &Node {
        &self.nodes[slot]
    }

    /// Mutable access to the node in `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= capacity`.
    #[inline]
    pub fn node_mut(&mut self, slot: usize) -> &mut Node {
        &mut self.nodes[slot]
    }

    /// The segment's value store.
    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the segment's value store.
    #[inline]
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Populate `slot` with a fresh unlinked node for `index` and its value.
    pub fn occupy<T>(&mut self, slot: usize, index: u64, value: T)
    where
        S: ValueStore<T>,
    {
        self.store.set(slot, value);
        self.nodes[slot] = Node::new(index, slot);
        self.live += 1;
    }

    /// Clear `slot`'s node and value, returning the value that was there.
    pub fn vacate<T>(&mut self, slot: usize) -> Option<T>
    where
        S: ValueStore<T>,
    {
        let value_slot = self.nodes[slot].value_slot;
        self.nodes[slot] = Node::VACANT;
        self.live = self.live.saturating_sub(1);
        self.store.clear(value_slot)
    }

    /// Number of occupied slots.
    pub fn live(&self) -> usize {
        self.live
    }

    /// Total node slots.
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Bytes held by the node array (the store is opaque).
    pub fn node_bytes(&self) -> usize {
        self.nodes.len() * std::mem::size_of::<Node>()
    }
}

/// An append-only list of [`Segment`]s sharing one fixed capacity.
///
/// Segment `k` owns logical indices `[k * capacity, (k + 1) * capacity)`.
pub struct SegmentList<S> {
    segments: Vec<Segment<S>>,
    segment_capacity: usize,
}

impl<S> SegmentList<S> {
    /// Create an empty list. No segment is allocated until the first
    /// call to [`SegmentList::grow_to`].
    pub fn new(segment_capacity: usize) -> Self {
        Self {
            segments: Vec::new(),
            segment_capacity,
        }
    }

    /// Make sure the segment owning logical index `idx` exists.
    ///
    /// Allocates through `factory` only when that segment has not been
    /// allocated before. Returns the number of segments appended.
    pub fn grow_to<F>(&mut self, idx: u64, factory: &mut F) -> usize
    where
        F: FnMut(usize) -> S,
    {
        let needed = segments_for(idx, self.segment_capacity);
        let mut added = 0;
        while self.segments.len() < needed {
            let store = factory(self.segment_capacity);
            self.segments.push(Segment::new(self.segment_capacity, store));
            added += 1;
            log::debug!(
                "slablist: allocated segment {} ({} slots)",
                self.segments.len() - 1,
                self.segment_capacity
            );
        }
        added
    }

    /// Resolve a logical index to its physical address.
    #[inline]
    pub fn locate(&self, idx: u64) -> SlotAddr {
        SlotAddr::locate(idx, self.segment_capacity)
    }

    /// The node at logical index `idx`, if its segment exists.
    #[inline]
    pub fn get(&self, idx: u64) -> Option<&Node> {
        let addr = self.locate(idx);
        self.segments.get(addr.segment).map(|seg| seg.node(addr.slot))
    }

    /// The node at logical index `idx`.
    ///
    /// # Panics
    ///
    /// Panics if the owning segment has not been allocated.
    #[inline]
    pub fn node(&self, idx: u64) -> &Node {
        let addr = self.locate(idx);
        self.segments[addr.segment].node(addr.slot)
    }

    /// Mutable access to the node at logical index `idx`.
    ///
    /// # Panics
    ///
    /// Panics if the owning segment has not been allocated.
    #[inline]
    pub fn node_mut(&mut self, idx: u64) -> &mut Node {
        let addr = self.locate(idx);
        self.segments[addr.segment].node_mut(addr.slot)
    }

    /// The segment at position `k`.
    #[inline]
    pub fn segment(&self, k: usize) -> Option<&Segment<S>> {
        self.segments.get(k)
    }

    /// Mutable access to the segment at position `k`.
    ///
    /// # Panics
    ///
    /// Panics if `k` is not an allocated segment.
    #[inline]
    pub fn segment_mut(&mut self, k: usize) -> &mut Segment<S> {
        &mut self.segments[k]
    }

    /// Fixed per-segment capacity.
    pub fn segment_capacity(&self) -> usize {
        self.segment_capacity
    }

    /// Number of segments allocated so far.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Bytes held by node arrays across all segments.
    pub fn node_bytes(&self) -> usize {
        self.segments.iter().map(Segment::node_bytes).sum()
    }
}
