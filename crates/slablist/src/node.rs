//! Fixed-size link records stored by value inside a segment.

use crate::index::NIL;

/// One link record.
///
/// Nodes carry no references, only logical indices, so a segment full of
/// them is a flat array of integers. A zeroed node ([`Node::VACANT`]) marks
/// an unoccupied slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Node {
    /// Logical index of the predecessor, or [`NIL`] at the head.
    pub prev: u64,
    /// Logical index of the successor, or [`NIL`] at the tail.
    pub next: u64,
    /// This node's own logical index.
    pub index: u64,
    /// Slot of this node's value in the owning segment's store.
    pub value_slot: usize,
}

impl Node {
    /// An unoccupied slot.
    pub const VACANT: Self = Self {
        prev: NIL,
        next: NIL,
        index: NIL,
        value_slot: 0,
    };

    /// A freshly populated, unlinked node.
    #[inline]
    pub fn new(index: u64, value_slot: usize) -> Self {
        Self {
            prev: NIL,
            next: NIL,
            index,
            value_slot,
        }
    }

    /// Whether this slot currently holds a live node.
    #[inline]
    pub fn is_vacant(&self) -> bool {
        self.index == NIL
    }

    /// Whether this node has no predecessor.
    #[inline]
    pub fn is_head(&self) -> bool {
        self.prev == NIL
    }

    /// Whether this node has no successor.
    #[inline]
    pub fn is_tail(&self) -> bool {
        self.next == NIL
    }
}
