//! Logical index arithmetic.
//!
//! A logical index is the 1-based handle a caller sees. Index `0` ([`NIL`])
//! is reserved and means "no such node". Every index resolves to a
//! `(segment, slot)` pair by division and remainder against the fixed
//! segment capacity, so no lookup ever walks a chain of references.

/// The reserved "no node" index.
pub const NIL: u64 = 0;

/// Physical address of a logical index: which segment, which slot inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotAddr {
    /// Position of the owning segment in the segment list.
    pub segment: usize,
    /// Position inside that segment's node array and value store.
    pub slot: usize,
}

impl SlotAddr {
    /// Resolve `idx` against a segment capacity of `capacity` slots.
    ///
    /// `capacity` must be non-zero; the list guarantees this by coercing
    /// its configuration at construction.
    #[inline]
    pub fn locate(idx: u64, capacity: usize) -> Self {
        let capacity = capacity as u64;
        Self {
            segment: (idx / capacity) as usize,
            slot: (idx % capacity) as usize,
        }
    }

    /// The logical index this address stands for.
    #[inline]
    pub fn to_index(self, capacity: usize) -> u64 {
        self.segment as u64 * capacity as u64 + self.slot as u64
    }
}

/// Number of segments needed to hold every index in `[0, count]`.
#[inline]
pub fn segments_for(count: u64, capacity: usize) -> usize {
    SlotAddr::locate(count, capacity).segment + 1
}
