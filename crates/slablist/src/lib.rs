//! Pointer-free doubly-linked lists over index-addressed node slabs.
//!
//! Every link is a `u64` logical index into fixed-capacity segments of node
//! records. Values live in a caller-supplied [`ValueStore`], one per
//! segment. Large, long-lived lists therefore cost no per-node heap
//! allocation and present no pointer graph to walk.
//!
//! # Architecture
//!
//! ```text
//! SlabList (controller: count, head, tail)
//! └── SegmentList (append-only, never shrinks)
//!     └── Segment[] (Box<[Node]> + ValueStore + live counter)
//! StableList (optional: generation-tagged Handle table over SlabList)
//! ```
//!
//! # Addressing
//!
//! - Index `0` is reserved ([`NIL`]); occupied indices are always the dense
//!   range `[1, len]`.
//! - `idx / capacity` picks the segment and `idx % capacity` the slot.
//! - Insertion appends at `len + 1`; list order lives only in the links.
//! - Deletion moves the element at `len` into the hole, so an index held
//!   across a deletion may now name a different element. Use
//!   [`StableList`] when that matters.
//!
//! # Example
//!
//! ```
//! use slablist::{store::boxed_slots, Deletion, SlabList};
//!
//! let mut list = SlabList::new(1024, boxed_slots::<u64>);
//! let first = list.next_insert(1, 0);
//! let second = list.next_insert(2, first);
//! list.prev_insert(0, first);
//!
//! assert_eq!(list.del(first), Deletion::Relocated { from: 3, to: first });
//! assert_eq!(list.len(), 2);
//! assert_eq!(list.get_value(list.head()), Some(&0));
//! assert_eq!(list.get_value(list.tail()), Some(&2));
//! # let _ = second;
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod handle;
pub mod index;
pub mod list;
pub mod node;
pub mod segment;
pub mod store;

// Public re-exports for the primary API surface.
pub use config::ListConfig;
pub use error::ListError;
pub use handle::{Handle, StableList};
pub use index::{SlotAddr, NIL};
pub use list::{Deletion, SlabList};
pub use node::Node;
pub use store::ValueStore;
