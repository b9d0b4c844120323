//! List error types.
//!
//! The core [`crate::SlabList`] operations report misuse through sentinel
//! values (`0` indices, `None` values). [`ListError`] is returned by the
//! surfaces that check strictly: configuration validation and the
//! [`crate::StableList`] handle layer.

use std::error::Error;
use std::fmt;

/// Errors reported by strict list operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListError {
    /// Segment capacity is below the supported minimum.
    InvalidCapacity {
        /// The capacity that was asked for.
        requested: usize,
        /// The smallest capacity accepted.
        minimum: usize,
    },
    /// A logical index outside `[1, len]`.
    InvalidIndex {
        /// The rejected index.
        index: u64,
        /// The list length at the time of the call.
        len: u64,
    },
    /// An insertion without an anchor on a non-empty list.
    MissingAnchor {
        /// The list length at the time of the call.
        len: u64,
    },
    /// A handle whose element has been removed, or that was never issued.
    StaleHandle {
        /// Handle table slot.
        slot: u32,
        /// Generation carried by the handle.
        generation: u32,
    },
    /// Every handle slot is in use.
    HandlesExhausted {
        /// Number of handle slots that exist.
        issued: usize,
    },
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCapacity { requested, minimum } => {
                write!(
                    f,
                    "invalid segment capacity: requested {requested}, minimum {minimum}"
                )
            }
            Self::InvalidIndex { index, len } => {
                write!(f, "logical index {index} out of range [1, {len}]")
            }
            Self::MissingAnchor { len } => {
                write!(f, "insertion needs an anchor: list holds {len} elements")
            }
            Self::StaleHandle { slot, generation } => {
                write!(f, "stale handle: slot {slot}, generation {generation}")
            }
            Self::HandlesExhausted { issued } => {
                write!(f, "handle table exhausted after {issued} slots")
            }
        }
    }
}

impl Error for ListError {}
