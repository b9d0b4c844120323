//! List configuration parameters.

use crate::error::ListError;

/// Configuration for a [`crate::SlabList`].
///
/// Only the segment capacity is tunable. It is fixed for the list's
/// lifetime: every segment holds exactly this many node slots and its value
/// store is created with the same capacity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListConfig {
    /// Node slots per segment.
    ///
    /// Default: 65_536. Must be at least [`ListConfig::MIN_SEGMENT_CAPACITY`].
    /// Segment 0 gives up one slot to the reserved index 0, so it holds
    /// `segment_capacity - 1` elements.
    pub segment_capacity: usize,
}

impl ListConfig {
    /// Default segment capacity: 64K slots.
    pub const DEFAULT_SEGMENT_CAPACITY: usize = 1 << 16;

    /// Smallest accepted segment capacity.
    pub const MIN_SEGMENT_CAPACITY: usize = 2;

    /// Create a config with the given segment capacity.
    ///
    /// The value is stored as given; see [`ListConfig::validate`] and
    /// [`ListConfig::normalized`].
    pub fn new(segment_capacity: usize) -> Self {
        Self { segment_capacity }
    }

    /// Check that the capacity is usable.
    pub fn validate(&self) -> Result<(), ListError> {
        if self.segment_capacity < Self::MIN_SEGMENT_CAPACITY {
            return Err(ListError::InvalidCapacity {
                requested: self.segment_capacity,
                minimum: Self::MIN_SEGMENT_CAPACITY,
            });
        }
        Ok(())
    }

    /// A copy with an unusable capacity replaced by the default.
    pub fn normalized(&self) -> Self {
        if self.validate().is_ok() {
            return self.clone();
        }
        log::warn!(
            "slablist: segment capacity {} is below {}, using {}",
            self.segment_capacity,
            Self::MIN_SEGMENT_CAPACITY,
            Self::DEFAULT_SEGMENT_CAPACITY
        );
        Self::default()
    }

    /// Bytes of node storage one segment occupies.
    pub fn segment_node_bytes(&self) -> usize {
        self.segment_capacity * std::mem::size_of::<crate::node::Node>()
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEGMENT_CAPACITY)
    }
}
