//! The pluggable value store capability.
//!
//! The list never owns values directly. Each segment holds one store of the
//! same capacity as its node array, created by a caller-supplied factory,
//! and the list delegates every value access to it by in-segment slot.

/// Indexed value container backing one segment.
///
/// All calls use `slot` in `[0, capacity)` where `capacity` is the value the
/// factory was invoked with. Implementations may treat out-of-range slots as
/// a no-op, but the list never produces one.
pub trait ValueStore<T> {
    /// The value in `slot`, or `None` if the slot holds nothing.
    fn get(&self, slot: usize) -> Option<&T>;

    /// Store `value` in `slot`, replacing whatever was there.
    fn set(&mut self, slot: usize, value: T);

    /// Empty `slot` and hand back the evicted value, if any.
    ///
    /// Compaction uses the returned value to move an element between two
    /// stores without requiring `T: Clone`.
    fn clear(&mut self, slot: usize) -> Option<T>;
}

impl<T> ValueStore<T> for Vec<Option<T>> {
    #[inline]
    fn get(&self, slot: usize) -> Option<&T> {
        <[Option<T>]>::get(self, slot)?.as_ref()
    }

    #[inline]
    fn set(&mut self, slot: usize, value: T) {
        if let Some(entry) = self.get_mut(slot) {
            *entry = Some(value);
        }
    }

    #[inline]
    fn clear(&mut self, slot: usize) -> Option<T> {
        self.get_mut(slot)?.take()
    }
}

impl<T> ValueStore<T> for Box<[Option<T>]> {
    #[inline]
    fn get(&self, slot: usize) -> Option<&T> {
        <[Option<T>]>::get(self, slot)?.as_ref()
    }

    #[inline]
    fn set(&mut self, slot: usize, value: T) {
        if let Some(entry) = self.get_mut(slot) {
            *entry = Some(value);
        }
    }

    #[inline]
    fn clear(&mut self, slot: usize) -> Option<T> {
        self.get_mut(slot)?.take()
    }
}

/// Factory for a `Box<[Option<T>]>` store, the simplest backend.
///
/// ```
/// use slablist::{store::boxed_slots, SlabList};
///
/// let mut list = SlabList::new(64, boxed_slots::<u32>);
/// let a = list.next_insert(7, 0);
/// assert_eq!(list.get_value(a), Some(&7));
/// ```
pub fn boxed_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}
