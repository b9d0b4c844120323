//! Benchmark profiles and utilities for slablist.
//!
//! Provides pre-built list workloads for benchmarking:
//!
//! - [`reference_profile`]: 1M elements in 64K-slot segments
//! - [`stress_profile`]: 10M elements, the large long-lived list case
//! - [`build_list`] / [`build_std_list`]: append-only construction of the
//!   slab list and of `std::collections::LinkedList` for comparison

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::LinkedList;

use slablist::{ListConfig, SlabList, NIL};
use slablist_test_utils::VecStore;

/// Slab list type used by every benchmark.
pub type BenchList = SlabList<u64, VecStore<u64>, fn(usize) -> VecStore<u64>>;

/// Size and segment shape of one benchmark workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BenchProfile {
    pub elements: u64,
    pub segment_capacity: usize,
}

/// 1M elements at the default segment capacity.
pub fn reference_profile() -> BenchProfile {
    BenchProfile {
        elements: 1_000_000,
        segment_capacity: ListConfig::DEFAULT_SEGMENT_CAPACITY,
    }
}

/// 10M elements in 100K-slot segments.
pub fn stress_profile() -> BenchProfile {
    BenchProfile {
        elements: 10_000_000,
        segment_capacity: 100_000,
    }
}

/// An empty list with the profile's segment capacity.
pub fn empty_list(profile: BenchProfile) -> BenchList {
    SlabList::new(
        profile.segment_capacity,
        VecStore::<u64>::new as fn(usize) -> VecStore<u64>,
    )
}

/// Build a list of `0..profile.elements`, each appended after the previous
/// tail, so list order matches index order.
pub fn build_list(profile: BenchProfile) -> BenchList {
    let mut list = empty_list(profile);
    let mut tail = NIL;
    for v in 0..profile.elements {
        tail = list.next_insert(v, tail);
    }
    list
}

/// Build the equivalent `std::collections::LinkedList`.
pub fn build_std_list(elements: u64) -> LinkedList<u64> {
    (0..elements).collect()
}

/// Sum values walking head to tail.
pub fn sum_forward(list: &BenchList) -> u64 {
    let mut sum = 0u64;
    let mut cur = list.head();
    while cur != NIL {
        if let Some(v) = list.get_value(cur) {
            sum = sum.wrapping_add(*v);
        }
        cur = list.next(cur);
    }
    sum
}

/// Sum values walking tail to head.
pub fn sum_backward(list: &BenchList) -> u64 {
    let mut sum = 0u64;
    let mut cur = list.tail();
    while cur != NIL {
        if let Some(v) = list.get_value(cur) {
            sum = sum.wrapping_add(*v);
        }
        cur = list.prev(cur);
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: BenchProfile = BenchProfile {
        elements: 1_000,
        segment_capacity: 64,
    };

    #[test]
    fn build_list_matches_std_list() {
        let list = build_list(SMALL);
        let std_list = build_std_list(SMALL.elements);
        assert_eq!(list.len(), std_list.len() as u64);
        assert_eq!(sum_forward(&list), std_list.iter().sum::<u64>());
        assert_eq!(sum_backward(&list), sum_forward(&list));
    }

    #[test]
    fn build_list_spans_expected_segments() {
        let list = build_list(SMALL);
        // Index 0 is reserved, so 1000 elements reach index 1000 = 15 * 64 + 40.
        assert_eq!(list.segment_count(), 16);
    }

    #[test]
    fn profiles_use_valid_capacity() {
        for profile in [reference_profile(), stress_profile()] {
            ListConfig::new(profile.segment_capacity).validate().unwrap();
        }
    }
}
