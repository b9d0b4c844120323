//! Structural compliance checks for a [`SlabList`].
//!
//! These use only the public navigation API, so they check exactly what a
//! caller can observe. Reused by the unit, integration and stress tests.

use indexmap::IndexSet;
use slablist::{SlabList, ValueStore, NIL};

/// Assert occupied indices are exactly `[1, len]` and each node knows its
/// own index.
pub fn assert_dense<T, S, F>(list: &SlabList<T, S, F>) {
    for idx in 1..=list.len() {
        let node = list
            .node(idx)
            .unwrap_or_else(|| panic!("index {idx} within [1, {}] has no node", list.len()));
        assert_eq!(node.index, idx, "node at {idx} reports index {}", node.index);
    }
    assert!(list.node(0).is_none(), "index 0 must never be occupied");
    assert!(
        list.node(list.len() + 1).is_none(),
        "index past len() is occupied"
    );
}

/// Assert `next(i) == j` implies `prev(j) == i` for every occupied `i`.
pub fn assert_links_symmetric<T, S, F>(list: &SlabList<T, S, F>) {
    for idx in 1..=list.len() {
        let next = list.next(idx);
        if next != NIL {
            assert_eq!(list.prev(next), idx, "next({idx}) = {next} but prev({next}) != {idx}");
        }
        let prev = list.prev(idx);
        if prev != NIL {
            assert_eq!(list.next(prev), idx, "prev({idx}) = {prev} but next({prev}) != {idx}");
        }
    }
}

/// Assert the endpoints are consistent with the length.
pub fn assert_endpoints<T, S, F>(list: &SlabList<T, S, F>) {
    if list.is_empty() {
        assert_eq!(list.head(), NIL, "empty list has a head");
        assert_eq!(list.tail(), NIL, "empty list has a tail");
        return;
    }
    assert!(list.contains(list.head()), "head {} not occupied", list.head());
    assert!(list.contains(list.tail()), "tail {} not occupied", list.tail());
    assert_eq!(list.prev(list.head()), NIL, "head has a predecessor");
    assert_eq!(list.next(list.tail()), NIL, "tail has a successor");
}

/// Walk from the head and return the visited indices.
///
/// Asserts every occupied index is visited exactly once and that the step
/// after the last one yields `0`.
pub fn forward_indices<T, S, F>(list: &SlabList<T, S, F>) -> Vec<u64> {
    walk(list, list.head(), |l, i| l.next(i), "forward")
}

/// Walk from the tail and return the visited indices.
pub fn backward_indices<T, S, F>(list: &SlabList<T, S, F>) -> Vec<u64> {
    walk(list, list.tail(), |l, i| l.prev(i), "backward")
}

fn walk<T, S, F>(
    list: &SlabList<T, S, F>,
    start: u64,
    step: impl Fn(&SlabList<T, S, F>, u64) -> u64,
    direction: &str,
) -> Vec<u64> {
    let mut seen = IndexSet::new();
    let mut cur = start;
    for _ in 0..list.len() {
        assert!(list.contains(cur), "{direction} walk reached invalid index {cur}");
        assert!(seen.insert(cur), "{direction} walk revisited index {cur}");
        cur = step(list, cur);
    }
    assert_eq!(cur, NIL, "{direction} walk continues past len()");
    seen.into_iter().collect()
}

/// Values in list order, head to tail.
pub fn forward_values<T, S, F>(list: &SlabList<T, S, F>) -> Vec<T>
where
    T: Clone,
    S: ValueStore<T>,
{
    forward_indices(list)
        .into_iter()
        .map(|idx| {
            list.get_value(idx)
                .cloned()
                .unwrap_or_else(|| panic!("no value at live index {idx}"))
        })
        .collect()
}

/// Values in list order, tail to head.
pub fn backward_values<T, S, F>(list: &SlabList<T, S, F>) -> Vec<T>
where
    T: Clone,
    S: ValueStore<T>,
{
    backward_indices(list)
        .into_iter()
        .map(|idx| {
            list.get_value(idx)
                .cloned()
                .unwrap_or_else(|| panic!("no value at live index {idx}"))
        })
        .collect()
}

/// Run every structural check.
pub fn assert_well_formed<T, S, F>(list: &SlabList<T, S, F>) {
    assert_dense(list);
    assert_endpoints(list);
    assert_links_symmetric(list);
    let forward = forward_indices(list);
    let mut backward = backward_indices(list);
    backward.reverse();
    assert_eq!(forward, backward, "forward and backward walks disagree");
}
