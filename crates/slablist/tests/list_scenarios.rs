//! End-to-end list scenarios against the concrete test stores.
//!
//! Covers the worked capacity-4 walkthrough, segment boundaries, the
//! endpoint-relocation regression, and long seeded scripts checked against
//! a reference model after every step.

use std::sync::Arc;

use slablist::{Deletion, ListConfig, SlabList, NIL};
use slablist_test_utils::compliance::{
    assert_well_formed, backward_values, forward_indices, forward_values,
};
use slablist_test_utils::fixtures::{OpScript, RecordingStore, ReferenceModel, StoreCalls};
use slablist_test_utils::{SparseStore, VecStore};

#[test]
fn walkthrough_capacity_four() {
    let mut list = SlabList::new(4, SparseStore::<&str>::new);

    assert_eq!(list.next_insert("A", 0), 1);
    assert_eq!((list.head(), list.tail()), (1, 1));
    assert_eq!(list.next_insert("B", 1), 2);
    assert_eq!(list.prev_insert("C", 2), 3);
    assert_eq!((list.head(), list.tail()), (1, 2));
    assert_eq!(forward_values(&list), ["A", "C", "B"]);
    assert_eq!(backward_values(&list), ["B", "C", "A"]);

    assert_eq!(list.del(3), Deletion::Cleared);
    assert_eq!(forward_values(&list), ["A", "B"]);
    assert_eq!(list.len(), 2);

    assert_eq!(list.del(1), Deletion::Relocated { from: 2, to: 1 });
    assert_eq!(list.len(), 1);
    assert_eq!(list.get_value(list.head()), Some(&"B"));
    assert_well_formed(&list);
}

#[test]
fn segment_boundary_keeps_values_and_links() {
    for cap in [2usize, 3, 4, 16] {
        let mut list = SlabList::new(cap, VecStore::<u64>::new);
        let total = cap as u64 + 1;
        let mut prev = NIL;
        for v in 0..total {
            prev = list.next_insert(v * 10, prev);
        }
        assert_eq!(list.len(), total);
        assert_eq!(
            forward_values(&list),
            (0..total).map(|v| v * 10).collect::<Vec<_>>()
        );
        assert_well_formed(&list);
        // Segment 0 loses a slot to the reserved index.
        assert_eq!(list.segment_count(), 2);
    }
}

#[test]
fn deletions_across_boundary_pull_values_back() {
    let mut list = SlabList::new(4, VecStore::<u64>::new);
    let mut prev = NIL;
    for v in 1..=10u64 {
        prev = list.next_insert(v, prev);
    }
    // Delete from the front: each deletion relocates the last dense index,
    // which sits in the highest segment.
    for expected_len in (5..10u64).rev() {
        list.del(list.head());
        assert_eq!(list.len(), expected_len);
        assert_well_formed(&list);
    }
    assert_eq!(forward_values(&list), [6, 7, 8, 9, 10]);
    assert_eq!(list.segment_count(), 3);
    assert_eq!(list.segment_live(2), Some(0));
}

#[test]
fn endpoint_relocation_regression() {
    // Head-adjacent: order is X(3), Y(2), Z(1). Deleting Y relinks X to Z,
    // then compaction moves X, the head, from 3 into 2.
    let mut list = SlabList::new(4, SparseStore::<char>::new);
    let z = list.next_insert('z', NIL);
    let y = list.prev_insert('y', z);
    let x = list.prev_insert('x', y);
    assert_eq!(list.head(), x);
    list.del(y);
    assert_eq!(list.get_value(list.head()), Some(&'x'));
    assert_eq!(list.next(list.head()), z);
    assert_well_formed(&list);

    // Tail-adjacent: order is P(1), Q(2), R(3). Deleting Q makes R the
    // tail's new neighbour and compaction moves R, the tail, into 2.
    let mut list = SlabList::new(4, SparseStore::<char>::new);
    let p = list.next_insert('p', NIL);
    let q = list.next_insert('q', p);
    list.next_insert('r', q);
    list.del(q);
    assert_eq!(list.get_value(list.tail()), Some(&'r'));
    assert_eq!(list.prev(list.tail()), p);
    assert_well_formed(&list);
}

#[test]
fn deleting_every_element_in_any_order_empties_cleanly() {
    let mut list = SlabList::new(3, VecStore::<u64>::new);
    let mut prev = NIL;
    for v in 0..12u64 {
        prev = list.next_insert(v, prev);
    }
    let mut i = 0u64;
    while !list.is_empty() {
        let victim = (i * 7) % list.len() + 1;
        assert!(list.del(victim).is_removed());
        assert_well_formed(&list);
        i += 1;
    }
    assert_eq!((list.head(), list.tail()), (NIL, NIL));
    assert_eq!(list.next_insert(99, NIL), 1);
    assert_well_formed(&list);
}

#[test]
fn factory_runs_once_per_segment() {
    let calls = Arc::new(StoreCalls::default());
    let mut list = SlabList::new(4, RecordingStore::<u64>::factory(Arc::clone(&calls)));
    let mut prev = NIL;
    for v in 0..11u64 {
        prev = list.next_insert(v, prev);
    }
    assert_eq!(calls.created(), 3);

    // Shrinking and regrowing over the same boundaries reuses segments.
    for _ in 0..6 {
        list.del(list.tail());
    }
    for v in 0..6u64 {
        list.next_insert(v, list.tail());
    }
    assert_eq!(calls.created(), 3);
    assert_eq!(list.segment_count(), 3);
    assert_well_formed(&list);
}

#[test]
fn relocation_moves_values_between_stores() {
    let calls = Arc::new(StoreCalls::default());
    let mut list = SlabList::new(2, RecordingStore::<String>::factory(Arc::clone(&calls)));
    let mut prev = NIL;
    for v in ["a", "b", "c", "d"] {
        prev = list.next_insert(v.to_string(), prev);
    }
    let before = calls.sets();
    assert_eq!(list.del(1), Deletion::Relocated { from: 4, to: 1 });
    assert_eq!(calls.sets(), before + 1);
    assert_eq!(forward_values(&list), ["b", "c", "d"].map(String::from));
    assert_eq!(list.get_value(1).map(String::as_str), Some("d"));
    assert_well_formed(&list);
}

#[test]
fn invalid_input_is_a_no_op() {
    let mut list = SlabList::new(4, VecStore::<u64>::new);
    assert_eq!(list.prev_insert(1, 3), NIL);
    assert_eq!(list.len(), 0);
    let a = list.next_insert(1, NIL);
    assert_eq!(list.next_insert(2, NIL), NIL);
    assert_eq!(list.next_insert(2, 2), NIL);
    list.modify_value(5, 2);
    list.modify_value(5, 0);
    assert_eq!(list.del(2), Deletion::Ignored);
    assert_eq!(list.next(2), NIL);
    assert_eq!(list.prev(0), NIL);
    assert_eq!(list.get_value(2), None);
    assert_eq!(list.get_value(a), Some(&1));
    assert_eq!(list.len(), 1);
}

#[test]
fn coerced_capacity_still_works() {
    let mut list = SlabList::with_config(ListConfig::new(0), VecStore::<u64>::new);
    assert_eq!(list.segment_capacity(), ListConfig::DEFAULT_SEGMENT_CAPACITY);
    let a = list.next_insert(1, NIL);
    list.next_insert(2, a);
    assert_eq!(forward_values(&list), [1, 2]);
}

#[test]
fn seeded_scripts_match_reference_model() {
    let cases = [(1u64, 2usize, 20u32), (2, 3, 35), (3, 5, 45), (4, 64, 30)];
    for (seed, cap, delete_percent) in cases {
        let mut list = SlabList::new(cap, VecStore::<u64>::new);
        let mut model = ReferenceModel::new();
        for op in OpScript::generate(seed, 400, delete_percent).ops {
            model.apply(&mut list, op);
            assert_eq!(list.len(), model.len() as u64);
            assert_eq!(list.head(), model.head());
            assert_eq!(list.tail(), model.tail());
            assert_eq!(forward_values(&list), model.values());
        }
        assert_well_formed(&list);
        assert_eq!(forward_indices(&list).len(), model.len());
    }
}
