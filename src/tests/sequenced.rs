use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::seq_iter::SeqIter;
use crate::{SeqChampMap, SeqChampMapMut, SeqChampSet, SeqChampSetMut};

fn collected<S: std::hash::BuildHasher>(set: &SeqChampSetMut<u32, S>) -> Vec<u32> {
    set.iter().copied().collect()
}

#[test]
fn iterates_in_insertion_order() {
    let mut set = SeqChampSetMut::new();
    for i in [5_u32, 3, 9, 1, 7] {
        set.insert(i);
    }
    assert_eq!(collected(&set), vec![5, 3, 9, 1, 7]);
}

/// Append, prepend, and both iteration directions.
#[test]
fn prepend_append_and_reverse() {
    let mut set = SeqChampSetMut::new();
    for i in 1..=5 {
        set.insert(i);
    }
    set.insert_first(0);
    set.insert_last(6);

    assert_eq!(collected(&set), vec![0, 1, 2, 3, 4, 5, 6]);
    let reversed: Vec<u32> = set.iter_rev().copied().collect();
    assert_eq!(reversed, vec![6, 5, 4, 3, 2, 1, 0]);
}

/// Re-adding a present element keeps its position.
#[test]
fn insert_keeps_position_of_duplicate() {
    let mut set = SeqChampSetMut::new();
    for i in [1_u32, 2, 3] {
        set.insert(i);
    }
    assert!(!set.insert(1));
    assert_eq!(collected(&set), vec![1, 2, 3]);
}

/// `insert_last` moves a present element to the back.
#[test]
fn insert_last_moves_to_back() {
    let mut set = SeqChampSetMut::new();
    for i in [1_u32, 2, 3] {
        set.insert(i);
    }
    assert!(!set.insert_last(1));
    assert_eq!(collected(&set), vec![2, 3, 1]);

    // Already last: nothing moves.
    assert!(!set.insert_last(1));
    assert_eq!(collected(&set), vec![2, 3, 1]);
}

/// `insert_first` moves a present element to the front.
#[test]
fn insert_first_moves_to_front() {
    let mut set = SeqChampSetMut::new();
    for i in [1_u32, 2, 3] {
        set.insert(i);
    }
    assert!(!set.insert_first(3));
    assert_eq!(collected(&set), vec![3, 1, 2]);

    assert!(!set.insert_first(3));
    assert_eq!(collected(&set), vec![3, 1, 2]);
}

#[test]
fn first_and_last_accessors() {
    let mut set = SeqChampSetMut::new();
    assert_eq!(set.get_first(), None);
    assert_eq!(set.get_last(), None);

    for i in [10_u32, 20, 30] {
        set.insert(i);
    }
    assert_eq!(set.get_first(), Some(&10));
    assert_eq!(set.get_last(), Some(&30));
}

#[test]
fn remove_first_and_last() {
    let mut set = SeqChampSetMut::new();
    for i in 0..5_u32 {
        set.insert(i);
    }
    assert_eq!(set.remove_first(), Some(0));
    assert_eq!(set.remove_last(), Some(4));
    assert_eq!(collected(&set), vec![1, 2, 3]);
    assert_eq!(set.len(), 3);

    set.clear();
    assert_eq!(set.remove_first(), None);
    assert_eq!(set.remove_last(), None);
}

/// Removing an element leaves the order of the survivors intact.
#[test]
fn remove_preserves_order_of_rest() {
    let mut set = SeqChampSetMut::new();
    for i in 0..10_u32 {
        set.insert(i);
    }
    set.remove(&4);
    set.remove(&7);
    assert_eq!(collected(&set), vec![0, 1, 2, 3, 5, 6, 8, 9]);
}

/// Random remove/append churn keeps order and the sequence range bound.
#[test]
fn churn_keeps_order_and_range_bound() {
    let mut rng = StdRng::seed_from_u64(0xC0FF_EE00);
    let n = 1_000_u32;

    let mut set = SeqChampSetMut::new();
    let mut model: Vec<u32> = Vec::new();
    for i in 0..n {
        set.insert(i);
        model.push(i);
    }

    for _ in 0..n {
        let victim = model[rng.random_range(0..model.len())];
        assert!(set.remove(&victim));
        model.retain(|&v| v != victim);

        set.insert(victim);
        model.push(victim);

        let (first, last) = set.counters();
        let extent = i64::from(last) - i64::from(first);
        assert!(
            extent <= 4 * i64::try_from(set.len()).unwrap() + 1,
            "sequence range {extent} outgrew the bound for size {}",
            set.len()
        );
    }

    assert_eq!(collected(&set), model);
}

/// Repeated moves of the same elements force renumbering; order must
/// survive each rebuild.
#[test]
fn renumbering_preserves_order() {
    let mut set = SeqChampSetMut::new();
    set.insert(1_u32);
    set.insert(2);

    let mut expected = vec![1_u32, 2];
    for round in 0..100 {
        let mover = expected[0];
        set.insert_last(mover);
        expected.rotate_left(1);
        assert_eq!(collected(&set), expected, "order broke in round {round}");

        let (first, last) = set.counters();
        let extent = i64::from(last) - i64::from(first);
        assert!(extent <= 4 * 2 + 1);
    }
}

/// The heap iterator — picked when the range is sparse relative to the
/// size — yields the same order as the bucket iterator.
#[test]
fn heap_iterator_matches_bucket_order() {
    let mut set = SeqChampSetMut::new();
    for i in 0..50_u32 {
        set.insert(i);
    }
    let (first, _) = set.counters();

    // A fake `last` far past the real one forces the heap strategy.
    let forward: Vec<u32> = SeqIter::new(set.root_node(), set.len(), first, i32::MAX - 2, false)
        .map(|d| d.elem)
        .collect();
    assert_eq!(forward, (0..50).collect::<Vec<_>>());

    let backward: Vec<u32> = SeqIter::new(set.root_node(), set.len(), first, i32::MAX - 2, true)
        .map(|d| d.elem)
        .collect();
    assert_eq!(backward, (0..50).rev().collect::<Vec<_>>());
}

// ---------------------------------------------------------------------------
// Immutable sequenced set
// ---------------------------------------------------------------------------

#[test]
fn immutable_insertion_order() {
    let mut s: SeqChampSet<u32> = SeqChampSet::new();
    for i in [4_u32, 2, 8] {
        s = s.insert(i);
    }
    let order: Vec<u32> = s.iter().copied().collect();
    assert_eq!(order, vec![4, 2, 8]);
}

#[test]
fn immutable_noop_insert_returns_same_instance() {
    let s: SeqChampSet<u32> = [1_u32, 2, 3].into_iter().collect();
    let t = s.insert(2);
    assert!(s.ptr_eq(&t));
}

#[test]
fn immutable_move_noops_return_same_instance() {
    let s: SeqChampSet<u32> = [1_u32, 2, 3].into_iter().collect();
    assert!(s.ptr_eq(&s.insert_last(3)));
    assert!(s.ptr_eq(&s.insert_first(1)));
}

#[test]
fn immutable_remove_first_chain() {
    let s: SeqChampSet<u32> = [1_u32, 2, 3].into_iter().collect();
    let t = s.remove_first().unwrap();
    let u = t.remove_last().unwrap();
    assert_eq!(t.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
    assert_eq!(u.iter().copied().collect::<Vec<_>>(), vec![2]);
    assert_eq!(s.len(), 3);

    let empty: SeqChampSet<u32> = SeqChampSet::new();
    assert!(empty.remove_first().is_none());
    assert!(empty.remove_last().is_none());
}

#[test]
fn order_sensitive_equality() {
    let a: SeqChampSet<u32> = [1_u32, 2, 3].into_iter().collect();
    let b: SeqChampSet<u32> = [1_u32, 2, 3].into_iter().collect();
    let c: SeqChampSet<u32> = [3_u32, 2, 1].into_iter().collect();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

// ---------------------------------------------------------------------------
// Sequenced map
// ---------------------------------------------------------------------------

#[test]
fn map_iterates_in_insertion_order() {
    let mut map = SeqChampMapMut::new();
    for (k, v) in [("c", 1), ("a", 2), ("b", 3)] {
        map.insert(k, v);
    }
    let keys: Vec<&str> = map.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec!["c", "a", "b"]);
}

/// `insert` on a present key keeps its position and swaps the value.
#[test]
fn map_insert_keeps_position_updates_value() {
    let mut map = SeqChampMapMut::new();
    map.insert("a", 1);
    map.insert("b", 2);
    map.insert("c", 3);

    assert_eq!(map.insert("a", 10), Some(1));
    let entries: Vec<(&str, i32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(entries, vec![("a", 10), ("b", 2), ("c", 3)]);
    assert_eq!(map.len(), 3);
}

#[test]
fn map_insert_last_moves_entry() {
    let mut map = SeqChampMapMut::new();
    map.insert("a", 1);
    map.insert("b", 2);
    map.insert("c", 3);

    assert_eq!(map.insert_last("a", 1), Some(1));
    let keys: Vec<&str> = map.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec!["b", "c", "a"]);
}

#[test]
fn map_insert_first_moves_entry() {
    let mut map = SeqChampMapMut::new();
    map.insert("a", 1);
    map.insert("b", 2);

    assert_eq!(map.insert_first("b", 2), Some(2));
    let keys: Vec<&str> = map.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec!["b", "a"]);
}

#[test]
fn map_remove_first_and_last() {
    let mut map = SeqChampMapMut::new();
    for (k, v) in [(1_u32, "one"), (2, "two"), (3, "three")] {
        map.insert(k, v);
    }
    assert_eq!(map.remove_first(), Some((1, "one")));
    assert_eq!(map.remove_last(), Some((3, "three")));
    assert_eq!(map.get_first(), Some((&2, &"two")));
    assert_eq!(map.len(), 1);
}

#[test]
fn immutable_map_order_and_noop() {
    let m: SeqChampMap<&str, i32> = [("x", 1), ("y", 2)].into_iter().collect();
    let keys: Vec<&str> = m.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec!["x", "y"]);

    let t = m.remove(&"zzz");
    assert!(m.ptr_eq(&t));

    let moved = m.insert_last("x", 1);
    let keys: Vec<&str> = moved.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec!["y", "x"]);
}
