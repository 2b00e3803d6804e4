use std::cell::Cell;

use crate::iter::{FailFast, ViewModCount};
use crate::{ChampMapMut, ChampSetMut};

#[test]
fn guard_passes_while_count_is_stable() {
    let counter = Cell::new(0_u64);
    let data = [1, 2, 3];
    let it = FailFast::new(data.iter(), ViewModCount::new(&counter));
    assert_eq!(it.copied().collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
#[should_panic(expected = "structurally modified")]
fn guard_detects_modification_between_nexts() {
    let counter = Cell::new(0_u64);
    let data = [1, 2, 3];
    let mut it = FailFast::new(data.iter(), ViewModCount::new(&counter));
    assert_eq!(it.next(), Some(&1));

    // A structural modification observed through the supplier.
    counter.set(1);
    let _ = it.next();
}

#[test]
#[should_panic(expected = "structurally modified")]
fn guard_checks_before_first_next_too() {
    let counter = Cell::new(0_u64);
    let data = [1];
    let mut it = FailFast::new(data.iter(), ViewModCount::new(&counter));
    counter.set(1);
    let _ = it.next();
}

#[test]
fn guarded_view_iterator_completes() {
    let mut set = ChampSetMut::new();
    for i in 0..100 {
        set.insert(i);
    }
    let mut seen: Vec<i32> = set.iter().copied().collect();
    seen.sort_unstable();
    assert_eq!(seen, (0..100).collect::<Vec<_>>());
}

#[test]
fn iterator_is_exact_size() {
    let mut set = ChampSetMut::new();
    for i in 0..37 {
        set.insert(i);
    }
    let it = set.iter();
    assert_eq!(it.len(), 37);
}

#[test]
fn iterator_fuses_at_end() {
    let mut set = ChampSetMut::new();
    set.insert(1);
    let mut it = set.iter();
    assert!(it.next().is_some());
    assert!(it.next().is_none());
    assert!(it.next().is_none());
}

#[test]
fn empty_iterators_yield_nothing() {
    let set: ChampSetMut<i32> = ChampSetMut::new();
    assert_eq!(set.iter().count(), 0);

    let map: ChampMapMut<i32, i32> = ChampMapMut::new();
    assert_eq!(map.iter().count(), 0);
}

#[test]
fn map_iterator_yields_pairs() {
    let mut map = ChampMapMut::new();
    for i in 0..50 {
        map.insert(i, i * 3);
    }
    for (k, v) in &map {
        assert_eq!(*v, *k * 3);
    }
    assert_eq!(map.iter().len(), 50);
}
