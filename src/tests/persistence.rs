use crate::{ChampMap, ChampSet};

#[test]
fn insert_leaves_receiver_untouched() {
    let s0: ChampSet<i32> = ChampSet::new();
    let s1 = s0.insert(1);
    let s2 = s1.insert(2);

    assert_eq!(s0.len(), 0);
    assert_eq!(s1.len(), 1);
    assert_eq!(s2.len(), 2);
    assert!(!s0.contains(&1));
    assert!(s1.contains(&1));
    assert!(!s1.contains(&2));
    assert!(s2.contains(&1));
    assert!(s2.contains(&2));
}

#[test]
fn noop_insert_returns_same_instance() {
    let s: ChampSet<i32> = (0..100).collect();
    let t = s.insert(42);
    assert!(s.ptr_eq(&t));
}

#[test]
fn noop_remove_returns_same_instance() {
    let s: ChampSet<i32> = (0..100).collect();
    let t = s.remove(&1000);
    assert!(s.ptr_eq(&t));
}

#[test]
fn insert_all_of_self_returns_same_instance() {
    let s: ChampSet<i32> = (0..50).collect();
    let t = s.insert_all(s.iter().copied());
    assert!(s.ptr_eq(&t));
}

#[test]
fn insert_all_of_empty_returns_same_instance() {
    let s: ChampSet<i32> = (0..50).collect();
    let t = s.insert_all(std::iter::empty());
    assert!(s.ptr_eq(&t));
}

#[test]
fn retain_all_of_self_returns_same_instance() {
    let s: ChampSet<i32> = (0..50).collect();
    let t = s.retain_all(&s);
    assert!(s.ptr_eq(&t));
}

#[test]
fn retain_all_of_empty_returns_empty() {
    let s: ChampSet<i32> = (0..50).collect();
    let empty = ChampSet::new();
    let t = s.retain_all(&empty);
    assert!(t.is_empty());
}

#[test]
fn retain_all_keeps_intersection() {
    let s: ChampSet<i32> = (0..20).collect();
    let keep: ChampSet<i32> = (10..30).collect();
    let t = s.retain_all(&keep);
    assert_eq!(t.len(), 10);
    for i in 10..20 {
        assert!(t.contains(&i));
    }
    assert_eq!(s.len(), 20);
}

#[test]
fn remove_all_drops_given_elements() {
    let s: ChampSet<i32> = (0..20).collect();
    let doomed: Vec<i32> = (0..10).collect();
    let t = s.remove_all(&doomed);
    assert_eq!(t.len(), 10);
    for i in 0..10 {
        assert!(!t.contains(&i));
    }
    assert_eq!(s.len(), 20);
}

/// Derive a mutable view, delete half, and confirm the immutable parent
/// still holds everything.
#[test]
fn mutable_view_does_not_disturb_parent() {
    let s: ChampSet<u32> = (0..10_000).collect();
    let mut m = s.to_mut();
    for i in 0..5_000 {
        assert!(m.remove(&i));
    }

    assert_eq!(s.len(), 10_000);
    assert_eq!(m.len(), 5_000);
    for i in 0..10_000 {
        assert!(s.contains(&i), "parent lost element {i}");
    }
    for i in 0..5_000 {
        assert!(!m.contains(&i));
    }
    for i in 5_000..10_000 {
        assert!(m.contains(&i));
    }
}

/// Round-trip through the mutable form is the identity.
#[test]
fn to_mut_to_immutable_round_trip() {
    let s: ChampSet<i32> = (0..500).collect();
    let t = s.to_mut().into_immutable();
    assert!(s.ptr_eq(&t));
    assert_eq!(s, t);
}

/// The same operations through the mutable and the immutable form agree.
#[test]
fn mutable_and_immutable_paths_agree() {
    let s: ChampSet<i32> = (0..100).collect();

    let mut m = s.to_mut();
    for i in 50..150 {
        m.insert(i);
    }
    for i in 0..25 {
        m.remove(&i);
    }
    let via_mut = m.into_immutable();

    let via_immut = s
        .insert_all(50..150)
        .remove_all((0..25).collect::<Vec<_>>().iter());

    assert_eq!(via_mut, via_immut);
}

/// A snapshot published mid-edit stays stable while the mutable view
/// keeps writing with a stale token.
#[test]
fn snapshot_survives_later_writes() {
    let mut m = ChampSet::<i32>::new().to_mut();
    for i in 0..100 {
        m.insert(i);
    }
    let snapshot = m.to_immutable();

    for i in 100..200 {
        m.insert(i);
    }
    for i in 0..50 {
        m.remove(&i);
    }

    assert_eq!(snapshot.len(), 100);
    for i in 0..100 {
        assert!(snapshot.contains(&i), "snapshot lost element {i}");
    }
}

#[test]
fn map_insert_leaves_receiver_untouched() {
    let m0: ChampMap<&str, i32> = ChampMap::new();
    let m1 = m0.insert("a", 1);
    let m2 = m1.insert("a", 2);

    assert_eq!(m0.get(&"a"), None);
    assert_eq!(m1.get(&"a"), Some(&1));
    assert_eq!(m2.get(&"a"), Some(&2));
    assert_eq!(m1.len(), 1);
    assert_eq!(m2.len(), 1);
}

#[test]
fn map_noop_remove_returns_same_instance() {
    let m: ChampMap<i32, i32> = (0..10).map(|i| (i, i)).collect();
    let t = m.remove(&99);
    assert!(m.ptr_eq(&t));
}

#[test]
fn map_handoff_round_trip() {
    let m: ChampMap<i32, i32> = (0..1_000).map(|i| (i, i * 7)).collect();
    let mut w = m.to_mut();
    for i in 0..500 {
        w.insert(i, -1);
    }
    let n = w.into_immutable();

    for i in 0..500 {
        assert_eq!(m.get(&i), Some(&(i * 7)));
        assert_eq!(n.get(&i), Some(&-1));
    }
    for i in 500..1_000 {
        assert_eq!(n.get(&i), Some(&(i * 7)));
    }
}
