use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::tests::{HashKey, IdentityBuild};
use crate::{ChampMapMut, ChampSet, ChampSetMut};

/// 100k entries: insert all, verify all, remove all.
#[test]
fn hundred_thousand_entries() {
    let mut map = ChampMapMut::new();
    for i in 0_u64..100_000 {
        map.insert(i, i * 3);
    }
    assert_eq!(map.len(), 100_000);

    for i in 0_u64..100_000 {
        assert_eq!(map.get(&i), Some(&(i * 3)), "missing key {i}");
    }

    for i in 0_u64..100_000 {
        assert!(map.remove(&i).is_some(), "failed to remove key {i}");
    }
    assert!(map.is_empty());
}

/// A crowded hash range: many full collisions mixed with near misses.
#[test]
fn colliding_hash_distribution() {
    let mut set = ChampSetMut::with_hasher(IdentityBuild);
    for i in 0_u32..2_000 {
        set.insert(HashKey::new(i, i % 16));
    }
    assert_eq!(set.len(), 2_000);

    for i in 0_u32..2_000 {
        assert!(set.contains(&HashKey::new(i, i % 16)));
    }

    for i in (0_u32..2_000).step_by(2) {
        assert!(set.remove(&HashKey::new(i, i % 16)));
    }
    assert_eq!(set.len(), 1_000);
    for i in (1_u32..2_000).step_by(2) {
        assert!(set.contains(&HashKey::new(i, i % 16)));
    }
}

/// Random churn against the standard library.
#[test]
fn random_churn_matches_reference() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut model = std::collections::HashSet::new();
    let mut set = ChampSetMut::new();

    for _ in 0..20_000 {
        let v: u16 = rng.random();
        if rng.random_bool(0.6) {
            assert_eq!(set.insert(v), model.insert(v));
        } else {
            assert_eq!(set.remove(&v), model.remove(&v));
        }
    }

    assert_eq!(set.len(), model.len());
    for v in &model {
        assert!(set.contains(v));
    }
}

/// Many immutable derivations stay independent.
#[test]
fn immutable_versions_are_independent() {
    let mut versions: Vec<ChampSet<u32>> = Vec::new();
    let mut current: ChampSet<u32> = ChampSet::new();
    for i in 0..500 {
        current = current.insert(i);
        versions.push(current.clone());
    }

    for (i, version) in versions.iter().enumerate() {
        assert_eq!(version.len(), i + 1);
        assert!(version.contains(&u32::try_from(i).unwrap()));
        assert!(!version.contains(&u32::try_from(i + 1).unwrap()));
    }
}

/// Interleaved insert, overwrite and remove on one map.
#[test]
fn interleaved_operations() {
    let mut map = ChampMapMut::new();
    for i in 0_u64..200 {
        map.insert(i, i);
    }
    for i in (0_u64..200).step_by(2) {
        map.insert(i, i + 1_000);
    }
    for i in (1_u64..200).step_by(2) {
        assert!(map.remove(&i).is_some());
    }
    assert_eq!(map.len(), 100);
    for i in (0_u64..200).step_by(2) {
        assert_eq!(map.get(&i), Some(&(i + 1_000)));
    }
}
