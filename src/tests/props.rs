use std::collections::{HashMap, HashSet};

use proptest::prelude::*;

use crate::tests::{IdentityBuild, check_invariants};
use crate::{ChampMapMut, ChampSet, ChampSetMut, SeqChampSetMut};

proptest! {
    /// The set agrees with the standard library under any insert/remove
    /// interleaving, and the trie invariants hold afterwards.
    #[test]
    fn set_matches_reference(ops in prop::collection::vec((any::<bool>(), 0_u16..500), 0..400)) {
        let mut model: HashSet<u16> = HashSet::new();
        let mut set = ChampSetMut::with_hasher(IdentityBuild);

        for (add, v) in ops {
            if add {
                prop_assert_eq!(set.insert(v), model.insert(v));
            } else {
                prop_assert_eq!(set.remove(&v), model.remove(&v));
            }
            prop_assert_eq!(set.len(), model.len());
        }

        for v in 0..500_u16 {
            prop_assert_eq!(set.contains(&v), model.contains(&v));
        }
        prop_assert_eq!(set.iter().count(), set.len());

        let build = IdentityBuild;
        check_invariants(set.root_node(), 0, 0, true, &|d: &u16| {
            crate::hash::hash_one(&build, d)
        });
    }

    /// The map agrees with the standard library.
    #[test]
    fn map_matches_reference(ops in prop::collection::vec((any::<bool>(), 0_u16..300, any::<u32>()), 0..400)) {
        let mut model: HashMap<u16, u32> = HashMap::new();
        let mut map = ChampMapMut::new();

        for (add, k, v) in ops {
            if add {
                prop_assert_eq!(map.insert(k, v), model.insert(k, v));
            } else {
                prop_assert_eq!(map.remove(&k), model.remove(&k));
            }
            prop_assert_eq!(map.len(), model.len());
        }

        for (k, v) in &model {
            prop_assert_eq!(map.get(k), Some(v));
        }
    }

    /// Applying the same operations through the immutable and the
    /// mutable form produces equal sets, and the unmodified originals
    /// are untouched.
    #[test]
    fn handoff_paths_agree(ops in prop::collection::vec((any::<bool>(), 0_u16..200), 0..200)) {
        let base: ChampSet<u16> = (0..100).collect();
        let frozen: Vec<u16> = base.iter().copied().collect();

        let mut mutable = base.to_mut();
        let mut immutable = base.clone();
        for (add, v) in ops {
            if add {
                mutable.insert(v);
                immutable = immutable.insert(v);
            } else {
                mutable.remove(&v);
                immutable = immutable.remove(&v);
            }
        }

        prop_assert_eq!(mutable.into_immutable(), immutable);

        // The base set never moved.
        prop_assert_eq!(base.len(), 100);
        for v in frozen {
            prop_assert!(base.contains(&v));
        }
    }

    /// The sequenced set iterates like an order-preserving list model:
    /// `insert` appends new elements, `insert_last` moves, `remove`
    /// deletes.
    #[test]
    fn sequenced_matches_list_model(ops in prop::collection::vec((0_u8..3, 0_u16..100), 0..300)) {
        let mut model: Vec<u16> = Vec::new();
        let mut set = SeqChampSetMut::new();

        for (op, v) in ops {
            match op {
                0 => {
                    set.insert(v);
                    if !model.contains(&v) {
                        model.push(v);
                    }
                }
                1 => {
                    set.insert_last(v);
                    model.retain(|&m| m != v);
                    model.push(v);
                }
                _ => {
                    set.remove(&v);
                    model.retain(|&m| m != v);
                }
            }
            prop_assert_eq!(set.len(), model.len());
        }

        let order: Vec<u16> = set.iter().copied().collect();
        prop_assert_eq!(order, model);
    }
}
