//! Crate-internal test suite.

use std::hash::{BuildHasher, Hash, Hasher};

use crate::node::{self, Node};

mod guard;
mod persistence;
mod props;
mod sequenced;
mod stress;

// ---------------------------------------------------------------------------
// Deterministic hashing
// ---------------------------------------------------------------------------

/// `BuildHasher` that passes the written value through unchanged, so a
/// test can dictate the exact 32-bit trie hash of a key.
#[derive(Clone, Default)]
pub(crate) struct IdentityBuild;

pub(crate) struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (self.0 << 8) | u64::from(b);
        }
    }

    fn write_u32(&mut self, i: u32) {
        self.0 = u64::from(i);
    }

    fn write_u64(&mut self, i: u64) {
        self.0 = i;
    }
}

impl BuildHasher for IdentityBuild {
    type Hasher = IdentityHasher;

    fn build_hasher(&self) -> IdentityHasher {
        IdentityHasher(0)
    }
}

/// A key whose trie hash is forced to a chosen value under
/// [`IdentityBuild`]; `id` keeps unequal keys distinguishable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct HashKey {
    pub(crate) id: u32,
    pub(crate) hash: u32,
}

impl HashKey {
    pub(crate) const fn new(id: u32, hash: u32) -> Self {
        Self { id, hash }
    }
}

impl Hash for HashKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash);
    }
}

// ---------------------------------------------------------------------------
// Structural invariant checker
// ---------------------------------------------------------------------------

/// Positions of the set bits of `map`, ascending.
fn set_bits(map: u32) -> Vec<u32> {
    (0..32).filter(|p| map & (1 << p) != 0).collect()
}

/// Walks a trie asserting every structural invariant: disjoint bitmaps,
/// popcount-sized vectors, correct placement of each datum, no
/// single-datum node below the root, and collision nodes only past the
/// hash width with at least two fully colliding entries.
pub(crate) fn check_invariants<D>(
    trie: &Node<D>,
    shift: u32,
    prefix: u64,
    is_root: bool,
    hash_of: &impl Fn(&D) -> u32,
) {
    let prefix_mask = (1u64 << shift) - 1;
    match trie {
        Node::Inner(inner) => {
            assert_eq!(inner.data_map & inner.node_map, 0, "bitmaps overlap");
            assert_eq!(
                inner.data.len(),
                inner.data_map.count_ones() as usize,
                "data length does not match its bitmap"
            );
            assert_eq!(
                inner.children.len(),
                inner.node_map.count_ones() as usize,
                "children length does not match its bitmap"
            );
            if !is_root {
                assert!(
                    inner.data.len() + inner.children.len() > 0,
                    "empty node below the root"
                );
                assert!(
                    !(inner.children.is_empty() && inner.data.len() == 1),
                    "single-datum node below the root"
                );
            }
            for (pos, datum) in set_bits(inner.data_map).into_iter().zip(&inner.data) {
                let h = hash_of(datum);
                assert_eq!(u64::from(h) & prefix_mask, prefix, "datum off its path");
                assert_eq!(node::fragment(h, shift), pos, "datum in the wrong slot");
            }
            for (pos, child) in set_bits(inner.node_map).into_iter().zip(&inner.children) {
                let child_prefix = prefix | (u64::from(pos) << shift);
                check_invariants(
                    child,
                    shift + node::BITS_PER_LEVEL,
                    child_prefix,
                    false,
                    hash_of,
                );
            }
        }
        Node::Collision(col) => {
            assert!(
                shift >= node::HASH_BITS,
                "collision node above the last level"
            );
            assert!(col.entries.len() >= 2, "undersized collision node");
            for entry in &col.entries {
                assert_eq!(hash_of(entry), col.hash, "entry hash differs in collision node");
            }
            assert_eq!(u64::from(col.hash) & prefix_mask, prefix & u64::from(u32::MAX));
        }
    }
}
