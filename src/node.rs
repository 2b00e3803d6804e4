//! CHAMP trie node types and bitmap helpers.

use std::sync::Arc;

use crate::token::OwnerToken;

/// Bits per trie level (5 → 32-way branching).
pub(crate) const BITS_PER_LEVEL: u32 = 5;

/// Width of the element hash in bits. A node at `shift >= HASH_BITS` has
/// consumed the entire hash and can only be a collision node.
pub(crate) const HASH_BITS: u32 = 32;

/// Maximum iterator stack depth: 7 bitmap levels plus one collision level.
pub(crate) const MAX_DEPTH: usize = 8;

/// CHAMP trie node.
///
/// Two variants maintain the canonical form invariant:
/// - [`Inner`](Self::Inner) — bitmap-compressed node at `shift < HASH_BITS`
/// - [`Collision`](Self::Collision) — linear node for full 32-bit hash collisions
pub(crate) enum Node<D> {
    /// Bitmap-compressed inner node.
    Inner(InnerNode<D>),
    /// Collision node for elements sharing the same 32-bit hash.
    Collision(CollisionNode<D>),
}

/// Bitmap-compressed inner node.
///
/// Invariants: `data_map & node_map == 0`, `data.len() == popcount(data_map)`,
/// `children.len() == popcount(node_map)`. Both vectors are ordered by
/// ascending bit position of their map.
pub(crate) struct InnerNode<D> {
    /// Token of the mutable view that created this node, if any.
    pub(crate) owner: Option<OwnerToken>,
    /// Bitmap of positions occupied by inline data.
    pub(crate) data_map: u32,
    /// Bitmap of positions occupied by child subtrees.
    pub(crate) node_map: u32,
    /// Inline data, ascending bit-position order of `data_map`.
    pub(crate) data: Vec<D>,
    /// Child subtrees, ascending bit-position order of `node_map`.
    pub(crate) children: Vec<Arc<Node<D>>>,
}

/// Collision node for elements whose 32-bit hashes are fully equal.
///
/// Invariant: `entries.len() >= 2`; entry order carries no meaning.
pub(crate) struct CollisionNode<D> {
    /// Token of the mutable view that created this node, if any.
    pub(crate) owner: Option<OwnerToken>,
    /// The hash shared by every entry.
    pub(crate) hash: u32,
    /// The colliding entries.
    pub(crate) entries: Vec<D>,
}

// ---------------------------------------------------------------------------
// Bitmap helpers
// ---------------------------------------------------------------------------

/// Extracts the 5-bit hash fragment at the given bit-shift depth.
#[inline]
#[must_use]
pub(crate) const fn fragment(hash: u32, shift: u32) -> u32 {
    (hash >> shift) & 0x1F
}

/// Returns the single-bit mask for the given fragment (0..31).
#[inline]
#[must_use]
pub(crate) const fn mask(frag: u32) -> u32 {
    1 << frag
}

/// Returns the compact index of `bit` within `bitmap`.
///
/// Counts the number of set bits below `bit`.
#[inline]
#[must_use]
pub(crate) const fn index(bitmap: u32, bit: u32) -> usize {
    (bitmap & (bit - 1)).count_ones() as usize
}

// ---------------------------------------------------------------------------
// Node accessors
// ---------------------------------------------------------------------------

impl<D> Node<D> {
    /// Creates an empty inner node, the root of an empty collection.
    #[must_use]
    pub(crate) const fn empty() -> Self {
        Self::Inner(InnerNode {
            owner: None,
            data_map: 0,
            node_map: 0,
            data: Vec::new(),
            children: Vec::new(),
        })
    }

    /// Returns the token this node was created under, if any.
    pub(crate) const fn owner(&self) -> Option<&OwnerToken> {
        match self {
            Self::Inner(InnerNode { owner, .. })
            | Self::Collision(CollisionNode { owner, .. }) => owner.as_ref(),
        }
    }

    /// Returns the inline data of this node in slot order.
    pub(crate) fn data(&self) -> &[D] {
        match self {
            Self::Inner(inner) => &inner.data,
            Self::Collision(col) => &col.entries,
        }
    }

    /// Returns the child subtrees of this node (empty for collision nodes).
    pub(crate) fn children(&self) -> &[Arc<Self>] {
        match self {
            Self::Inner(inner) => &inner.children,
            Self::Collision(_) => &[],
        }
    }

    /// Returns `true` if this is an inner node holding exactly one inline
    /// datum and no children — the shape a parent must inline.
    pub(crate) const fn has_single_data(&self) -> bool {
        match self {
            Self::Inner(inner) => inner.node_map == 0 && inner.data_map.is_power_of_two(),
            Self::Collision(_) => false,
        }
    }

    /// Structural equivalence under a caller-supplied element equality.
    ///
    /// Inner nodes compare bitmap-for-bitmap and slot-for-slot; collision
    /// nodes compare as multisets. Meaningful only when both tries were
    /// built with the same hash function.
    pub(crate) fn equivalent(&self, other: &Self, eq: &impl Fn(&D, &D) -> bool) -> bool {
        match (self, other) {
            (Self::Inner(a), Self::Inner(b)) => {
                a.data_map == b.data_map
                    && a.node_map == b.node_map
                    && a.data.iter().zip(&b.data).all(|(x, y)| eq(x, y))
                    && a.children
                        .iter()
                        .zip(&b.children)
                        .all(|(x, y)| x.equivalent(y, eq))
            }
            (Self::Collision(a), Self::Collision(b)) => {
                a.hash == b.hash
                    && a.entries.len() == b.entries.len()
                    && a.entries
                        .iter()
                        .all(|x| b.entries.iter().any(|y| eq(x, y)))
            }
            _ => false,
        }
    }
}

impl<D: Clone> InnerNode<D> {
    /// Clones this node for copy-on-write, stamping the copy with the
    /// caller's token.
    pub(crate) fn cow_copy(&self, mutator: Option<&OwnerToken>) -> Self {
        Self {
            owner: mutator.cloned(),
            data_map: self.data_map,
            node_map: self.node_map,
            data: self.data.clone(),
            children: self.children.clone(),
        }
    }
}

impl<D: Clone> CollisionNode<D> {
    /// Clones this node for copy-on-write, stamping the copy with the
    /// caller's token.
    pub(crate) fn cow_copy(&self, mutator: Option<&OwnerToken>) -> Self {
        Self {
            owner: mutator.cloned(),
            hash: self.hash,
            entries: self.entries.clone(),
        }
    }
}
