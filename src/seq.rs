//! Sequence tagging and renumbering for the insertion-ordered variants.
//!
//! Each stored datum wraps the user value together with a 32-bit signed
//! sequence number. Equality and hashing project the number away, so the
//! trie engine never sees it; only iteration and the renumbering policy
//! do.

use std::sync::Arc;

use crate::iter::Iter;
use crate::node::Node;
use crate::ops::{self, ChangeDetails, Replacement};
use crate::token::OwnerToken;

/// How far the sequence range may outgrow the element count before a
/// rebuild compacts it.
const EXTENT_FACTOR: i64 = 4;

/// A datum carrying a sequence number.
pub(crate) trait SequencedData: Clone {
    /// Returns the sequence number.
    fn seq(&self) -> i32;

    /// Returns a copy of this datum tagged with `seq`.
    fn with_seq(&self, seq: i32) -> Self;
}

/// A set element tagged with its insertion sequence number.
#[derive(Clone, Debug)]
pub(crate) struct SequencedElement<T> {
    pub(crate) elem: T,
    pub(crate) seq: i32,
}

impl<T: Clone> SequencedData for SequencedElement<T> {
    fn seq(&self) -> i32 {
        self.seq
    }

    fn with_seq(&self, seq: i32) -> Self {
        Self {
            elem: self.elem.clone(),
            seq,
        }
    }
}

/// A map entry tagged with its insertion sequence number.
#[derive(Clone, Debug)]
pub(crate) struct SequencedEntry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) seq: i32,
}

impl<K: Clone, V: Clone> SequencedData for SequencedEntry<K, V> {
    fn seq(&self) -> i32 {
        self.seq
    }

    fn with_seq(&self, seq: i32) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value.clone(),
            seq,
        }
    }
}

// ---------------------------------------------------------------------------
// Renumbering
// ---------------------------------------------------------------------------

/// Returns `true` when the sequence range must be compacted: the extent
/// `last - first` has outgrown `4 * size + 1`, or a counter is one step
/// from overflow.
#[allow(clippy::cast_possible_wrap)]
pub(crate) const fn must_renumber(size: usize, first: i32, last: i32) -> bool {
    let extent = last as i64 - first as i64;
    extent > EXTENT_FACTOR * size as i64 + 1 || first <= i32::MIN + 1 || last >= i32::MAX - 1
}

/// Rebuilds the trie with sequence numbers compacted to `0..size`.
///
/// Entries keep their relative order. The caller resets its counters to
/// `first = -1`, `last = size`.
pub(crate) fn renumber<D, E, H>(
    token: &OwnerToken,
    root: &Arc<Node<D>>,
    size: usize,
    eq: &E,
    hash_fn: &H,
) -> Arc<Node<D>>
where
    D: SequencedData,
    E: Fn(&D, &D) -> bool,
    H: Fn(&D) -> u32,
{
    let mut entries: Vec<D> = Iter::new(root, size).cloned().collect();
    entries.sort_by_key(SequencedData::seq);

    let mut new_root = Arc::new(Node::empty());
    for (i, datum) in entries.into_iter().enumerate() {
        let renumbered = datum.with_seq(i32::try_from(i).expect("size exceeds sequence range"));
        let hash = hash_fn(&renumbered);
        let mut details = ChangeDetails::new();
        ops::update(
            Some(token),
            &mut new_root,
            renumbered,
            hash,
            0,
            &mut details,
            &|_: &D, new| Replacement::Replace(new),
            eq,
            hash_fn,
        );
    }
    new_root
}
