//! Persistent and transient hash sets iterated in insertion order.
//!
//! Elements are stored wrapped in a sequence number; `first` and `last`
//! delimit the assigned range. Appends take `last`, prepends take
//! `first`, and the range is compacted by renumbering when it outgrows
//! the element count or approaches the `i32` limits.

use std::cell::Cell;
use std::fmt;
use std::hash::{BuildHasher, Hash, RandomState};
use std::sync::Arc;

use crate::hash;
use crate::iter::{FailFast, ViewModCount};
use crate::node::Node;
use crate::ops::{self, ChangeDetails, Replacement};
use crate::seq::{self, SequencedElement};
use crate::seq_iter::SeqSetIter;
use crate::token::OwnerToken;

/// Persistent hash set iterated in insertion order.
///
/// Every write returns a new set sharing all unchanged nodes with the
/// receiver. Adding a present element keeps its position; `insert_first`
/// and `insert_last` move it instead.
pub struct SeqChampSet<T, S = RandomState> {
    root: Arc<Node<SequencedElement<T>>>,
    size: usize,
    first: i32,
    last: i32,
    hasher: S,
}

/// Mutable hash set iterated in insertion order.
///
/// Obtained in O(1) from [`SeqChampSet::to_mut`].
pub struct SeqChampSetMut<T, S = RandomState> {
    root: Arc<Node<SequencedElement<T>>>,
    size: usize,
    first: i32,
    last: i32,
    owner: Option<OwnerToken>,
    mod_count: Cell<u64>,
    hasher: S,
}

// ---------------------------------------------------------------------------
// SeqChampSet: construction & accessors — minimal bounds
// ---------------------------------------------------------------------------

impl<T> SeqChampSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<T, S> SeqChampSet<T, S> {
    /// Creates an empty set using the given hasher.
    #[must_use]
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            root: Arc::new(Node::empty()),
            size: 0,
            first: -1,
            last: 0,
            hasher,
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns `true` if both sets share one trie root.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }
}

impl<T: Clone, S> SeqChampSet<T, S> {
    /// Returns an iterator over the elements, in insertion order.
    #[must_use]
    pub fn iter(&self) -> SeqSetIter<'_, T> {
        SeqSetIter::new(&self.root, self.size, self.first, self.last, false)
    }

    /// Returns an iterator over the elements, in reverse insertion order.
    #[must_use]
    pub fn iter_rev(&self) -> SeqSetIter<'_, T> {
        SeqSetIter::new(&self.root, self.size, self.first, self.last, true)
    }

    /// Returns the oldest element.
    #[must_use]
    pub fn get_first(&self) -> Option<&T> {
        self.iter().next()
    }

    /// Returns the newest element.
    #[must_use]
    pub fn get_last(&self) -> Option<&T> {
        self.iter_rev().next()
    }
}

impl<T, S: Clone> SeqChampSet<T, S> {
    /// Returns a mutable set sharing this set's trie, in O(1).
    #[must_use]
    pub fn to_mut(&self) -> SeqChampSetMut<T, S> {
        SeqChampSetMut {
            root: Arc::clone(&self.root),
            size: self.size,
            first: self.first,
            last: self.last,
            owner: None,
            mod_count: Cell::new(0),
            hasher: self.hasher.clone(),
        }
    }

    /// Returns an empty set with this set's hasher.
    #[must_use]
    pub fn clear(&self) -> Self {
        Self::with_hasher(self.hasher.clone())
    }
}

#[cfg(test)]
impl<T, S> SeqChampSetMut<T, S> {
    pub(crate) fn root_node(&self) -> &Node<SequencedElement<T>> {
        &self.root
    }

    pub(crate) const fn counters(&self) -> (i32, i32) {
        (self.first, self.last)
    }
}

// ---------------------------------------------------------------------------
// SeqChampSet: read operations — T: Hash + Eq
// ---------------------------------------------------------------------------

impl<T: Hash + Eq, S: BuildHasher> SeqChampSet<T, S> {
    /// Returns a reference to the stored element equal to `elem`.
    #[must_use]
    pub fn get(&self, elem: &T) -> Option<&T> {
        let hash = hash::hash_one(&self.hasher, elem);
        ops::find(&self.root, hash, 0, &|d: &SequencedElement<T>| {
            d.elem == *elem
        })
        .map(|d| &d.elem)
    }

    /// Returns `true` if the set contains `elem`.
    #[must_use]
    pub fn contains(&self, elem: &T) -> bool {
        self.get(elem).is_some()
    }
}

// ---------------------------------------------------------------------------
// SeqChampSet: write operations — T: Hash + Eq + Clone
// ---------------------------------------------------------------------------

impl<T, S> SeqChampSet<T, S>
where
    T: Hash + Eq + Clone,
    S: BuildHasher + Clone,
{
    /// Returns a set with `elem` appended.
    ///
    /// A present element keeps its position and the receiver's root is
    /// reused.
    #[must_use]
    pub fn insert(&self, elem: T) -> Self {
        let hash = hash::hash_one(&self.hasher, &elem);
        let data = SequencedElement {
            elem,
            seq: self.last,
        };
        let mut root = Arc::clone(&self.root);
        let mut details = ChangeDetails::new();
        let hasher = &self.hasher;
        ops::update(
            None,
            &mut root,
            data,
            hash,
            0,
            &mut details,
            &|_: &SequencedElement<T>, _| Replacement::Keep,
            &|a: &SequencedElement<T>, b: &SequencedElement<T>| a.elem == b.elem,
            &|d: &SequencedElement<T>| hash::hash_one(hasher, &d.elem),
        );
        if details.modified {
            let mut out = Self {
                root,
                size: self.size + 1,
                first: self.first,
                last: self.last + 1,
                hasher: self.hasher.clone(),
            };
            out.compact();
            out
        } else {
            self.clone()
        }
    }

    /// Returns a set with `elem` as its first element, moving it there
    /// if already present.
    #[must_use]
    pub fn insert_first(&self, elem: T) -> Self {
        let hash = hash::hash_one(&self.hasher, &elem);
        let data = SequencedElement {
            elem,
            seq: self.first,
        };
        let mut root = Arc::clone(&self.root);
        let mut details = ChangeDetails::new();
        let hasher = &self.hasher;
        ops::update(
            None,
            &mut root,
            data,
            hash,
            0,
            &mut details,
            // Already the first element: keep it, nothing moves.
            &|old: &SequencedElement<T>, new: SequencedElement<T>| {
                if old.seq == new.seq + 1 {
                    Replacement::Keep
                } else {
                    Replacement::Replace(new)
                }
            },
            &|a: &SequencedElement<T>, b: &SequencedElement<T>| a.elem == b.elem,
            &|d: &SequencedElement<T>| hash::hash_one(hasher, &d.elem),
        );
        if details.modified {
            let mut out = Self {
                root,
                size: self.size + usize::from(!details.updated),
                first: self.first - 1,
                last: self.last,
                hasher: self.hasher.clone(),
            };
            out.compact();
            out
        } else {
            self.clone()
        }
    }

    /// Returns a set with `elem` as its last element, moving it there
    /// if already present.
    #[must_use]
    pub fn insert_last(&self, elem: T) -> Self {
        let hash = hash::hash_one(&self.hasher, &elem);
        let data = SequencedElement {
            elem,
            seq: self.last,
        };
        let mut root = Arc::clone(&self.root);
        let mut details = ChangeDetails::new();
        let hasher = &self.hasher;
        ops::update(
            None,
            &mut root,
            data,
            hash,
            0,
            &mut details,
            // Already the last element: keep it, nothing moves.
            &|old: &SequencedElement<T>, new: SequencedElement<T>| {
                if old.seq == new.seq - 1 {
                    Replacement::Keep
                } else {
                    Replacement::Replace(new)
                }
            },
            &|a: &SequencedElement<T>, b: &SequencedElement<T>| a.elem == b.elem,
            &|d: &SequencedElement<T>| hash::hash_one(hasher, &d.elem),
        );
        if details.modified {
            let mut out = Self {
                root,
                size: self.size + usize::from(!details.updated),
                first: self.first,
                last: self.last + 1,
                hasher: self.hasher.clone(),
            };
            out.compact();
            out
        } else {
            self.clone()
        }
    }

    /// Returns a set with `elem` removed.
    ///
    /// If the element is absent the receiver's root is reused.
    #[must_use]
    pub fn remove(&self, elem: &T) -> Self {
        let hash = hash::hash_one(&self.hasher, elem);
        let mut root = Arc::clone(&self.root);
        let mut details = ChangeDetails::new();
        ops::remove(None, &mut root, hash, 0, &mut details, &|d: &SequencedElement<T>| {
            d.elem == *elem
        });
        if details.modified {
            let mut out = Self {
                root,
                size: self.size - 1,
                first: self.first,
                last: self.last,
                hasher: self.hasher.clone(),
            };
            out.compact();
            out
        } else {
            self.clone()
        }
    }

    /// Returns a set with the oldest element removed, or `None` if empty.
    #[must_use]
    pub fn remove_first(&self) -> Option<Self> {
        let elem = self.get_first()?.clone();
        let hash = hash::hash_one(&self.hasher, &elem);
        let mut root = Arc::clone(&self.root);
        let mut details = ChangeDetails::new();
        ops::remove(None, &mut root, hash, 0, &mut details, &|d: &SequencedElement<T>| {
            d.elem == elem
        });
        let old = details.old_data?;
        let mut out = Self {
            root,
            size: self.size - 1,
            first: old.seq,
            last: self.last,
            hasher: self.hasher.clone(),
        };
        out.compact();
        Some(out)
    }

    /// Returns a set with the newest element removed, or `None` if empty.
    #[must_use]
    pub fn remove_last(&self) -> Option<Self> {
        let elem = self.get_last()?.clone();
        let hash = hash::hash_one(&self.hasher, &elem);
        let mut root = Arc::clone(&self.root);
        let mut details = ChangeDetails::new();
        ops::remove(None, &mut root, hash, 0, &mut details, &|d: &SequencedElement<T>| {
            d.elem == elem
        });
        let old = details.old_data?;
        let mut out = Self {
            root,
            size: self.size - 1,
            first: self.first,
            last: old.seq,
            hasher: self.hasher.clone(),
        };
        out.compact();
        Some(out)
    }

    /// Returns a set with every element of `iter` appended in order.
    #[must_use]
    pub fn insert_all<I: IntoIterator<Item = T>>(&self, iter: I) -> Self {
        let mut m = self.to_mut();
        let mut changed = false;
        for elem in iter {
            changed |= m.insert(elem);
        }
        if changed { m.into_immutable() } else { self.clone() }
    }

    /// Returns a set with every element of `iter` removed.
    #[must_use]
    pub fn remove_all<'a, I: IntoIterator<Item = &'a T>>(&self, iter: I) -> Self
    where
        T: 'a,
    {
        let mut m = self.to_mut();
        let mut changed = false;
        for elem in iter {
            changed |= m.remove(elem);
        }
        if changed { m.into_immutable() } else { self.clone() }
    }

    /// Returns a set keeping only the elements also contained in `other`,
    /// in their current order.
    #[must_use]
    pub fn retain_all(&self, other: &Self) -> Self {
        if other.is_empty() {
            return self.clear();
        }
        let mut m = self.to_mut();
        let mut changed = false;
        for elem in self.iter() {
            if !other.contains(elem) {
                changed |= m.remove(elem);
            }
        }
        if changed { m.into_immutable() } else { self.clone() }
    }

    fn compact(&mut self) {
        if seq::must_renumber(self.size, self.first, self.last) {
            let token = OwnerToken::new();
            let hasher = &self.hasher;
            let new_root = seq::renumber(
                &token,
                &self.root,
                self.size,
                &|a: &SequencedElement<T>, b: &SequencedElement<T>| a.elem == b.elem,
                &|d: &SequencedElement<T>| hash::hash_one(hasher, &d.elem),
            );
            self.root = new_root;
            self.first = -1;
            self.last = i32::try_from(self.size).expect("size exceeds sequence range");
        }
    }
}

// ---------------------------------------------------------------------------
// SeqChampSet: trait impls
// ---------------------------------------------------------------------------

impl<T, S: Clone> Clone for SeqChampSet<T, S> {
    fn clone(&self) -> Self {
        Self {
            root: Arc::clone(&self.root),
            size: self.size,
            first: self.first,
            last: self.last,
            hasher: self.hasher.clone(),
        }
    }
}

impl<T, S: Default> Default for SeqChampSet<T, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<T: Clone + fmt::Debug, S> fmt::Debug for SeqChampSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Clone + PartialEq, S> PartialEq for SeqChampSet<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<T: Clone + Eq, S> Eq for SeqChampSet<T, S> {}

impl<T, S> FromIterator<T> for SeqChampSet<T, S>
where
    T: Hash + Eq + Clone,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut m = SeqChampSetMut::with_hasher(S::default());
        m.extend(iter);
        m.into_immutable()
    }
}

impl<'a, T: Clone, S> IntoIterator for &'a SeqChampSet<T, S> {
    type Item = &'a T;
    type IntoIter = SeqSetIter<'a, T>;

    fn into_iter(self) -> SeqSetIter<'a, T> {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// SeqChampSetMut: construction & accessors — minimal bounds
// ---------------------------------------------------------------------------

impl<T> SeqChampSetMut<T> {
    /// Creates an empty mutable set.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<T, S> SeqChampSetMut<T, S> {
    /// Creates an empty mutable set using the given hasher.
    #[must_use]
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            root: Arc::new(Node::empty()),
            size: 0,
            first: -1,
            last: 0,
            owner: None,
            mod_count: Cell::new(0),
            hasher,
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.root = Arc::new(Node::empty());
        self.size = 0;
        self.first = -1;
        self.last = 0;
        self.bump();
    }

    /// Converts into the immutable form, in O(1).
    #[must_use]
    pub fn into_immutable(self) -> SeqChampSet<T, S> {
        SeqChampSet {
            root: self.root,
            size: self.size,
            first: self.first,
            last: self.last,
            hasher: self.hasher,
        }
    }

    /// Publishes an immutable snapshot, in O(1).
    ///
    /// The ownership token is discarded, so writes after this call copy
    /// instead of editing nodes the snapshot can reach.
    #[must_use]
    pub fn to_immutable(&mut self) -> SeqChampSet<T, S>
    where
        S: Clone,
    {
        self.owner = None;
        SeqChampSet {
            root: Arc::clone(&self.root),
            size: self.size,
            first: self.first,
            last: self.last,
            hasher: self.hasher.clone(),
        }
    }

    fn token(&mut self) -> OwnerToken {
        self.owner.get_or_insert_with(OwnerToken::new).clone()
    }

    fn bump(&mut self) {
        self.mod_count.set(self.mod_count.get() + 1);
    }
}

impl<T: Clone, S> SeqChampSetMut<T, S> {
    /// Returns a fail-fast iterator over the elements, in insertion order.
    #[must_use]
    pub fn iter(&self) -> FailFast<SeqSetIter<'_, T>, ViewModCount<'_>> {
        FailFast::new(
            SeqSetIter::new(&self.root, self.size, self.first, self.last, false),
            ViewModCount::new(&self.mod_count),
        )
    }

    /// Returns a fail-fast iterator over the elements, in reverse
    /// insertion order.
    #[must_use]
    pub fn iter_rev(&self) -> FailFast<SeqSetIter<'_, T>, ViewModCount<'_>> {
        FailFast::new(
            SeqSetIter::new(&self.root, self.size, self.first, self.last, true),
            ViewModCount::new(&self.mod_count),
        )
    }

    /// Returns the oldest element.
    #[must_use]
    pub fn get_first(&self) -> Option<&T> {
        SeqSetIter::new(&self.root, self.size, self.first, self.last, false).next()
    }

    /// Returns the newest element.
    #[must_use]
    pub fn get_last(&self) -> Option<&T> {
        SeqSetIter::new(&self.root, self.size, self.first, self.last, true).next()
    }
}

// ---------------------------------------------------------------------------
// SeqChampSetMut: read operations — T: Hash + Eq
// ---------------------------------------------------------------------------

impl<T: Hash + Eq, S: BuildHasher> SeqChampSetMut<T, S> {
    /// Returns a reference to the stored element equal to `elem`.
    #[must_use]
    pub fn get(&self, elem: &T) -> Option<&T> {
        let hash = hash::hash_one(&self.hasher, elem);
        ops::find(&self.root, hash, 0, &|d: &SequencedElement<T>| {
            d.elem == *elem
        })
        .map(|d| &d.elem)
    }

    /// Returns `true` if the set contains `elem`.
    #[must_use]
    pub fn contains(&self, elem: &T) -> bool {
        self.get(elem).is_some()
    }
}

// ---------------------------------------------------------------------------
// SeqChampSetMut: write operations — T: Hash + Eq + Clone
// ---------------------------------------------------------------------------

impl<T, S> SeqChampSetMut<T, S>
where
    T: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Appends `elem`. Returns `true` if it was not yet present; a
    /// present element keeps its position.
    pub fn insert(&mut self, elem: T) -> bool {
        let hash = hash::hash_one(&self.hasher, &elem);
        let token = self.token();
        let data = SequencedElement {
            elem,
            seq: self.last,
        };
        let mut details = ChangeDetails::new();
        let hasher = &self.hasher;
        ops::update(
            Some(&token),
            &mut self.root,
            data,
            hash,
            0,
            &mut details,
            &|_: &SequencedElement<T>, _| Replacement::Keep,
            &|a: &SequencedElement<T>, b: &SequencedElement<T>| a.elem == b.elem,
            &|d: &SequencedElement<T>| hash::hash_one(hasher, &d.elem),
        );
        if details.modified {
            self.size += 1;
            self.last += 1;
            self.bump();
            self.compact();
        }
        details.modified
    }

    /// Makes `elem` the first element, moving it there if already
    /// present. Returns `true` if it was newly added.
    pub fn insert_first(&mut self, elem: T) -> bool {
        let hash = hash::hash_one(&self.hasher, &elem);
        let token = self.token();
        let data = SequencedElement {
            elem,
            seq: self.first,
        };
        let mut details = ChangeDetails::new();
        let hasher = &self.hasher;
        ops::update(
            Some(&token),
            &mut self.root,
            data,
            hash,
            0,
            &mut details,
            &|old: &SequencedElement<T>, new: SequencedElement<T>| {
                if old.seq == new.seq + 1 {
                    Replacement::Keep
                } else {
                    Replacement::Replace(new)
                }
            },
            &|a: &SequencedElement<T>, b: &SequencedElement<T>| a.elem == b.elem,
            &|d: &SequencedElement<T>| hash::hash_one(hasher, &d.elem),
        );
        if details.modified {
            if !details.updated {
                self.size += 1;
            }
            self.first -= 1;
            self.bump();
            self.compact();
        }
        details.modified && !details.updated
    }

    /// Makes `elem` the last element, moving it there if already
    /// present. Returns `true` if it was newly added.
    pub fn insert_last(&mut self, elem: T) -> bool {
        let hash = hash::hash_one(&self.hasher, &elem);
        let token = self.token();
        let data = SequencedElement {
            elem,
            seq: self.last,
        };
        let mut details = ChangeDetails::new();
        let hasher = &self.hasher;
        ops::update(
            Some(&token),
            &mut self.root,
            data,
            hash,
            0,
            &mut details,
            &|old: &SequencedElement<T>, new: SequencedElement<T>| {
                if old.seq == new.seq - 1 {
                    Replacement::Keep
                } else {
                    Replacement::Replace(new)
                }
            },
            &|a: &SequencedElement<T>, b: &SequencedElement<T>| a.elem == b.elem,
            &|d: &SequencedElement<T>| hash::hash_one(hasher, &d.elem),
        );
        if details.modified {
            if !details.updated {
                self.size += 1;
            }
            self.last += 1;
            self.bump();
            self.compact();
        }
        details.modified && !details.updated
    }

    /// Removes `elem`. Returns `true` if it was present.
    pub fn remove(&mut self, elem: &T) -> bool {
        let hash = hash::hash_one(&self.hasher, elem);
        let token = self.token();
        let mut details = ChangeDetails::new();
        ops::remove(
            Some(&token),
            &mut self.root,
            hash,
            0,
            &mut details,
            &|d: &SequencedElement<T>| d.elem == *elem,
        );
        if details.modified {
            self.size -= 1;
            self.bump();
            self.compact();
        }
        details.modified
    }

    /// Removes and returns the oldest element.
    pub fn remove_first(&mut self) -> Option<T> {
        let elem = self.get_first()?.clone();
        let hash = hash::hash_one(&self.hasher, &elem);
        let token = self.token();
        let mut details = ChangeDetails::new();
        ops::remove(
            Some(&token),
            &mut self.root,
            hash,
            0,
            &mut details,
            &|d: &SequencedElement<T>| d.elem == elem,
        );
        let old = details.old_data?;
        self.size -= 1;
        self.first = old.seq;
        self.bump();
        self.compact();
        Some(old.elem)
    }

    /// Removes and returns the newest element.
    pub fn remove_last(&mut self) -> Option<T> {
        let elem = self.get_last()?.clone();
        let hash = hash::hash_one(&self.hasher, &elem);
        let token = self.token();
        let mut details = ChangeDetails::new();
        ops::remove(
            Some(&token),
            &mut self.root,
            hash,
            0,
            &mut details,
            &|d: &SequencedElement<T>| d.elem == elem,
        );
        let old = details.old_data?;
        self.size -= 1;
        self.last = old.seq;
        self.bump();
        self.compact();
        Some(old.elem)
    }

    fn compact(&mut self) {
        if seq::must_renumber(self.size, self.first, self.last) {
            let token = self.token();
            let hasher = &self.hasher;
            let new_root = seq::renumber(
                &token,
                &self.root,
                self.size,
                &|a: &SequencedElement<T>, b: &SequencedElement<T>| a.elem == b.elem,
                &|d: &SequencedElement<T>| hash::hash_one(hasher, &d.elem),
            );
            self.root = new_root;
            self.first = -1;
            self.last = i32::try_from(self.size).expect("size exceeds sequence range");
        }
    }
}

// ---------------------------------------------------------------------------
// SeqChampSetMut: trait impls
// ---------------------------------------------------------------------------

impl<T, S: Default> Default for SeqChampSetMut<T, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<T: Clone + fmt::Debug, S> fmt::Debug for SeqChampSetMut<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> Extend<T> for SeqChampSetMut<T, S>
where
    T: Hash + Eq + Clone,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.insert(elem);
        }
    }
}

impl<T, S> FromIterator<T> for SeqChampSetMut<T, S>
where
    T: Hash + Eq + Clone,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut m = Self::with_hasher(S::default());
        m.extend(iter);
        m
    }
}

impl<'a, T: Clone, S> IntoIterator for &'a SeqChampSetMut<T, S> {
    type Item = &'a T;
    type IntoIter = FailFast<SeqSetIter<'a, T>, ViewModCount<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
