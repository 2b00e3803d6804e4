//! Persistent and transient hash sets.

use std::cell::Cell;
use std::fmt;
use std::hash::{BuildHasher, Hash, RandomState};
use std::sync::Arc;

use crate::hash;
use crate::iter::{FailFast, Iter, ViewModCount};
use crate::node::Node;
use crate::ops::{self, ChangeDetails, Replacement};
use crate::token::OwnerToken;

/// Persistent hash set on a CHAMP trie.
///
/// Every write returns a new set; the receiver is never touched, and the
/// two share all unchanged nodes. A write without effect hands back a set
/// sharing the receiver's root, observable through [`ptr_eq`](Self::ptr_eq).
pub struct ChampSet<T, S = RandomState> {
    root: Arc<Node<T>>,
    size: usize,
    hasher: S,
}

/// Mutable hash set on a CHAMP trie.
///
/// Obtained in O(1) from [`ChampSet::to_mut`]; edits nodes it created
/// itself in place and copies everything borrowed from the immutable
/// parent on first touch.
pub struct ChampSetMut<T, S = RandomState> {
    root: Arc<Node<T>>,
    size: usize,
    owner: Option<OwnerToken>,
    mod_count: Cell<u64>,
    hasher: S,
}

// ---------------------------------------------------------------------------
// ChampSet: construction & accessors — minimal bounds
// ---------------------------------------------------------------------------

impl<T> ChampSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<T, S> ChampSet<T, S> {
    /// Creates an empty set using the given hasher.
    #[must_use]
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            root: Arc::new(Node::empty()),
            size: 0,
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
    ///
    /// This is the observable form of the no-op contract: a write that
    /// changed nothing returns a set for which `ptr_eq` holds.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }

    /// Returns an iterator over the elements, in arbitrary order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root, self.size)
    }
}

impl<T, S: Clone> ChampSet<T, S> {
    /// Returns a mutable set sharing this set's trie, in O(1).
    ///
    /// The mutable set allocates its ownership token on first write, so
    /// nothing reachable from `self` is ever edited in place.
    #[must_use]
    pub fn to_mut(&self) -> ChampSetMut<T, S> {
        ChampSetMut {
            root: Arc::clone(&self.root),
            size: self.size,
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
impl<T, S> ChampSet<T, S> {
    pub(crate) fn root_node(&self) -> &Node<T> {
        &self.root
    }
}

#[cfg(test)]
impl<T, S> ChampSetMut<T, S> {
    pub(crate) fn root_node(&self) -> &Node<T> {
        &self.root
    }
}

// ---------------------------------------------------------------------------
// ChampSet: read operations — T: Hash + Eq
// ---------------------------------------------------------------------------

impl<T: Hash + Eq, S: BuildHasher> ChampSet<T, S> {
    /// Returns a reference to the stored element equal to `elem`.
    #[must_use]
    pub fn get(&self, elem: &T) -> Option<&T> {
        let hash = hash::hash_one(&self.hasher, elem);
        ops::find(&self.root, hash, 0, &|d: &T| d == elem)
    }

    /// Returns `true` if the set contains `elem`.
    #[must_use]
    pub fn contains(&self, elem: &T) -> bool {
        self.get(elem).is_some()
    }
}

// ---------------------------------------------------------------------------
// ChampSet: write operations — T: Hash + Eq + Clone
// ---------------------------------------------------------------------------

impl<T, S> ChampSet<T, S>
where
    T: Hash + Eq + Clone,
    S: BuildHasher + Clone,
{
    /// Returns a set with `elem` added.
    ///
    /// If the element is already present the receiver's root is reused.
    #[must_use]
    pub fn insert(&self, elem: T) -> Self {
        let hash = hash::hash_one(&self.hasher, &elem);
        let mut root = Arc::clone(&self.root);
        let mut details = ChangeDetails::new();
        ops::update(
            None,
            &mut root,
            elem,
            hash,
            0,
            &mut details,
            &|_: &T, _| Replacement::Keep,
            &|a: &T, b: &T| a == b,
            &|d: &T| hash::hash_one(&self.hasher, d),
        );
        if details.modified {
            Self {
                root,
                size: self.size + 1,
                hasher: self.hasher.clone(),
            }
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
        ops::remove(None, &mut root, hash, 0, &mut details, &|d: &T| d == elem);
        if details.modified {
            Self {
                root,
                size: self.size - 1,
                hasher: self.hasher.clone(),
            }
        } else {
            self.clone()
        }
    }

    /// Returns a set with every element of `iter` added.
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

    /// Returns a set keeping only the elements also contained in `other`.
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
}

// ---------------------------------------------------------------------------
// ChampSet: trait impls
// ---------------------------------------------------------------------------

impl<T, S: Clone> Clone for ChampSet<T, S> {
    fn clone(&self) -> Self {
        Self {
            root: Arc::clone(&self.root),
            size: self.size,
            hasher: self.hasher.clone(),
        }
    }
}

impl<T, S: Default> Default for ChampSet<T, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<T: fmt::Debug, S> fmt::Debug for ChampSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Hash + Eq, S: BuildHasher> PartialEq for ChampSet<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().all(|elem| other.contains(elem))
    }
}

impl<T: Hash + Eq, S: BuildHasher> Eq for ChampSet<T, S> {}

impl<T, S> FromIterator<T> for ChampSet<T, S>
where
    T: Hash + Eq + Clone,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut m = ChampSetMut::with_hasher(S::default());
        m.extend(iter);
        m.into_immutable()
    }
}

impl<'a, T, S> IntoIterator for &'a ChampSet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// ChampSetMut: construction & accessors — minimal bounds
// ---------------------------------------------------------------------------

impl<T> ChampSetMut<T> {
    /// Creates an empty mutable set.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<T, S> ChampSetMut<T, S> {
    /// Creates an empty mutable set using the given hasher.
    #[must_use]
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            root: Arc::new(Node::empty()),
            size: 0,
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

    /// Returns a fail-fast iterator over the elements, in arbitrary order.
    #[must_use]
    pub fn iter(&self) -> FailFast<Iter<'_, T>, ViewModCount<'_>> {
        FailFast::new(
            Iter::new(&self.root, self.size),
            ViewModCount::new(&self.mod_count),
        )
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.root = Arc::new(Node::empty());
        self.size = 0;
        self.bump();
    }

    /// Converts into the immutable form, in O(1).
    #[must_use]
    pub fn into_immutable(self) -> ChampSet<T, S> {
        ChampSet {
            root: self.root,
            size: self.size,
            hasher: self.hasher,
        }
    }

    /// Publishes an immutable snapshot, in O(1).
    ///
    /// The ownership token is discarded, so writes after this call copy
    /// instead of editing nodes the snapshot can reach.
    #[must_use]
    pub fn to_immutable(&mut self) -> ChampSet<T, S>
    where
        S: Clone,
    {
        self.owner = None;
        ChampSet {
            root: Arc::clone(&self.root),
            size: self.size,
            hasher: self.hasher.clone(),
        }
    }

    /// Returns the token writes run under, allocating it on first use.
    fn token(&mut self) -> OwnerToken {
        self.owner.get_or_insert_with(OwnerToken::new).clone()
    }

    fn bump(&mut self) {
        self.mod_count.set(self.mod_count.get() + 1);
    }
}

// ---------------------------------------------------------------------------
// ChampSetMut: read operations — T: Hash + Eq
// ---------------------------------------------------------------------------

impl<T: Hash + Eq, S: BuildHasher> ChampSetMut<T, S> {
    /// Returns a reference to the stored element equal to `elem`.
    #[must_use]
    pub fn get(&self, elem: &T) -> Option<&T> {
        let hash = hash::hash_one(&self.hasher, elem);
        ops::find(&self.root, hash, 0, &|d: &T| d == elem)
    }

    /// Returns `true` if the set contains `elem`.
    #[must_use]
    pub fn contains(&self, elem: &T) -> bool {
        self.get(elem).is_some()
    }
}

// ---------------------------------------------------------------------------
// ChampSetMut: write operations — T: Hash + Eq + Clone
// ---------------------------------------------------------------------------

impl<T, S> ChampSetMut<T, S>
where
    T: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Adds `elem` to the set. Returns `true` if it was not yet present.
    pub fn insert(&mut self, elem: T) -> bool {
        let hash = hash::hash_one(&self.hasher, &elem);
        let token = self.token();
        let mut details = ChangeDetails::new();
        let hasher = &self.hasher;
        ops::update(
            Some(&token),
            &mut self.root,
            elem,
            hash,
            0,
            &mut details,
            &|_: &T, _| Replacement::Keep,
            &|a: &T, b: &T| a == b,
            &|d: &T| hash::hash_one(hasher, d),
        );
        if details.modified {
            self.size += 1;
            self.bump();
        }
        details.modified
    }

    /// Removes `elem` from the set. Returns `true` if it was present.
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
            &|d: &T| d == elem,
        );
        if details.modified {
            self.size -= 1;
            self.bump();
        }
        details.modified
    }
}

// ---------------------------------------------------------------------------
// ChampSetMut: trait impls
// ---------------------------------------------------------------------------

impl<T, S: Default> Default for ChampSetMut<T, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<T: fmt::Debug, S> fmt::Debug for ChampSetMut<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> Extend<T> for ChampSetMut<T, S>
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

impl<T, S> FromIterator<T> for ChampSetMut<T, S>
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

impl<'a, T, S> IntoIterator for &'a ChampSetMut<T, S> {
    type Item = &'a T;
    type IntoIter = FailFast<Iter<'a, T>, ViewModCount<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
