//! Persistent and transient hash maps.

use std::cell::Cell;
use std::fmt;
use std::hash::{BuildHasher, Hash, RandomState};
use std::ops::Index;
use std::sync::Arc;

use crate::hash;
use crate::iter::{FailFast, MapIter, ViewModCount};
use crate::node::Node;
use crate::ops::{self, ChangeDetails, Replacement};
use crate::token::OwnerToken;

/// A key-value pair stored inline in the trie.
///
/// Hashing and equality see only the key; the value rides along.
#[derive(Clone, Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

/// Persistent hash map on a CHAMP trie.
///
/// Every write returns a new map sharing all unchanged nodes with the
/// receiver. A write without effect hands back a map sharing the
/// receiver's root, observable through [`ptr_eq`](Self::ptr_eq).
pub struct ChampMap<K, V, S = RandomState> {
    root: Arc<Node<Entry<K, V>>>,
    size: usize,
    hasher: S,
}

/// Mutable hash map on a CHAMP trie.
///
/// Obtained in O(1) from [`ChampMap::to_mut`]; edits nodes it created
/// itself in place and copies everything borrowed from the immutable
/// parent on first touch.
pub struct ChampMapMut<K, V, S = RandomState> {
    root: Arc<Node<Entry<K, V>>>,
    size: usize,
    owner: Option<OwnerToken>,
    mod_count: Cell<u64>,
    hasher: S,
}

// ---------------------------------------------------------------------------
// ChampMap: construction & accessors — minimal bounds
// ---------------------------------------------------------------------------

impl<K, V> ChampMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<K, V, S> ChampMap<K, V, S> {
    /// Creates an empty map using the given hasher.
    #[must_use]
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            root: Arc::new(Node::empty()),
            size: 0,
            hasher,
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns `true` if both maps share one trie root.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }

    /// Returns an iterator over `(&K, &V)` pairs, in arbitrary order.
    #[must_use]
    pub fn iter(&self) -> MapIter<'_, K, V> {
        MapIter::new(&self.root, self.size)
    }
}

impl<K, V, S: Clone> ChampMap<K, V, S> {
    /// Returns a mutable map sharing this map's trie, in O(1).
    #[must_use]
    pub fn to_mut(&self) -> ChampMapMut<K, V, S> {
        ChampMapMut {
            root: Arc::clone(&self.root),
            size: self.size,
            owner: None,
            mod_count: Cell::new(0),
            hasher: self.hasher.clone(),
        }
    }

    /// Returns an empty map with this map's hasher.
    #[must_use]
    pub fn clear(&self) -> Self {
        Self::with_hasher(self.hasher.clone())
    }
}

// ---------------------------------------------------------------------------
// ChampMap: read operations — K: Hash + Eq
// ---------------------------------------------------------------------------

impl<K: Hash + Eq, V, S: BuildHasher> ChampMap<K, V, S> {
    /// Returns a reference to the value associated with `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let hash = hash::hash_one(&self.hasher, key);
        ops::find(&self.root, hash, 0, &|e: &Entry<K, V>| e.key == *key).map(|e| &e.value)
    }

    /// Returns the stored key-value pair for `key`.
    #[must_use]
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let hash = hash::hash_one(&self.hasher, key);
        ops::find(&self.root, hash, 0, &|e: &Entry<K, V>| e.key == *key).map(|e| (&e.key, &e.value))
    }

    /// Returns `true` if the map contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }
}

// ---------------------------------------------------------------------------
// ChampMap: write operations — K: Hash + Eq + Clone, V: Clone
// ---------------------------------------------------------------------------

impl<K, V, S> ChampMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    /// Returns a map with `key` bound to `value`.
    ///
    /// An existing binding for the key is replaced.
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        let hash = hash::hash_one(&self.hasher, &key);
        let mut root = Arc::clone(&self.root);
        let mut details = ChangeDetails::new();
        ops::update(
            None,
            &mut root,
            Entry { key, value },
            hash,
            0,
            &mut details,
            &|_: &Entry<K, V>, new| Replacement::Replace(new),
            &|a: &Entry<K, V>, b: &Entry<K, V>| a.key == b.key,
            &|e: &Entry<K, V>| hash::hash_one(&self.hasher, &e.key),
        );
        Self {
            root,
            size: self.size + usize::from(!details.updated),
            hasher: self.hasher.clone(),
        }
    }

    /// Returns a map with the binding for `key` removed.
    ///
    /// If the key is absent the receiver's root is reused.
    #[must_use]
    pub fn remove(&self, key: &K) -> Self {
        let hash = hash::hash_one(&self.hasher, key);
        let mut root = Arc::clone(&self.root);
        let mut details = ChangeDetails::new();
        ops::remove(None, &mut root, hash, 0, &mut details, &|e: &Entry<K, V>| {
            e.key == *key
        });
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

    /// Returns a map with every pair of `iter` inserted.
    #[must_use]
    pub fn insert_all<I: IntoIterator<Item = (K, V)>>(&self, iter: I) -> Self {
        let mut m = self.to_mut();
        let mut changed = false;
        for (key, value) in iter {
            m.insert(key, value);
            changed = true;
        }
        if changed { m.into_immutable() } else { self.clone() }
    }

    /// Returns a map with the bindings for every key of `iter` removed.
    #[must_use]
    pub fn remove_all<'a, I: IntoIterator<Item = &'a K>>(&self, iter: I) -> Self
    where
        K: 'a,
    {
        let mut m = self.to_mut();
        let mut changed = false;
        for key in iter {
            changed |= m.remove(key).is_some();
        }
        if changed { m.into_immutable() } else { self.clone() }
    }
}

// ---------------------------------------------------------------------------
// ChampMap: trait impls
// ---------------------------------------------------------------------------

impl<K, V, S: Clone> Clone for ChampMap<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            root: Arc::clone(&self.root),
            size: self.size,
            hasher: self.hasher.clone(),
        }
    }
}

impl<K, V, S: Default> Default for ChampMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ChampMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> PartialEq for ChampMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S> Eq for ChampMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> FromIterator<(K, V)> for ChampMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = ChampMapMut::with_hasher(S::default());
        m.extend(iter);
        m.into_immutable()
    }
}

impl<K, V, S> Index<&K> for ChampMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Output = V;

    fn index(&self, key: &K) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChampMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = MapIter<'a, K, V>;

    fn into_iter(self) -> MapIter<'a, K, V> {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// ChampMapMut: construction & accessors — minimal bounds
// ---------------------------------------------------------------------------

impl<K, V> ChampMapMut<K, V> {
    /// Creates an empty mutable map.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<K, V, S> ChampMapMut<K, V, S> {
    /// Creates an empty mutable map using the given hasher.
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

    /// Returns the number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns a fail-fast iterator over `(&K, &V)` pairs, in arbitrary
    /// order.
    #[must_use]
    pub fn iter(&self) -> FailFast<MapIter<'_, K, V>, ViewModCount<'_>> {
        FailFast::new(
            MapIter::new(&self.root, self.size),
            ViewModCount::new(&self.mod_count),
        )
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.root = Arc::new(Node::empty());
        self.size = 0;
        self.bump();
    }

    /// Converts into the immutable form, in O(1).
    #[must_use]
    pub fn into_immutable(self) -> ChampMap<K, V, S> {
        ChampMap {
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
    pub fn to_immutable(&mut self) -> ChampMap<K, V, S>
    where
        S: Clone,
    {
        self.owner = None;
        ChampMap {
            root: Arc::clone(&self.root),
            size: self.size,
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

// ---------------------------------------------------------------------------
// ChampMapMut: read operations — K: Hash + Eq
// ---------------------------------------------------------------------------

impl<K: Hash + Eq, V, S: BuildHasher> ChampMapMut<K, V, S> {
    /// Returns a reference to the value associated with `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let hash = hash::hash_one(&self.hasher, key);
        ops::find(&self.root, hash, 0, &|e: &Entry<K, V>| e.key == *key).map(|e| &e.value)
    }

    /// Returns `true` if the map contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }
}

// ---------------------------------------------------------------------------
// ChampMapMut: write operations — K: Hash + Eq + Clone, V: Clone
// ---------------------------------------------------------------------------

impl<K, V, S> ChampMapMut<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    /// Binds `key` to `value`.
    ///
    /// Returns the previously bound value, or `None` if the key was new.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = hash::hash_one(&self.hasher, &key);
        let token = self.token();
        let mut details = ChangeDetails::new();
        let hasher = &self.hasher;
        ops::update(
            Some(&token),
            &mut self.root,
            Entry { key, value },
            hash,
            0,
            &mut details,
            &|_: &Entry<K, V>, new| Replacement::Replace(new),
            &|a: &Entry<K, V>, b: &Entry<K, V>| a.key == b.key,
            &|e: &Entry<K, V>| hash::hash_one(hasher, &e.key),
        );
        if !details.updated {
            self.size += 1;
        }
        self.bump();
        details.old_data.map(|e| e.value)
    }

    /// Removes the binding for `key`. Returns the removed value, or
    /// `None` if the key was absent.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let hash = hash::hash_one(&self.hasher, key);
        let token = self.token();
        let mut details = ChangeDetails::new();
        ops::remove(
            Some(&token),
            &mut self.root,
            hash,
            0,
            &mut details,
            &|e: &Entry<K, V>| e.key == *key,
        );
        if details.modified {
            self.size -= 1;
            self.bump();
        }
        details.old_data.map(|e| e.value)
    }
}

// ---------------------------------------------------------------------------
// ChampMapMut: trait impls
// ---------------------------------------------------------------------------

impl<K, V, S: Default> Default for ChampMapMut<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ChampMapMut<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Extend<(K, V)> for ChampMapMut<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ChampMapMut<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Self::with_hasher(S::default());
        m.extend(iter);
        m
    }
}

impl<K, V, S> Index<&K> for ChampMapMut<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Output = V;

    fn index(&self, key: &K) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChampMapMut<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = FailFast<MapIter<'a, K, V>, ViewModCount<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
