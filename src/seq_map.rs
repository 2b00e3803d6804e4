//! Persistent and transient hash maps iterated in insertion order.
//!
//! Entries are stored wrapped in a sequence number; `first` and `last`
//! delimit the assigned range. `insert` keeps an existing key at its
//! position while replacing the value; `insert_first` and `insert_last`
//! move the entry.

use std::cell::Cell;
use std::fmt;
use std::hash::{BuildHasher, Hash, RandomState};
use std::ops::Index;
use std::sync::Arc;

use crate::hash;
use crate::iter::{FailFast, ViewModCount};
use crate::node::Node;
use crate::ops::{self, ChangeDetails, Replacement};
use crate::seq::{self, SequencedEntry};
use crate::seq_iter::SeqMapIter;
use crate::token::OwnerToken;

/// Persistent hash map iterated in insertion order.
///
/// Every write returns a new map sharing all unchanged nodes with the
/// receiver.
pub struct SeqChampMap<K, V, S = RandomState> {
    root: Arc<Node<SequencedEntry<K, V>>>,
    size: usize,
    first: i32,
    last: i32,
    hasher: S,
}

/// Mutable hash map iterated in insertion order.
///
/// Obtained in O(1) from [`SeqChampMap::to_mut`].
pub struct SeqChampMapMut<K, V, S = RandomState> {
    root: Arc<Node<SequencedEntry<K, V>>>,
    size: usize,
    first: i32,
    last: i32,
    owner: Option<OwnerToken>,
    mod_count: Cell<u64>,
    hasher: S,
}

// ---------------------------------------------------------------------------
// SeqChampMap: construction & accessors — minimal bounds
// ---------------------------------------------------------------------------

impl<K, V> SeqChampMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<K, V, S> SeqChampMap<K, V, S> {
    /// Creates an empty map using the given hasher.
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
}

impl<K: Clone, V: Clone, S> SeqChampMap<K, V, S> {
    /// Returns an iterator over `(&K, &V)` pairs, in insertion order.
    #[must_use]
    pub fn iter(&self) -> SeqMapIter<'_, K, V> {
        SeqMapIter::new(&self.root, self.size, self.first, self.last, false)
    }

    /// Returns an iterator over `(&K, &V)` pairs, in reverse insertion
    /// order.
    #[must_use]
    pub fn iter_rev(&self) -> SeqMapIter<'_, K, V> {
        SeqMapIter::new(&self.root, self.size, self.first, self.last, true)
    }

    /// Returns the oldest entry.
    #[must_use]
    pub fn get_first(&self) -> Option<(&K, &V)> {
        self.iter().next()
    }

    /// Returns the newest entry.
    #[must_use]
    pub fn get_last(&self) -> Option<(&K, &V)> {
        self.iter_rev().next()
    }
}

impl<K, V, S: Clone> SeqChampMap<K, V, S> {
    /// Returns a mutable map sharing this map's trie, in O(1).
    #[must_use]
    pub fn to_mut(&self) -> SeqChampMapMut<K, V, S> {
        SeqChampMapMut {
            root: Arc::clone(&self.root),
            size: self.size,
            first: self.first,
            last: self.last,
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
// SeqChampMap: read operations — K: Hash + Eq
// ---------------------------------------------------------------------------

impl<K: Hash + Eq, V, S: BuildHasher> SeqChampMap<K, V, S> {
    /// Returns a reference to the value associated with `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let hash = hash::hash_one(&self.hasher, key);
        ops::find(&self.root, hash, 0, &|e: &SequencedEntry<K, V>| {
            e.key == *key
        })
        .map(|e| &e.value)
    }

    /// Returns `true` if the map contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }
}

// ---------------------------------------------------------------------------
// SeqChampMap: write operations — K: Hash + Eq + Clone, V: Clone
// ---------------------------------------------------------------------------

impl<K, V, S> SeqChampMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    /// Returns a map with `key` bound to `value`.
    ///
    /// An existing key keeps its position; only its value is replaced.
    /// A new key is appended.
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        let hash = hash::hash_one(&self.hasher, &key);
        let data = SequencedEntry {
            key,
            value,
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
            &|old: &SequencedEntry<K, V>, new: SequencedEntry<K, V>| {
                Replacement::Replace(SequencedEntry {
                    key: new.key,
                    value: new.value,
                    seq: old.seq,
                })
            },
            &|a: &SequencedEntry<K, V>, b: &SequencedEntry<K, V>| a.key == b.key,
            &|e: &SequencedEntry<K, V>| hash::hash_one(hasher, &e.key),
        );
        let mut out = Self {
            root,
            size: self.size + usize::from(!details.updated),
            first: self.first,
            last: self.last + i32::from(!details.updated),
            hasher: self.hasher.clone(),
        };
        out.compact();
        out
    }

    /// Returns a map with `key` bound to `value` as its first entry,
    /// moving the entry there if the key is already present.
    #[must_use]
    pub fn insert_first(&self, key: K, value: V) -> Self
    where
        V: PartialEq,
    {
        let hash = hash::hash_one(&self.hasher, &key);
        let data = SequencedEntry {
            key,
            value,
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
            // Already the first entry with this value: nothing moves.
            &|old: &SequencedEntry<K, V>, new: SequencedEntry<K, V>| {
                if old.seq == new.seq + 1 && old.value == new.value {
                    Replacement::Keep
                } else {
                    Replacement::Replace(new)
                }
            },
            &|a: &SequencedEntry<K, V>, b: &SequencedEntry<K, V>| a.key == b.key,
            &|e: &SequencedEntry<K, V>| hash::hash_one(hasher, &e.key),
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

    /// Returns a map with `key` bound to `value` as its last entry,
    /// moving the entry there if the key is already present.
    #[must_use]
    pub fn insert_last(&self, key: K, value: V) -> Self
    where
        V: PartialEq,
    {
        let hash = hash::hash_one(&self.hasher, &key);
        let data = SequencedEntry {
            key,
            value,
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
            // Already the last entry with this value: nothing moves.
            &|old: &SequencedEntry<K, V>, new: SequencedEntry<K, V>| {
                if old.seq == new.seq - 1 && old.value == new.value {
                    Replacement::Keep
                } else {
                    Replacement::Replace(new)
                }
            },
            &|a: &SequencedEntry<K, V>, b: &SequencedEntry<K, V>| a.key == b.key,
            &|e: &SequencedEntry<K, V>| hash::hash_one(hasher, &e.key),
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

    /// Returns a map with the binding for `key` removed.
    ///
    /// If the key is absent the receiver's root is reused.
    #[must_use]
    pub fn remove(&self, key: &K) -> Self {
        let hash = hash::hash_one(&self.hasher, key);
        let mut root = Arc::clone(&self.root);
        let mut details = ChangeDetails::new();
        ops::remove(None, &mut root, hash, 0, &mut details, &|e: &SequencedEntry<K, V>| {
            e.key == *key
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

    /// Returns a map with the oldest entry removed, or `None` if empty.
    #[must_use]
    pub fn remove_first(&self) -> Option<Self> {
        let key = self.get_first()?.0.clone();
        let hash = hash::hash_one(&self.hasher, &key);
        let mut root = Arc::clone(&self.root);
        let mut details = ChangeDetails::new();
        ops::remove(None, &mut root, hash, 0, &mut details, &|e: &SequencedEntry<K, V>| {
            e.key == key
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

    /// Returns a map with the newest entry removed, or `None` if empty.
    #[must_use]
    pub fn remove_last(&self) -> Option<Self> {
        let key = self.get_last()?.0.clone();
        let hash = hash::hash_one(&self.hasher, &key);
        let mut root = Arc::clone(&self.root);
        let mut details = ChangeDetails::new();
        ops::remove(None, &mut root, hash, 0, &mut details, &|e: &SequencedEntry<K, V>| {
            e.key == key
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

    /// Returns a map with every pair of `iter` inserted in order.
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

    fn compact(&mut self) {
        if seq::must_renumber(self.size, self.first, self.last) {
            let token = OwnerToken::new();
            let hasher = &self.hasher;
            let new_root = seq::renumber(
                &token,
                &self.root,
                self.size,
                &|a: &SequencedEntry<K, V>, b: &SequencedEntry<K, V>| a.key == b.key,
                &|e: &SequencedEntry<K, V>| hash::hash_one(hasher, &e.key),
            );
            self.root = new_root;
            self.first = -1;
            self.last = i32::try_from(self.size).expect("size exceeds sequence range");
        }
    }
}

// ---------------------------------------------------------------------------
// SeqChampMap: trait impls
// ---------------------------------------------------------------------------

impl<K, V, S: Clone> Clone for SeqChampMap<K, V, S> {
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

impl<K, V, S: Default> Default for SeqChampMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> fmt::Debug for SeqChampMap<K, V, S>
where
    K: Clone + fmt::Debug,
    V: Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> PartialEq for SeqChampMap<K, V, S>
where
    K: Clone + PartialEq,
    V: Clone + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<K, V, S> Eq for SeqChampMap<K, V, S>
where
    K: Clone + Eq,
    V: Clone + Eq,
{
}

impl<K, V, S> FromIterator<(K, V)> for SeqChampMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = SeqChampMapMut::with_hasher(S::default());
        m.extend(iter);
        m.into_immutable()
    }
}

impl<K, V, S> Index<&K> for SeqChampMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Output = V;

    fn index(&self, key: &K) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<'a, K: Clone, V: Clone, S> IntoIterator for &'a SeqChampMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = SeqMapIter<'a, K, V>;

    fn into_iter(self) -> SeqMapIter<'a, K, V> {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// SeqChampMapMut: construction & accessors — minimal bounds
// ---------------------------------------------------------------------------

impl<K, V> SeqChampMapMut<K, V> {
    /// Creates an empty mutable map.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<K, V, S> SeqChampMapMut<K, V, S> {
    /// Creates an empty mutable map using the given hasher.
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

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.root = Arc::new(Node::empty());
        self.size = 0;
        self.first = -1;
        self.last = 0;
        self.bump();
    }

    /// Converts into the immutable form, in O(1).
    #[must_use]
    pub fn into_immutable(self) -> SeqChampMap<K, V, S> {
        SeqChampMap {
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
    pub fn to_immutable(&mut self) -> SeqChampMap<K, V, S>
    where
        S: Clone,
    {
        self.owner = None;
        SeqChampMap {
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

impl<K: Clone, V: Clone, S> SeqChampMapMut<K, V, S> {
    /// Returns a fail-fast iterator over `(&K, &V)` pairs, in insertion
    /// order.
    #[must_use]
    pub fn iter(&self) -> FailFast<SeqMapIter<'_, K, V>, ViewModCount<'_>> {
        FailFast::new(
            SeqMapIter::new(&self.root, self.size, self.first, self.last, false),
            ViewModCount::new(&self.mod_count),
        )
    }

    /// Returns a fail-fast iterator over `(&K, &V)` pairs, in reverse
    /// insertion order.
    #[must_use]
    pub fn iter_rev(&self) -> FailFast<SeqMapIter<'_, K, V>, ViewModCount<'_>> {
        FailFast::new(
            SeqMapIter::new(&self.root, self.size, self.first, self.last, true),
            ViewModCount::new(&self.mod_count),
        )
    }

    /// Returns the oldest entry.
    #[must_use]
    pub fn get_first(&self) -> Option<(&K, &V)> {
        SeqMapIter::new(&self.root, self.size, self.first, self.last, false).next()
    }

    /// Returns the newest entry.
    #[must_use]
    pub fn get_last(&self) -> Option<(&K, &V)> {
        SeqMapIter::new(&self.root, self.size, self.first, self.last, true).next()
    }
}

// ---------------------------------------------------------------------------
// SeqChampMapMut: read operations — K: Hash + Eq
// ---------------------------------------------------------------------------

impl<K: Hash + Eq, V, S: BuildHasher> SeqChampMapMut<K, V, S> {
    /// Returns a reference to the value associated with `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let hash = hash::hash_one(&self.hasher, key);
        ops::find(&self.root, hash, 0, &|e: &SequencedEntry<K, V>| {
            e.key == *key
        })
        .map(|e| &e.value)
    }

    /// Returns `true` if the map contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }
}

// ---------------------------------------------------------------------------
// SeqChampMapMut: write operations — K: Hash + Eq + Clone, V: Clone
// ---------------------------------------------------------------------------

impl<K, V, S> SeqChampMapMut<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    /// Binds `key` to `value`.
    ///
    /// An existing key keeps its position; only its value is replaced.
    /// A new key is appended. Returns the previously bound value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = hash::hash_one(&self.hasher, &key);
        let token = self.token();
        let data = SequencedEntry {
            key,
            value,
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
            &|old: &SequencedEntry<K, V>, new: SequencedEntry<K, V>| {
                Replacement::Replace(SequencedEntry {
                    key: new.key,
                    value: new.value,
                    seq: old.seq,
                })
            },
            &|a: &SequencedEntry<K, V>, b: &SequencedEntry<K, V>| a.key == b.key,
            &|e: &SequencedEntry<K, V>| hash::hash_one(hasher, &e.key),
        );
        if !details.updated {
            self.size += 1;
            self.last += 1;
        }
        self.bump();
        self.compact();
        details.old_data.map(|e| e.value)
    }

    /// Binds `key` to `value` as the first entry, moving the entry there
    /// if the key is already present. Returns the previously bound value.
    pub fn insert_first(&mut self, key: K, value: V) -> Option<V>
    where
        V: PartialEq,
    {
        let hash = hash::hash_one(&self.hasher, &key);
        let token = self.token();
        let data = SequencedEntry {
            key,
            value,
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
            &|old: &SequencedEntry<K, V>, new: SequencedEntry<K, V>| {
                if old.seq == new.seq + 1 && old.value == new.value {
                    Replacement::Keep
                } else {
                    Replacement::Replace(new)
                }
            },
            &|a: &SequencedEntry<K, V>, b: &SequencedEntry<K, V>| a.key == b.key,
            &|e: &SequencedEntry<K, V>| hash::hash_one(hasher, &e.key),
        );
        if details.modified {
            if !details.updated {
                self.size += 1;
            }
            self.first -= 1;
            self.bump();
            self.compact();
        }
        details.old_data.map(|e| e.value)
    }

    /// Binds `key` to `value` as the last entry, moving the entry there
    /// if the key is already present. Returns the previously bound value.
    pub fn insert_last(&mut self, key: K, value: V) -> Option<V>
    where
        V: PartialEq,
    {
        let hash = hash::hash_one(&self.hasher, &key);
        let token = self.token();
        let data = SequencedEntry {
            key,
            value,
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
            &|old: &SequencedEntry<K, V>, new: SequencedEntry<K, V>| {
                if old.seq == new.seq - 1 && old.value == new.value {
                    Replacement::Keep
                } else {
                    Replacement::Replace(new)
                }
            },
            &|a: &SequencedEntry<K, V>, b: &SequencedEntry<K, V>| a.key == b.key,
            &|e: &SequencedEntry<K, V>| hash::hash_one(hasher, &e.key),
        );
        if details.modified {
            if !details.updated {
                self.size += 1;
            }
            self.last += 1;
            self.bump();
            self.compact();
        }
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
            &|e: &SequencedEntry<K, V>| e.key == *key,
        );
        if details.modified {
            self.size -= 1;
            self.bump();
            self.compact();
        }
        details.old_data.map(|e| e.value)
    }

    /// Removes and returns the oldest entry.
    pub fn remove_first(&mut self) -> Option<(K, V)> {
        let key = self.get_first()?.0.clone();
        let hash = hash::hash_one(&self.hasher, &key);
        let token = self.token();
        let mut details = ChangeDetails::new();
        ops::remove(
            Some(&token),
            &mut self.root,
            hash,
            0,
            &mut details,
            &|e: &SequencedEntry<K, V>| e.key == key,
        );
        let old = details.old_data?;
        self.size -= 1;
        self.first = old.seq;
        self.bump();
        self.compact();
        Some((old.key, old.value))
    }

    /// Removes and returns the newest entry.
    pub fn remove_last(&mut self) -> Option<(K, V)> {
        let key = self.get_last()?.0.clone();
        let hash = hash::hash_one(&self.hasher, &key);
        let token = self.token();
        let mut details = ChangeDetails::new();
        ops::remove(
            Some(&token),
            &mut self.root,
            hash,
            0,
            &mut details,
            &|e: &SequencedEntry<K, V>| e.key == key,
        );
        let old = details.old_data?;
        self.size -= 1;
        self.last = old.seq;
        self.bump();
        self.compact();
        Some((old.key, old.value))
    }

    fn compact(&mut self) {
        if seq::must_renumber(self.size, self.first, self.last) {
            let token = self.token();
            let hasher = &self.hasher;
            let new_root = seq::renumber(
                &token,
                &self.root,
                self.size,
                &|a: &SequencedEntry<K, V>, b: &SequencedEntry<K, V>| a.key == b.key,
                &|e: &SequencedEntry<K, V>| hash::hash_one(hasher, &e.key),
            );
            self.root = new_root;
            self.first = -1;
            self.last = i32::try_from(self.size).expect("size exceeds sequence range");
        }
    }
}

// ---------------------------------------------------------------------------
// SeqChampMapMut: trait impls
// ---------------------------------------------------------------------------

impl<K, V, S: Default> Default for SeqChampMapMut<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> fmt::Debug for SeqChampMapMut<K, V, S>
where
    K: Clone + fmt::Debug,
    V: Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Extend<(K, V)> for SeqChampMapMut<K, V, S>
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

impl<K, V, S> FromIterator<(K, V)> for SeqChampMapMut<K, V, S>
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

impl<K, V, S> Index<&K> for SeqChampMapMut<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Output = V;

    fn index(&self, key: &K) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<'a, K: Clone, V: Clone, S> IntoIterator for &'a SeqChampMapMut<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = FailFast<SeqMapIter<'a, K, V>, ViewModCount<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
