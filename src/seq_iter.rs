//! Insertion-order iteration for the sequenced variants.
//!
//! Two strategies, picked once per traversal from the view's counters:
//! a bucket sort over the sequence range when the numbers are dense, and
//! a binary heap as the safety net when they are not.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::iter::FusedIterator;

use crate::iter::Iter;
use crate::node::Node;
use crate::seq::{SequencedData, SequencedElement, SequencedEntry};

/// Sequence-ordered iterator over the data of a sequenced trie.
pub(crate) struct SeqIter<'a, D> {
    inner: Inner<'a, D>,
}

enum Inner<'a, D> {
    Bucket(BucketIter<'a, D>),
    Heap(HeapIter<'a, D>),
}

impl<'a, D: SequencedData> SeqIter<'a, D> {
    /// Chooses the strategy from the view's counters: the bucket sort
    /// requires the range to stay below half the sequence space and
    /// within four times the element count.
    pub(crate) fn new(
        root: &'a Node<D>,
        size: usize,
        first: i32,
        last: i32,
        reversed: bool,
    ) -> Self {
        let extent = i64::from(last) - i64::from(first);
        let bound = i64::try_from(size).unwrap_or(i64::MAX).saturating_mul(4);
        let inner = if extent <= i64::from(i32::MAX / 2) && extent <= bound {
            Inner::Bucket(BucketIter::new(root, size, first, extent, reversed))
        } else {
            Inner::Heap(HeapIter::new(root, size, reversed))
        };
        Self { inner }
    }
}

impl<'a, D> Iterator for SeqIter<'a, D> {
    type Item = &'a D;

    fn next(&mut self) -> Option<&'a D> {
        match &mut self.inner {
            Inner::Bucket(it) => it.next(),
            Inner::Heap(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match &self.inner {
            Inner::Bucket(it) => it.remaining,
            Inner::Heap(it) => it.heap.len(),
        };
        (remaining, Some(remaining))
    }
}

impl<D> ExactSizeIterator for SeqIter<'_, D> {}

impl<D> FusedIterator for SeqIter<'_, D> {}

// ---------------------------------------------------------------------------
// Bucket strategy
// ---------------------------------------------------------------------------

/// One trie pass drops every datum into the slot `seq - first`; iteration
/// then walks the slots in either direction, O(1) per datum.
struct BucketIter<'a, D> {
    slots: Vec<Option<&'a D>>,
    pos: usize,
    remaining: usize,
    reversed: bool,
}

impl<'a, D: SequencedData> BucketIter<'a, D> {
    fn new(root: &'a Node<D>, size: usize, first: i32, extent: i64, reversed: bool) -> Self {
        let len = usize::try_from(extent).expect("dense sequence range fits in memory");
        let mut slots = vec![None; len];
        for datum in Iter::new(root, size) {
            let offset = i64::from(datum.seq()) - i64::from(first);
            let idx = usize::try_from(offset).expect("sequence number within range");
            slots[idx] = Some(datum);
        }
        Self {
            slots,
            pos: 0,
            remaining: size,
            reversed,
        }
    }
}

impl<'a, D> Iterator for BucketIter<'a, D> {
    type Item = &'a D;

    fn next(&mut self) -> Option<&'a D> {
        if self.remaining == 0 {
            return None;
        }
        loop {
            let idx = if self.reversed {
                self.slots.len() - 1 - self.pos
            } else {
                self.pos
            };
            self.pos += 1;
            if let Some(datum) = self.slots[idx] {
                self.remaining -= 1;
                return Some(datum);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Heap strategy
// ---------------------------------------------------------------------------

/// Min-heap entry; reverse traversal negates the key so the same heap
/// order serves both directions.
struct HeapEntry<'a, D> {
    key: i64,
    datum: &'a D,
}

impl<D> PartialEq for HeapEntry<'_, D> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<D> Eq for HeapEntry<'_, D> {}

impl<D> PartialOrd for HeapEntry<'_, D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<D> Ord for HeapEntry<'_, D> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Inverted so the max-heap pops the smallest key first.
        other.key.cmp(&self.key)
    }
}

struct HeapIter<'a, D> {
    heap: BinaryHeap<HeapEntry<'a, D>>,
}

impl<'a, D: SequencedData> HeapIter<'a, D> {
    fn new(root: &'a Node<D>, size: usize, reversed: bool) -> Self {
        let mut heap = BinaryHeap::with_capacity(size);
        for datum in Iter::new(root, size) {
            let seq = i64::from(datum.seq());
            let key = if reversed { -seq } else { seq };
            heap.push(HeapEntry { key, datum });
        }
        Self { heap }
    }
}

impl<'a, D> Iterator for HeapIter<'a, D> {
    type Item = &'a D;

    fn next(&mut self) -> Option<&'a D> {
        self.heap.pop().map(|e| e.datum)
    }
}

// ---------------------------------------------------------------------------
// Public adapters
// ---------------------------------------------------------------------------

/// Iterator over a sequenced set, in insertion order (or reversed).
pub struct SeqSetIter<'a, T> {
    inner: SeqIter<'a, SequencedElement<T>>,
}

impl<'a, T: Clone> SeqSetIter<'a, T> {
    pub(crate) fn new(
        root: &'a Node<SequencedElement<T>>,
        size: usize,
        first: i32,
        last: i32,
        reversed: bool,
    ) -> Self {
        Self {
            inner: SeqIter::new(root, size, first, last, reversed),
        }
    }
}

impl<'a, T> Iterator for SeqSetIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|d| &d.elem)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for SeqSetIter<'_, T> {}

impl<T> FusedIterator for SeqSetIter<'_, T> {}

/// Iterator over a sequenced map, in insertion order (or reversed).
pub struct SeqMapIter<'a, K, V> {
    inner: SeqIter<'a, SequencedEntry<K, V>>,
}

impl<'a, K: Clone, V: Clone> SeqMapIter<'a, K, V> {
    pub(crate) fn new(
        root: &'a Node<SequencedEntry<K, V>>,
        size: usize,
        first: i32,
        last: i32,
        reversed: bool,
    ) -> Self {
        Self {
            inner: SeqIter::new(root, size, first, last, reversed),
        }
    }
}

impl<'a, K, V> Iterator for SeqMapIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next().map(|d| (&d.key, &d.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for SeqMapIter<'_, K, V> {}

impl<K, V> FusedIterator for SeqMapIter<'_, K, V> {}
