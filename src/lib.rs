//! Persistent and transient collections based on CHAMP.
//!
//! CHAMP (Compressed Hash-Array Mapped Prefix-tree) is a refined HAMT in
//! which every node stores only its occupied slots, indexed through two
//! disjoint bitmaps. On top of one shared trie engine this crate provides
//! four collection families, each in an immutable (persistent) and a
//! mutable (transient) form:
//!
//! - [`ChampSet`] / [`ChampSetMut`] — hash set, arbitrary iteration order
//! - [`ChampMap`] / [`ChampMapMut`] — hash map, arbitrary iteration order
//! - [`SeqChampSet`] / [`SeqChampSetMut`] — hash set iterated in insertion order
//! - [`SeqChampMap`] / [`SeqChampMapMut`] — hash map iterated in insertion order
//!
//! # Key properties
//!
//! - **Structural sharing**: deriving one collection from another copies
//!   only the path from the root to the changed slot
//! - **O(1) hand-off**: converting between the immutable and mutable form
//!   never copies the trie
//! - **Mutate-on-write**: a mutable view edits nodes it exclusively owns
//!   in place, identified by an allocation-unique ownership token
//! - **Insertion order**: the sequenced variants tag each element with a
//!   sequence number and renumber when the range saturates
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`
//!
//! # References
//!
//! - Steindorfer & Vinju, 2015 — "Optimizing Hash-Array Mapped Tries
//!   for Fast and Lean Immutable JVM Collections", OOPSLA 2015
//! - Bagwell, 2001 — "Ideal Hash Trees"

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod hash;
mod map;
mod node;
mod ops;
mod seq;
mod seq_map;
mod seq_set;
mod serde_support;
mod set;
mod token;

pub mod iter;
pub mod seq_iter;

#[cfg(test)]
mod tests;

pub use map::{ChampMap, ChampMapMut};
pub use seq_map::{SeqChampMap, SeqChampMapMut};
pub use seq_set::{SeqChampSet, SeqChampSetMut};
pub use set::{ChampSet, ChampSetMut};
