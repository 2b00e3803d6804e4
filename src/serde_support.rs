//! Serde support.
//!
//! A collection serializes as its element (or entry) sequence in
//! iteration order and rebuilds by inserting in order, so the plain
//! variants recover the same contents and the sequenced variants recover
//! the same contents in the same order.

use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    ChampMap, ChampMapMut, ChampSet, ChampSetMut, SeqChampMap, SeqChampMapMut, SeqChampSet,
    SeqChampSetMut,
};

// ---------------------------------------------------------------------------
// Plain set
// ---------------------------------------------------------------------------

impl<T: Serialize, S> Serialize for ChampSet<T, S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<T: Serialize, S> Serialize for ChampSetMut<T, S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_seq(self.iter())
    }
}

struct SetVisitor<T, S> {
    marker: PhantomData<(T, S)>,
}

impl<'de, T, S> Visitor<'de> for SetVisitor<T, S>
where
    T: Deserialize<'de> + Hash + Eq + Clone,
    S: BuildHasher + Default,
{
    type Value = ChampSetMut<T, S>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence of set elements")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut out = ChampSetMut::with_hasher(S::default());
        while let Some(elem) = seq.next_element()? {
            out.insert(elem);
        }
        Ok(out)
    }
}

impl<'de, T, S> Deserialize<'de> for ChampSetMut<T, S>
where
    T: Deserialize<'de> + Hash + Eq + Clone,
    S: BuildHasher + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SetVisitor {
            marker: PhantomData,
        })
    }
}

impl<'de, T, S> Deserialize<'de> for ChampSet<T, S>
where
    T: Deserialize<'de> + Hash + Eq + Clone,
    S: BuildHasher + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ChampSetMut::deserialize(deserializer).map(ChampSetMut::into_immutable)
    }
}

// ---------------------------------------------------------------------------
// Plain map
// ---------------------------------------------------------------------------

impl<K: Serialize, V: Serialize, S> Serialize for ChampMap<K, V, S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<K: Serialize, V: Serialize, S> Serialize for ChampMapMut<K, V, S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_map(self.iter())
    }
}

struct PlainMapVisitor<K, V, S> {
    marker: PhantomData<(K, V, S)>,
}

impl<'de, K, V, S> Visitor<'de> for PlainMapVisitor<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq + Clone,
    V: Deserialize<'de> + Clone,
    S: BuildHasher + Default,
{
    type Value = ChampMapMut<K, V, S>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut out = ChampMapMut::with_hasher(S::default());
        while let Some((key, value)) = map.next_entry()? {
            out.insert(key, value);
        }
        Ok(out)
    }
}

impl<'de, K, V, S> Deserialize<'de> for ChampMapMut<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq + Clone,
    V: Deserialize<'de> + Clone,
    S: BuildHasher + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PlainMapVisitor {
            marker: PhantomData,
        })
    }
}

impl<'de, K, V, S> Deserialize<'de> for ChampMap<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq + Clone,
    V: Deserialize<'de> + Clone,
    S: BuildHasher + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ChampMapMut::deserialize(deserializer).map(ChampMapMut::into_immutable)
    }
}

// ---------------------------------------------------------------------------
// Sequenced set
// ---------------------------------------------------------------------------

impl<T: Serialize + Clone, S> Serialize for SeqChampSet<T, S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<T: Serialize + Clone, S> Serialize for SeqChampSetMut<T, S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_seq(self.iter())
    }
}

struct SeqSetVisitor<T, S> {
    marker: PhantomData<(T, S)>,
}

impl<'de, T, S> Visitor<'de> for SeqSetVisitor<T, S>
where
    T: Deserialize<'de> + Hash + Eq + Clone,
    S: BuildHasher + Default,
{
    type Value = SeqChampSetMut<T, S>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence of set elements")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut out = SeqChampSetMut::with_hasher(S::default());
        while let Some(elem) = seq.next_element()? {
            out.insert(elem);
        }
        Ok(out)
    }
}

impl<'de, T, S> Deserialize<'de> for SeqChampSetMut<T, S>
where
    T: Deserialize<'de> + Hash + Eq + Clone,
    S: BuildHasher + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SeqSetVisitor {
            marker: PhantomData,
        })
    }
}

impl<'de, T, S> Deserialize<'de> for SeqChampSet<T, S>
where
    T: Deserialize<'de> + Hash + Eq + Clone,
    S: BuildHasher + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SeqChampSetMut::deserialize(deserializer).map(SeqChampSetMut::into_immutable)
    }
}

// ---------------------------------------------------------------------------
// Sequenced map
// ---------------------------------------------------------------------------

impl<K, V, S> Serialize for SeqChampMap<K, V, S>
where
    K: Serialize + Clone,
    V: Serialize + Clone,
{
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<K, V, S> Serialize for SeqChampMapMut<K, V, S>
where
    K: Serialize + Clone,
    V: Serialize + Clone,
{
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_map(self.iter())
    }
}

struct SeqMapVisitor<K, V, S> {
    marker: PhantomData<(K, V, S)>,
}

impl<'de, K, V, S> Visitor<'de> for SeqMapVisitor<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq + Clone,
    V: Deserialize<'de> + Clone,
    S: BuildHasher + Default,
{
    type Value = SeqChampMapMut<K, V, S>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut out = SeqChampMapMut::with_hasher(S::default());
        while let Some((key, value)) = map.next_entry()? {
            out.insert(key, value);
        }
        Ok(out)
    }
}

impl<'de, K, V, S> Deserialize<'de> for SeqChampMapMut<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq + Clone,
    V: Deserialize<'de> + Clone,
    S: BuildHasher + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SeqMapVisitor {
            marker: PhantomData,
        })
    }
}

impl<'de, K, V, S> Deserialize<'de> for SeqChampMap<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq + Clone,
    V: Deserialize<'de> + Clone,
    S: BuildHasher + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SeqChampMapMut::deserialize(deserializer).map(SeqChampMapMut::into_immutable)
    }
}
