//! plain nested maps, the structural projection of a key tree
use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use std::{hash::Hash, iter::FromIterator};

/// A plain nested map: one level of segments, each holding a value or another map.
pub type NestedMap<K, V> = IndexMap<K, Nested<K, V>, FnvBuildHasher>;

/// A value inside a [`NestedMap`].
///
/// When a nested map is turned into a key tree, every `Map` becomes a child node
/// and every `Value` a leaf.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        untagged,
        bound(
            serialize = "K: serde::Serialize, V: serde::Serialize",
            deserialize = "K: serde::Deserialize<'de> + Hash + Eq, V: serde::Deserialize<'de>"
        )
    )
)]
pub enum Nested<K, V> {
    Map(NestedMap<K, V>),
    Value(V),
}

impl<K: Hash + Eq, V> Nested<K, V> {
    /// a map from `(segment, nested)` pairs
    pub fn map(entries: impl IntoIterator<Item = (K, Nested<K, V>)>) -> Self {
        Self::Map(entries.into_iter().collect())
    }

    /// an empty map
    pub fn empty() -> Self {
        Self::Map(NestedMap::default())
    }
}

impl<K, V> Nested<K, V> {
    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    pub fn as_value(&self) -> Option<&V> {
        match self {
            Self::Value(v) => Some(v),
            Self::Map(_) => None,
        }
    }

    pub fn as_map(&self) -> Option<&NestedMap<K, V>> {
        match self {
            Self::Map(m) => Some(m),
            Self::Value(_) => None,
        }
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, Nested<K, V>)> for Nested<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, Nested<K, V>)>>(iter: I) -> Self {
        Self::map(iter)
    }
}

/// Structural equality. Maps compare regardless of entry order.
impl<K: Hash + Eq, V: PartialEq> PartialEq for Nested<K, V> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl<K: Hash + Eq, V: Eq> Eq for Nested<K, V> {}
