//! a key tree (de)serializes as the plain nested map it projects to
use crate::{
    map::{KeyTreeMap, Slot},
    nested::NestedMap,
    storage::Storage,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::hash::Hash;

impl<K: Serialize, V: Serialize, S: Storage<K>> Serialize for KeyTreeMap<K, V, S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_map(self.children())
    }
}

impl<K: Serialize, V: Serialize, S: Storage<K>> Serialize for Slot<K, V, S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        match self {
            Self::Leaf(v) => v.serialize(serializer),
            Self::Node(n) => n.serialize(serializer),
        }
    }
}

impl<'de, K, V, S> Deserialize<'de> for KeyTreeMap<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
    S: Storage<K>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        NestedMap::<K, V>::deserialize(deserializer).map(Self::from_nested)
    }
}
