//! the single level containers a key tree is built from
//!
//! A [`Table`] maps one segment to one slot. A [`Storage`] picks the table type
//! used at every level of a tree, so a child node always uses the same kind of
//! container as its parent.
use crate::util::{BoxedIter, IterExt};
use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use std::{
    collections::BTreeMap,
    hash::{BuildHasher, Hash},
};

/// A single level key value container.
///
/// `entries` must yield every entry exactly once, and `remove` must keep the
/// relative order of the remaining entries.
pub trait Table<K, T>: Default {
    type IntoEntries: Iterator<Item = (K, T)>;

    fn get(&self, key: &K) -> Option<&T>;

    fn get_mut(&mut self, key: &K) -> Option<&mut T>;

    /// insert or overwrite, returning the previous value
    fn insert(&mut self, key: K, value: T) -> Option<T>;

    fn remove(&mut self, key: &K) -> Option<T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    fn entries(&self) -> BoxedIter<'_, (&K, &T)>;

    fn into_entries(self) -> Self::IntoEntries;
}

impl<K: Hash + Eq, T, H: BuildHasher + Default> Table<K, T> for IndexMap<K, T, H> {
    type IntoEntries = indexmap::map::IntoIter<K, T>;

    fn get(&self, key: &K) -> Option<&T> {
        IndexMap::get(self, key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut T> {
        IndexMap::get_mut(self, key)
    }

    fn insert(&mut self, key: K, value: T) -> Option<T> {
        IndexMap::insert(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<T> {
        // swap_remove would reorder the tail
        IndexMap::shift_remove(self, key)
    }

    fn len(&self) -> usize {
        IndexMap::len(self)
    }

    fn clear(&mut self) {
        IndexMap::clear(self)
    }

    fn entries(&self) -> BoxedIter<'_, (&K, &T)> {
        self.iter().boxed()
    }

    fn into_entries(self) -> Self::IntoEntries {
        self.into_iter()
    }
}

impl<K: Ord, T> Table<K, T> for BTreeMap<K, T> {
    type IntoEntries = std::collections::btree_map::IntoIter<K, T>;

    fn get(&self, key: &K) -> Option<&T> {
        BTreeMap::get(self, key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut T> {
        BTreeMap::get_mut(self, key)
    }

    fn insert(&mut self, key: K, value: T) -> Option<T> {
        BTreeMap::insert(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<T> {
        BTreeMap::remove(self, key)
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn clear(&mut self) {
        BTreeMap::clear(self)
    }

    fn entries(&self) -> BoxedIter<'_, (&K, &T)> {
        self.iter().boxed()
    }

    fn into_entries(self) -> Self::IntoEntries {
        self.into_iter()
    }
}

/// Chooses the [`Table`] used for every level of a tree.
pub trait Storage<K> {
    type Level<T>: Table<K, T>;
}

/// Insertion ordered levels. This is the default storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ordered;

impl<K: Hash + Eq> Storage<K> for Ordered {
    type Level<T> = IndexMap<K, T, FnvBuildHasher>;
}

/// Levels sorted by segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sorted;

impl<K: Ord> Storage<K> for Sorted {
    type Level<T> = BTreeMap<K, T>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise<T: Table<&'static str, u32>>() -> Vec<(&'static str, u32)> {
        let mut table = T::default();
        assert!(table.is_empty());
        assert_eq!(table.insert("c", 1), None);
        assert_eq!(table.insert("a", 2), None);
        assert_eq!(table.insert("b", 3), None);
        assert_eq!(table.insert("a", 4), Some(2));
        *table.get_mut(&"b").unwrap() += 10;
        assert_eq!(table.get(&"b"), Some(&13));
        assert_eq!(table.remove(&"c"), Some(1));
        assert_eq!(table.remove(&"c"), None);
        assert_eq!(table.len(), 2);
        table.entries().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn index_map_keeps_insertion_order() {
        let mut table: IndexMap<&str, u32, FnvBuildHasher> = Default::default();
        for (i, k) in ["x", "y", "z", "w"].iter().enumerate() {
            Table::insert(&mut table, *k, i as u32);
        }
        Table::remove(&mut table, &"y");
        let keys: Vec<_> = table.entries().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["x", "z", "w"]);
        assert_eq!(
            exercise::<IndexMap<&str, u32, FnvBuildHasher>>(),
            vec![("a", 4), ("b", 13)]
        );
    }

    #[test]
    fn btree_map_is_sorted() {
        assert_eq!(exercise::<BTreeMap<&str, u32>>(), vec![("a", 4), ("b", 13)]);
    }
}
