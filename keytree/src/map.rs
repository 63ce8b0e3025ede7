//! the key tree map and its slots
use crate::{
    error::{Error, Result},
    nested::{Nested, NestedMap},
    path::Path,
    storage::{Ordered, Storage, Table},
    util::BoxedIter,
};
use std::{fmt, hash::Hash, iter, iter::FromIterator};
use tracing::*;

/// A map over a tree of nested maps, keyed by paths.
///
/// Internally every level is a regular single segment map. A slot holding a
/// [`Slot::Node`] is another `KeyTreeMap` using the same storage. The flat view
/// (`keys`, `values`, `iter`) is derived on demand by a depth first walk that
/// follows the order of the underlying storage at every level.
pub struct KeyTreeMap<K, V, S: Storage<K> = Ordered> {
    table: S::Level<Slot<K, V, S>>,
}

/// What is stored under one segment: a leaf value or a child node.
pub enum Slot<K, V, S: Storage<K> = Ordered> {
    Leaf(V),
    Node(KeyTreeMap<K, V, S>),
}

impl<K, V, S: Storage<K>> Slot<K, V, S> {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Self::Node(_))
    }

    pub fn as_leaf(&self) -> Option<&V> {
        match self {
            Self::Leaf(v) => Some(v),
            Self::Node(_) => None,
        }
    }

    pub fn as_leaf_mut(&mut self) -> Option<&mut V> {
        match self {
            Self::Leaf(v) => Some(v),
            Self::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&KeyTreeMap<K, V, S>> {
        match self {
            Self::Node(n) => Some(n),
            Self::Leaf(_) => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut KeyTreeMap<K, V, S>> {
        match self {
            Self::Node(n) => Some(n),
            Self::Leaf(_) => None,
        }
    }

    pub fn into_leaf(self) -> Option<V> {
        match self {
            Self::Leaf(v) => Some(v),
            Self::Node(_) => None,
        }
    }

    pub fn into_node(self) -> Option<KeyTreeMap<K, V, S>> {
        match self {
            Self::Node(n) => Some(n),
            Self::Leaf(_) => None,
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone, S: Storage<K>> Slot<K, V, S> {
    pub fn to_nested(&self) -> Nested<K, V> {
        match self {
            Self::Leaf(v) => Nested::Value(v.clone()),
            Self::Node(n) => Nested::Map(n.to_nested()),
        }
    }
}

impl<K: Hash + Eq, V, S: Storage<K>> Slot<K, V, S> {
    pub fn into_nested(self) -> Nested<K, V> {
        match self {
            Self::Leaf(v) => Nested::Value(v),
            Self::Node(n) => Nested::Map(n.into_nested()),
        }
    }
}

/// Coercion of plain nested data: maps become child nodes, values become leaves.
impl<K, V, S: Storage<K>> From<Nested<K, V>> for Slot<K, V, S> {
    fn from(value: Nested<K, V>) -> Self {
        match value {
            Nested::Map(map) => Self::Node(KeyTreeMap::from_entries(map)),
            Nested::Value(v) => Self::Leaf(v),
        }
    }
}

impl<K, V, S: Storage<K>> From<KeyTreeMap<K, V, S>> for Slot<K, V, S> {
    fn from(value: KeyTreeMap<K, V, S>) -> Self {
        Self::Node(value)
    }
}

impl<K, V, S: Storage<K>> KeyTreeMap<K, V, S> {
    pub fn new() -> Self {
        Self {
            table: Default::default(),
        }
    }

    /// Build a tree from `(segment, nested)` pairs, turning every nested map into
    /// a child node. The input is consumed, so nothing is shared with it.
    pub fn from_entries(entries: impl IntoIterator<Item = (K, Nested<K, V>)>) -> Self {
        let mut res = Self::new();
        for (segment, nested) in entries {
            res.table.insert(segment, nested.into());
        }
        res
    }

    pub fn from_nested(map: NestedMap<K, V>) -> Self {
        Self::from_entries(map)
    }

    /// true if there is no slot at all, not even an empty child node
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn clear(&mut self) {
        self.table.clear()
    }

    /// The direct `(segment, slot)` entries of this level.
    pub fn children(&self) -> BoxedIter<'_, (&K, &Slot<K, V, S>)> {
        self.table.entries()
    }

    /// true if `path` resolves to a slot, leaf or node
    pub fn contains(&self, path: impl Into<Path<K>>) -> bool {
        self.find(&Self::path(path)).is_ok()
    }

    /// The leaf value or child node at `path`.
    ///
    /// Fails with [`Error::MissingKey`] if a segment is absent at its level, or if
    /// the walk hits a leaf before the end of the path.
    pub fn get(&self, path: impl Into<Path<K>>) -> Result<&Slot<K, V, S>> {
        self.find(&Self::path(path))
    }

    pub fn get_mut(&mut self, path: impl Into<Path<K>>) -> Result<&mut Slot<K, V, S>> {
        self.find_mut(&Self::path(path))
    }

    /// Like [`get`](Self::get), but returns `default` instead of failing.
    pub fn get_or<'a>(
        &'a self,
        path: impl Into<Path<K>>,
        default: &'a Slot<K, V, S>,
    ) -> &'a Slot<K, V, S> {
        self.find(&Self::path(path)).unwrap_or(default)
    }

    fn path(path: impl Into<Path<K>>) -> Path<K> {
        path.into()
    }

    fn find(&self, path: &[K]) -> Result<&Slot<K, V, S>> {
        let (last, init) = path.split_last().ok_or_else(|| Error::missing(0))?;
        let mut node = self;
        for (depth, segment) in init.iter().enumerate() {
            node = match node.table.get(segment) {
                Some(Slot::Node(child)) => child,
                Some(Slot::Leaf(_)) => return Err(Error::missing(depth + 1)),
                None => return Err(Error::missing(depth)),
            };
        }
        node.table.get(last).ok_or_else(|| Error::missing(init.len()))
    }

    fn find_mut(&mut self, path: &[K]) -> Result<&mut Slot<K, V, S>> {
        let (last, init) = path.split_last().ok_or_else(|| Error::missing(0))?;
        let mut node = self;
        for (depth, segment) in init.iter().enumerate() {
            node = match node.table.get_mut(segment) {
                Some(Slot::Node(child)) => child,
                Some(Slot::Leaf(_)) => return Err(Error::missing(depth + 1)),
                None => return Err(Error::missing(depth)),
            };
        }
        node.table.get_mut(last).ok_or_else(|| Error::missing(init.len()))
    }

    /// Remove the slot at `path`.
    ///
    /// A child node emptied by the removal is removed from its parent as well,
    /// recursively up to but not including this node.
    pub fn remove(&mut self, path: impl Into<Path<K>>) -> Result<Slot<K, V, S>> {
        self.remove_at(&Self::path(path), 0)
    }

    fn remove_at(&mut self, path: &[K], depth: usize) -> Result<Slot<K, V, S>> {
        match path {
            [] => Err(Error::missing(depth)),
            [segment] => self
                .table
                .remove(segment)
                .ok_or_else(|| Error::missing(depth)),
            [head, rest @ ..] => {
                let child = match self.table.get_mut(head) {
                    Some(Slot::Node(child)) => child,
                    Some(Slot::Leaf(_)) => return Err(Error::missing(depth + 1)),
                    None => return Err(Error::missing(depth)),
                };
                let removed = child.remove_at(rest, depth + 1)?;
                if child.is_empty() {
                    debug!(depth, "pruning emptied child node");
                    self.table.remove(head);
                }
                Ok(removed)
            }
        }
    }

    /// Remove and return the slot at `path`.
    ///
    /// If the path does not resolve, `default` is returned if given, otherwise the
    /// missing key error.
    pub fn pop(
        &mut self,
        path: impl Into<Path<K>>,
        default: Option<Slot<K, V, S>>,
    ) -> Result<Slot<K, V, S>> {
        match self.remove(path) {
            Ok(slot) => Ok(slot),
            Err(cause) => default.ok_or(cause),
        }
    }

    /// Number of leaf reaching paths, the length of the flat view.
    pub fn len(&self) -> usize {
        self.table
            .entries()
            .map(|(_, slot)| match slot {
                Slot::Node(child) if !child.is_empty() => child.len(),
                _ => 1,
            })
            .sum()
    }

    /// Consume the tree, producing the equivalent plain nested map.
    pub fn into_nested(self) -> NestedMap<K, V>
    where
        K: Hash + Eq,
    {
        self.table
            .into_entries()
            .map(|(segment, slot)| (segment, slot.into_nested()))
            .collect()
    }
}

impl<K: Clone, V, S: Storage<K>> KeyTreeMap<K, V, S> {
    /// Store `slot` at `path`, returning the slot previously stored there.
    ///
    /// Missing intermediate nodes are created. Descending through a segment that
    /// holds a leaf fails with [`Error::TypeConflict`] before anything at or above
    /// that level is modified.
    pub fn insert_slot(
        &mut self,
        path: impl Into<Path<K>>,
        slot: Slot<K, V, S>,
    ) -> Result<Option<Slot<K, V, S>>> {
        let path = Self::path(path);
        trace!(len = path.len(), leaf = slot.is_leaf(), "insert");
        self.insert_at(&path, 0, slot)
    }

    /// Store a leaf value at `path`.
    pub fn insert(&mut self, path: impl Into<Path<K>>, value: V) -> Result<Option<Slot<K, V, S>>> {
        self.insert_slot(path, Slot::Leaf(value))
    }

    /// Store plain nested data at `path`, coercing maps into child nodes.
    pub fn insert_nested(
        &mut self,
        path: impl Into<Path<K>>,
        value: Nested<K, V>,
    ) -> Result<Option<Slot<K, V, S>>> {
        self.insert_slot(path, value.into())
    }

    pub fn insert_node(
        &mut self,
        path: impl Into<Path<K>>,
        node: KeyTreeMap<K, V, S>,
    ) -> Result<Option<Slot<K, V, S>>> {
        self.insert_slot(path, Slot::Node(node))
    }

    fn insert_at(
        &mut self,
        path: &[K],
        depth: usize,
        slot: Slot<K, V, S>,
    ) -> Result<Option<Slot<K, V, S>>> {
        match path {
            [] => Err(Error::missing(depth)),
            [segment] => Ok(self.table.insert(segment.clone(), slot)),
            [head, rest @ ..] => match self.table.get_mut(head) {
                Some(Slot::Node(child)) => child.insert_at(rest, depth + 1, slot),
                Some(Slot::Leaf(_)) => Err(Error::conflict(depth)),
                None => {
                    trace!(depth, "creating intermediate node");
                    let mut child = Self::new();
                    child.insert_at(rest, depth + 1, slot)?;
                    self.table.insert(head.clone(), Slot::Node(child));
                    Ok(None)
                }
            },
        }
    }

    /// Return the slot at `path`, first storing `default` there if the path is absent.
    pub fn set_default(
        &mut self,
        path: impl Into<Path<K>>,
        default: Slot<K, V, S>,
    ) -> Result<&mut Slot<K, V, S>> {
        let path = Self::path(path);
        if self.find(&path).is_err() {
            self.insert_at(&path, 0, default)?;
        }
        self.find_mut(&path)
    }

    /// Write every `(path, nested)` pair, stopping at the first failing write.
    pub fn update<P: Into<Path<K>>>(
        &mut self,
        entries: impl IntoIterator<Item = (P, Nested<K, V>)>,
    ) -> Result<()> {
        for (path, value) in entries {
            self.insert_nested(path, value)?;
        }
        Ok(())
    }

    /// The flat view: every leaf reaching path with its slot, depth first.
    ///
    /// A child node without entries is reported as a slot of its own.
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        Iter {
            stack: vec![self.table.entries()],
            prefix: Vec::new(),
        }
    }

    /// Same as [`iter`](Self::iter).
    pub fn items(&self) -> Iter<'_, K, V, S> {
        self.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = Path<K>> + '_ {
        self.iter().map(|(path, _)| path)
    }

    pub fn values(&self) -> impl Iterator<Item = &Slot<K, V, S>> + '_ {
        self.iter().map(|(_, slot)| slot)
    }

    /// Only the paths that end in a leaf value.
    pub fn leaves(&self) -> impl Iterator<Item = (Path<K>, &V)> + '_ {
        self.iter()
            .filter_map(|(path, slot)| slot.as_leaf().map(|v| (path, v)))
    }
}

impl<K: Hash + Eq + Clone, V: Clone, S: Storage<K>> KeyTreeMap<K, V, S> {
    /// The plain nested map with the same structure as this tree.
    pub fn to_nested(&self) -> NestedMap<K, V> {
        self.table
            .entries()
            .map(|(segment, slot)| (segment.clone(), slot.to_nested()))
            .collect()
    }
}

/// Depth first iterator over the flat view of a [`KeyTreeMap`].
pub struct Iter<'a, K, V, S: Storage<K>> {
    stack: Vec<BoxedIter<'a, (&'a K, &'a Slot<K, V, S>)>>,
    prefix: Vec<&'a K>,
}

impl<'a, K: Clone, V, S: Storage<K>> Iterator for Iter<'a, K, V, S> {
    type Item = (Path<K>, &'a Slot<K, V, S>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (segment, slot) = match self.stack.last_mut()?.next() {
                Some(entry) => entry,
                None => {
                    // level exhausted, so is the segment that led into it
                    self.stack.pop();
                    self.prefix.pop();
                    continue;
                }
            };
            match slot {
                Slot::Node(child) if !child.is_empty() => {
                    self.prefix.push(segment);
                    self.stack.push(child.table.entries());
                }
                _ => {
                    let path = self
                        .prefix
                        .iter()
                        .map(|s| (*s).clone())
                        .chain(iter::once(segment.clone()))
                        .collect();
                    return Some((path, slot));
                }
            }
        }
    }
}

impl<'a, K: Clone, V, S: Storage<K>> IntoIterator for &'a KeyTreeMap<K, V, S> {
    type Item = (Path<K>, &'a Slot<K, V, S>);
    type IntoIter = Iter<'a, K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S: Storage<K>> Default for KeyTreeMap<K, V, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S: Storage<K>> FromIterator<(K, Nested<K, V>)> for KeyTreeMap<K, V, S> {
    fn from_iter<I: IntoIterator<Item = (K, Nested<K, V>)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

impl<K, V, S: Storage<K>> From<NestedMap<K, V>> for KeyTreeMap<K, V, S> {
    fn from(map: NestedMap<K, V>) -> Self {
        Self::from_nested(map)
    }
}

/// A deep structural copy. Leaf values are cloned.
impl<K: Clone, V: Clone, S: Storage<K>> Clone for KeyTreeMap<K, V, S> {
    fn clone(&self) -> Self {
        let mut res = Self::new();
        for (segment, slot) in self.table.entries() {
            res.table.insert(segment.clone(), slot.clone());
        }
        res
    }
}

impl<K: Clone, V: Clone, S: Storage<K>> Clone for Slot<K, V, S> {
    fn clone(&self) -> Self {
        match self {
            Self::Leaf(v) => Self::Leaf(v.clone()),
            Self::Node(n) => Self::Node(n.clone()),
        }
    }
}

/// Structural equality, independent of entry order and of the storage used.
impl<K, V: PartialEq, S: Storage<K>, S2: Storage<K>> PartialEq<KeyTreeMap<K, V, S2>>
    for KeyTreeMap<K, V, S>
{
    fn eq(&self, other: &KeyTreeMap<K, V, S2>) -> bool {
        self.table.len() == other.table.len()
            && self
                .table
                .entries()
                .all(|(segment, slot)| other.table.get(segment).map_or(false, |o| slot == o))
    }
}

impl<K, V: Eq, S: Storage<K>> Eq for KeyTreeMap<K, V, S> {}

impl<K, V: PartialEq, S: Storage<K>, S2: Storage<K>> PartialEq<Slot<K, V, S2>> for Slot<K, V, S> {
    fn eq(&self, other: &Slot<K, V, S2>) -> bool {
        match (self, other) {
            (Slot::Leaf(a), Slot::Leaf(b)) => a == b,
            (Slot::Node(a), Slot::Node(b)) => a == b,
            _ => false,
        }
    }
}

impl<K, V: Eq, S: Storage<K>> Eq for Slot<K, V, S> {}

/// Compares against the plain nested form, as produced by `to_nested`.
impl<K: Hash + Eq, V: PartialEq, S: Storage<K>> PartialEq<NestedMap<K, V>> for KeyTreeMap<K, V, S> {
    fn eq(&self, other: &NestedMap<K, V>) -> bool {
        self.table.len() == other.len()
            && self
                .table
                .entries()
                .all(|(segment, slot)| other.get(segment).map_or(false, |o| slot == o))
    }
}

impl<K: Hash + Eq, V: PartialEq, S: Storage<K>> PartialEq<Nested<K, V>> for Slot<K, V, S> {
    fn eq(&self, other: &Nested<K, V>) -> bool {
        match (self, other) {
            (Slot::Leaf(a), Nested::Value(b)) => a == b,
            (Slot::Node(a), Nested::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl<K: Clone + fmt::Debug, V: fmt::Debug, S: Storage<K>> fmt::Debug for KeyTreeMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Clone + fmt::Debug, V: fmt::Debug, S: Storage<K>> fmt::Debug for Slot<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(v) => f.debug_tuple("Leaf").field(v).finish(),
            Self::Node(n) => f.debug_tuple("Node").field(n).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Sorted;

    type Tree = KeyTreeMap<&'static str, i32>;

    fn leaf(v: i32) -> Nested<&'static str, i32> {
        Nested::Value(v)
    }

    fn sample() -> Tree {
        KeyTreeMap::from_entries(vec![(
            "Root",
            Nested::map(vec![
                ("A", leaf(1)),
                ("B", Nested::map(vec![("B-1", leaf(2)), ("B-3", leaf(3))])),
            ]),
        )])
    }

    #[test]
    fn flat_view_of_nested_input() {
        let tree = sample();
        let keys: Vec<_> = tree.keys().collect();
        assert_eq!(
            keys,
            vec![
                Path::from(["Root", "A"]),
                Path::from(["Root", "B", "B-1"]),
                Path::from(["Root", "B", "B-3"]),
            ]
        );
        assert_eq!(tree.get(["Root", "B", "B-1"]).unwrap().as_leaf(), Some(&2));
        assert!(tree.get(["Root", "B"]).unwrap().is_node());
        assert!(tree.get(["Root"]).unwrap().is_node());
        assert_eq!(tree.len(), 3);
        let values: Vec<_> = tree.values().filter_map(Slot::as_leaf).copied().collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn get_missing() {
        let tree = sample();
        assert_eq!(tree.get(["nope"]).unwrap_err(), Error::MissingKey { depth: 0 });
        assert_eq!(
            tree.get(["Root", "B", "B-2"]).unwrap_err(),
            Error::MissingKey { depth: 2 }
        );
        // a leaf can not be indexed into
        assert_eq!(
            tree.get(["Root", "A", "x"]).unwrap_err(),
            Error::MissingKey { depth: 2 }
        );
        assert_eq!(
            tree.get(Vec::<&str>::new()).unwrap_err(),
            Error::MissingKey { depth: 0 }
        );
        let default = Slot::Leaf(-1);
        assert_eq!(tree.get_or(["Root", "C"], &default).as_leaf(), Some(&-1));
        assert_eq!(tree.get_or(["Root", "A"], &default).as_leaf(), Some(&1));
    }

    #[test]
    fn insert_auto_vivifies() {
        let mut tree = Tree::new();
        assert_eq!(tree.insert(["a", "b", "c"], 1).unwrap(), None);
        assert!(tree.get(["a"]).unwrap().is_node());
        assert!(tree.get(["a", "b"]).unwrap().is_node());
        assert_eq!(tree.get(["a", "b", "c"]).unwrap().as_leaf(), Some(&1));
        assert_eq!(
            tree.insert(["a", "b", "c"], 2).unwrap().and_then(Slot::into_leaf),
            Some(1)
        );
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn insert_through_leaf_is_a_conflict() {
        let mut tree = Tree::new();
        tree.insert(["x", "y"], 1).unwrap();
        let before = tree.clone();
        assert_eq!(
            tree.insert(["x", "y", "z"], 2).unwrap_err(),
            Error::TypeConflict { depth: 1 }
        );
        assert_eq!(tree, before);
    }

    #[test]
    fn single_segment_overwrites_node() {
        let mut tree = sample();
        let old = tree.insert(["Root"], 7).unwrap().unwrap();
        assert!(old.is_node());
        assert_eq!(tree.keys().collect::<Vec<_>>(), vec![Path::single("Root")]);
    }

    #[test]
    fn remove_keeps_non_empty_parent() {
        let mut tree = Tree::new();
        tree.insert(["a", "b"], 5).unwrap();
        tree.insert(["a", "c"], 6).unwrap();
        assert_eq!(tree.remove(["a", "b"]).unwrap().into_leaf(), Some(5));
        assert!(tree.contains(["a", "c"]));
        assert!(tree.contains(["a"]));
        assert!(!tree.contains(["a", "b"]));
    }

    #[test]
    fn remove_prunes_empty_ancestors() {
        let mut tree = Tree::new();
        tree.insert(["a", "b", "c", "d"], 1).unwrap();
        tree.insert(["z"], 2).unwrap();
        tree.remove(["a", "b", "c", "d"]).unwrap();
        assert!(!tree.contains(["a"]));
        assert_eq!(tree.keys().collect::<Vec<_>>(), vec![Path::single("z")]);
        tree.remove(["z"]).unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn remove_missing() {
        let mut tree = sample();
        assert_eq!(
            tree.remove(["Root", "Q"]).unwrap_err(),
            Error::MissingKey { depth: 1 }
        );
        assert_eq!(
            tree.remove(["Root", "A", "x"]).unwrap_err(),
            Error::MissingKey { depth: 2 }
        );
        assert_eq!(tree, sample());
    }

    #[test]
    fn pop_and_set_default() {
        let mut tree = sample();
        assert_eq!(tree.pop(["Root", "A"], None).unwrap().into_leaf(), Some(1));
        assert_eq!(
            tree.pop(["Root", "A"], None).unwrap_err(),
            Error::MissingKey { depth: 1 }
        );
        assert_eq!(
            tree.pop(["Root", "A"], Some(Slot::Leaf(9))).unwrap().into_leaf(),
            Some(9)
        );
        assert!(!tree.contains(["Root", "A"]));

        assert_eq!(
            tree.set_default(["Root", "B", "B-1"], Slot::Leaf(0))
                .unwrap()
                .as_leaf(),
            Some(&2)
        );
        *tree
            .set_default(["Root", "C"], Slot::Leaf(0))
            .unwrap()
            .as_leaf_mut()
            .unwrap() += 4;
        assert_eq!(tree.get(["Root", "C"]).unwrap().as_leaf(), Some(&4));
    }

    #[test]
    fn empty_child_is_a_key() {
        let mut tree = Tree::new();
        tree.insert_nested(["e"], Nested::empty()).unwrap();
        tree.insert(["f"], 1).unwrap();
        assert_eq!(
            tree.keys().collect::<Vec<_>>(),
            vec![Path::single("e"), Path::single("f")]
        );
        assert_eq!(tree.len(), 2);
        assert!(tree.get(["e"]).unwrap().as_node().unwrap().is_empty());
    }

    #[test]
    fn nested_round_trip() {
        let tree = sample();
        let nested = tree.to_nested();
        assert_eq!(tree, nested);
        assert_eq!(Tree::from_nested(nested.clone()), tree);
        assert_eq!(tree.clone().into_nested(), nested);
    }

    #[test]
    fn insert_nested_coerces() {
        let mut tree = Tree::new();
        tree.insert_nested(["a"], Nested::map(vec![("b", leaf(1))]))
            .unwrap();
        assert!(tree.get(["a"]).unwrap().is_node());
        assert_eq!(tree.get(["a", "b"]).unwrap().as_leaf(), Some(&1));
        tree.update(vec![
            (Path::from(["a", "c"]), leaf(2)),
            (Path::single("d"), leaf(3)),
        ])
        .unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(
            tree.update(vec![(Path::from(["d", "x"]), leaf(4))])
                .unwrap_err(),
            Error::TypeConflict { depth: 0 }
        );
    }

    #[test]
    fn copies_are_independent() {
        let original = sample();
        let mut copy = original.clone();
        assert_eq!(copy, original);
        copy.insert(["Root", "B", "B-1"], 20).unwrap();
        copy.remove(["Root", "A"]).unwrap();
        assert_eq!(original.get(["Root", "B", "B-1"]).unwrap().as_leaf(), Some(&2));
        assert!(original.contains(["Root", "A"]));
        assert_ne!(copy, original);
    }

    #[test]
    fn equality_across_storages() {
        let ordered = sample();
        let sorted: KeyTreeMap<&str, i32, Sorted> = KeyTreeMap::from_nested(ordered.to_nested());
        assert!(ordered == sorted);
        let mut other = Tree::new();
        other.insert(["Root", "B", "B-3"], 3).unwrap();
        other.insert(["Root", "B", "B-1"], 2).unwrap();
        other.insert(["Root", "A"], 1).unwrap();
        assert_eq!(other, ordered);
        assert_ne!(other.keys().collect::<Vec<_>>(), ordered.keys().collect::<Vec<_>>());
    }

    #[test]
    fn sorted_storage_enumerates_sorted() {
        let mut tree: KeyTreeMap<&str, i32, Sorted> = KeyTreeMap::new();
        tree.insert(["b", "y"], 1).unwrap();
        tree.insert(["a"], 2).unwrap();
        tree.insert(["b", "x"], 3).unwrap();
        let keys: Vec<_> = tree.keys().map(Path::into_vec).collect();
        assert_eq!(keys, vec![vec!["a"], vec!["b", "x"], vec!["b", "y"]]);
    }

    #[test]
    fn debug_shows_flat_view() {
        let mut tree = Tree::new();
        tree.insert(["a", "b"], 1).unwrap();
        assert_eq!(format!("{:?}", tree), r#"{("a", "b"): Leaf(1)}"#);
    }
}
