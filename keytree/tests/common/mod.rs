#![allow(dead_code)]
//! helper methods for the tests
use keytree::{Error, KeyTreeMap, Storage};
use quickcheck::{Arbitrary, Gen};
use std::collections::BTreeMap;

/// A segment from a tiny alphabet, so that random paths share prefixes often.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Seg(pub u8);

impl Arbitrary for Seg {
    fn arbitrary(g: &mut Gen) -> Self {
        Seg(u8::arbitrary(g) % 4)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Seg))
    }
}

/// A non empty path of at most 3 segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestPath(pub Vec<Seg>);

impl Arbitrary for TestPath {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = 1 + usize::arbitrary(g) % 3;
        TestPath((0..len).map(|_| Seg::arbitrary(g)).collect())
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(
            self.0
                .shrink()
                .filter(|segments| !segments.is_empty())
                .map(TestPath),
        )
    }
}

#[derive(Debug, Clone)]
pub enum Op {
    Insert(TestPath, u32),
    Remove(TestPath),
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        // writes are more frequent than removals, so trees grow
        if u8::arbitrary(g) % 3 == 0 {
            Op::Remove(TestPath::arbitrary(g))
        } else {
            Op::Insert(TestPath::arbitrary(g), u32::arbitrary(g))
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self.clone() {
            Op::Insert(path, value) => Box::new(
                (path.clone(), value)
                    .shrink()
                    .map(|(path, value)| Op::Insert(path, value)),
            ),
            Op::Remove(path) => Box::new(path.shrink().map(Op::Remove)),
        }
    }
}

/// Flat reference model: a sorted map from full leaf paths to values.
#[derive(Debug, Clone, Default)]
pub struct FlatModel(pub BTreeMap<Vec<Seg>, u32>);

impl FlatModel {
    fn has_prefix(&self, prefix: &[Seg]) -> bool {
        self.0.keys().any(|key| key.starts_with(prefix))
    }

    pub fn insert(&mut self, path: &[Seg], value: u32) -> Result<(), Error> {
        for depth in 0..path.len() - 1 {
            if self.0.contains_key(&path[..=depth]) {
                return Err(Error::TypeConflict { depth });
            }
        }
        self.0.retain(|key, _| !key.starts_with(path));
        self.0.insert(path.to_vec(), value);
        Ok(())
    }

    pub fn remove(&mut self, path: &[Seg]) -> Result<(), Error> {
        for depth in 0..path.len() {
            let prefix = &path[..=depth];
            if depth + 1 < path.len() && self.0.contains_key(prefix) {
                return Err(Error::MissingKey { depth: depth + 1 });
            }
            if !self.has_prefix(prefix) {
                return Err(Error::MissingKey { depth });
            }
        }
        self.0.retain(|key, _| !key.starts_with(path));
        Ok(())
    }

    pub fn apply(&mut self, op: &Op) -> Result<(), Error> {
        match op {
            Op::Insert(path, value) => self.insert(&path.0, *value),
            Op::Remove(path) => self.remove(&path.0),
        }
    }
}

/// Apply `op` to a tree, discarding whatever the operation returns on success.
pub fn apply<S: Storage<Seg>>(tree: &mut KeyTreeMap<Seg, u32, S>, op: &Op) -> Result<(), Error> {
    match op {
        Op::Insert(path, value) => tree.insert(path.0.clone(), *value).map(drop),
        Op::Remove(path) => tree.remove(path.0.clone()).map(drop),
    }
}

/// Build a tree by applying all ops, ignoring failing ones.
pub fn build<S: Storage<Seg>>(ops: &[Op]) -> KeyTreeMap<Seg, u32, S> {
    let mut tree = KeyTreeMap::new();
    for op in ops {
        let _ = apply(&mut tree, op);
    }
    tree
}

/// The leaves of a tree, as a sorted flat map.
pub fn flatten<S: Storage<Seg>>(tree: &KeyTreeMap<Seg, u32, S>) -> BTreeMap<Vec<Seg>, u32> {
    tree.leaves()
        .map(|(path, value)| (path.into_vec(), *value))
        .collect()
}

/// Install a tracing subscriber controlled by `RUST_LOG`, once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
