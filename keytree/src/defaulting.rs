use crate::{
    error::Result,
    map::{KeyTreeMap, Slot},
    nested::Nested,
    path::Path,
    storage::{Ordered, Storage},
};
use derive_more::{Deref, DerefMut};
use std::fmt;

/// A [`KeyTreeMap`] that produces a default leaf for paths that are accessed but absent.
///
/// Defaults are only produced by [`get_or_insert_default`](Self::get_or_insert_default).
/// Everything else is the wrapped map, reachable through `Deref`, so a plain
/// `get` of an absent path still fails with [`Error::MissingKey`](crate::Error::MissingKey)
/// and creates nothing.
#[derive(Deref, DerefMut)]
pub struct DefaultKeyTreeMap<K, V, F, S: Storage<K> = Ordered> {
    #[deref]
    #[deref_mut]
    map: KeyTreeMap<K, V, S>,
    default_factory: F,
}

impl<K, V, F: Fn() -> V, S: Storage<K>> DefaultKeyTreeMap<K, V, F, S> {
    pub fn new(default_factory: F) -> Self {
        Self {
            map: KeyTreeMap::new(),
            default_factory,
        }
    }

    pub fn from_entries(
        default_factory: F,
        entries: impl IntoIterator<Item = (K, Nested<K, V>)>,
    ) -> Self {
        Self {
            map: KeyTreeMap::from_entries(entries),
            default_factory,
        }
    }

    pub fn default_factory(&self) -> &F {
        &self.default_factory
    }

    pub fn into_inner(self) -> KeyTreeMap<K, V, S> {
        self.map
    }
}

impl<K: Clone, V, F: Fn() -> V, S: Storage<K>> DefaultKeyTreeMap<K, V, F, S> {
    /// The slot at `path`. If absent, a leaf made by the default factory is
    /// stored there first, creating intermediate nodes as a write would.
    pub fn get_or_insert_default(&mut self, path: impl Into<Path<K>>) -> Result<&mut Slot<K, V, S>> {
        let path: Path<K> = path.into();
        if !self.map.contains(&path) {
            let value = (self.default_factory)();
            self.map.insert(&path, value)?;
        }
        self.map.get_mut(path)
    }
}

impl<K: Clone, V: Clone, F: Clone, S: Storage<K>> Clone for DefaultKeyTreeMap<K, V, F, S> {
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
            default_factory: self.default_factory.clone(),
        }
    }
}

impl<K: Clone + fmt::Debug, V: fmt::Debug, F, S: Storage<K>> fmt::Debug
    for DefaultKeyTreeMap<K, V, F, S>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.map, f)
    }
}
