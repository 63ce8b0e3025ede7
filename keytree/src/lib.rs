//! # Key trees
//!
//! A key tree is a map whose keys are *paths*. Under the hood it is a tree of
//! ordinary single level maps: every level maps one *segment* to a slot, and a
//! slot is either a leaf value or another level of the same kind.
//!
//! The flat view hides the nesting. `keys()` yields one path per leaf, and
//! `get`, `insert` and `remove` take paths and walk the tree segment by segment:
//!
//! ```
//! use keytree::{KeyTreeMap, Nested, Path};
//!
//! let mut tree: KeyTreeMap<&str, i32> = KeyTreeMap::from_entries(vec![(
//!     "Root",
//!     Nested::map(vec![
//!         ("A", Nested::Value(1)),
//!         ("B", Nested::map(vec![("B-1", Nested::Value(2))])),
//!     ]),
//! )]);
//!
//! assert_eq!(tree.get(["Root", "B", "B-1"])?.as_leaf(), Some(&2));
//!
//! // intermediate nodes are created on demand
//! tree.insert(["x", "y"], 3)?;
//! // and removed again once they are empty
//! tree.remove(["x", "y"])?;
//!
//! let keys: Vec<_> = tree.keys().collect();
//! assert_eq!(keys, vec![Path::from(["Root", "A"]), Path::from(["Root", "B", "B-1"])]);
//! # Ok::<(), keytree::Error>(())
//! ```
//!
//! # Writes through leaves
//!
//! A leaf can not be partially overwritten. Writing below a path that holds a
//! leaf fails with [`Error::TypeConflict`] and leaves the tree untouched.
//!
//! # Storage
//!
//! The container used for every level is picked with the [`Storage`] parameter.
//! [`Ordered`] keeps insertion order, [`Sorted`] keeps segments sorted. The flat
//! view follows that order level by level.
//!
//! # Plain nested data
//!
//! [`Nested`] and [`NestedMap`] are the plain form of a tree. Nested maps are
//! coerced into child nodes when they are written, and `to_nested` /
//! `into_nested` convert back. With the `serde` feature a key tree serializes as
//! its nested form.
pub mod defaulting;
pub mod error;
pub mod map;
pub mod nested;
pub mod path;
pub mod segment;
#[cfg(feature = "serde")]
mod serde_impls;
pub mod storage;
mod util;

pub use defaulting::DefaultKeyTreeMap;
pub use error::{Error, Result};
pub use map::{Iter, KeyTreeMap, Slot};
pub use nested::{Nested, NestedMap};
pub use path::Path;
pub use segment::{FloatKey, Segment};
pub use storage::{Ordered, Sorted, Storage, Table};
pub use util::BoxedIter;

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;
