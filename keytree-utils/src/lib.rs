//! Utilities to work with key trees: JSON documents as trees, flat listings and
//! Graphviz renderings.
pub mod dump;
pub mod error;
pub mod json;

pub use error::{Error, Result};
