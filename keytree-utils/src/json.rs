//! JSON documents as key trees
//!
//! Objects become child nodes, every other JSON value is a leaf. An empty
//! object is kept as an empty child node.
use crate::error::Result;
use keytree::{KeyTreeMap, Nested, Ordered, Path, Storage};
use serde_json::Value;
use smol_str::SmolStr;
use std::io::Read;

pub type JsonTree<S = Ordered> = KeyTreeMap<SmolStr, Value, S>;

pub fn from_reader<S: Storage<SmolStr>>(reader: impl Read) -> Result<JsonTree<S>> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn from_str<S: Storage<SmolStr>>(text: &str) -> Result<JsonTree<S>> {
    Ok(serde_json::from_str(text)?)
}

pub fn to_string_pretty<S: Storage<SmolStr>>(tree: &JsonTree<S>) -> Result<String> {
    Ok(serde_json::to_string_pretty(tree)?)
}

/// Parse a command line value. Text that is not valid JSON is taken as a string.
pub fn parse_value(text: &str) -> Nested<SmolStr, Value> {
    serde_json::from_str(text).unwrap_or_else(|_| Nested::Value(Value::String(text.to_owned())))
}

/// A path of string segments.
pub fn path<T: AsRef<str>>(segments: &[T]) -> Path<SmolStr> {
    segments.iter().map(SmolStr::new).collect()
}
