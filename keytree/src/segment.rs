//! a ready made scalar segment type for trees with heterogeneous keys
use smol_str::SmolStr;
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

/// A hashable scalar path segment.
///
/// Variants compare in declaration order first, so `Int(1)` and `Float(1.0)`
/// are distinct segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::From)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Segment {
    Bool(bool),
    Int(i64),
    Float(FloatKey),
    Str(SmolStr),
}

impl From<i32> for Segment {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for Segment {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for Segment {
    fn from(value: f64) -> Self {
        Self::Float(FloatKey::new(value))
    }
}

impl From<&str> for Segment {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for Segment {
    fn from(value: String) -> Self {
        Self::Str(value.into())
    }
}

impl Segment {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(x) => write!(f, "{}", x),
            Self::Int(x) => write!(f, "{}", x),
            Self::Float(x) => write!(f, "{}", x),
            Self::Str(x) => write!(f, "{:?}", x.as_str()),
        }
    }
}

/// An `f64` usable as a map key.
///
/// Equality, ordering and hashing are total. `-0.0` is stored as `0.0`, and
/// all NaNs with the same bit pattern are equal.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "f64", into = "f64"))]
pub struct FloatKey(f64);

impl FloatKey {
    pub fn new(value: f64) -> Self {
        Self(if value == 0.0 { 0.0 } else { value })
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<f64> for FloatKey {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<FloatKey> for f64 {
    fn from(value: FloatKey) -> Self {
        value.0
    }
}

impl PartialEq for FloatKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatKey {}

impl Hash for FloatKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state)
    }
}

impl PartialOrd for FloatKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for FloatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
