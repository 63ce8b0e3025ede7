use smallvec::SmallVec;
use std::{fmt, iter::FromIterator, ops::Deref};

/// An ordered sequence of segments, addressing a slot in a key tree.
///
/// A path of length 1 addresses a direct slot of the root. Longer paths descend
/// through one child node per segment but the last.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Path<K>(SmallVec<[K; 4]>);

/// Builds a [`Path`], converting every segment with `Into`.
///
/// ```
/// use keytree::{path, Path, Segment};
///
/// let p: Path<Segment> = path!["Root", 2, 3.5];
/// assert_eq!(p.len(), 3);
/// ```
#[macro_export]
macro_rules! path {
    ($($segment:expr),+ $(,)?) => {
        <$crate::Path<_> as ::core::iter::FromIterator<_>>::from_iter([
            $(::core::convert::Into::into($segment)),+
        ])
    };
}

impl<K> Path<K> {
    pub fn single(segment: K) -> Self {
        let mut segments = SmallVec::new();
        segments.push(segment);
        Self(segments)
    }

    pub fn segments(&self) -> &[K] {
        &self.0
    }

    pub fn push(&mut self, segment: K) {
        self.0.push(segment)
    }

    /// the first segment and the remainder, if any
    pub fn split_first(&self) -> Option<(&K, &[K])> {
        self.0.split_first()
    }

    pub fn into_vec(self) -> Vec<K> {
        self.0.into_vec()
    }
}

impl<K: Clone> Path<K> {
    /// `self` followed by `segment`
    pub fn child(&self, segment: K) -> Self {
        let mut res = self.clone();
        res.push(segment);
        res
    }
}

impl<K> Default for Path<K> {
    fn default() -> Self {
        Self(SmallVec::new())
    }
}

impl<K> Deref for Path<K> {
    type Target = [K];

    fn deref(&self) -> &[K] {
        &self.0
    }
}

impl<K> AsRef<[K]> for Path<K> {
    fn as_ref(&self) -> &[K] {
        &self.0
    }
}

impl<K> FromIterator<K> for Path<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<K> IntoIterator for Path<K> {
    type Item = K;
    type IntoIter = smallvec::IntoIter<[K; 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, K> IntoIterator for &'a Path<K> {
    type Item = &'a K;
    type IntoIter = std::slice::Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K, const N: usize> From<[K; N]> for Path<K> {
    fn from(segments: [K; N]) -> Self {
        IntoIterator::into_iter(segments).collect()
    }
}

impl<K> From<Vec<K>> for Path<K> {
    fn from(segments: Vec<K>) -> Self {
        Self(SmallVec::from_vec(segments))
    }
}

impl<K: Clone> From<&[K]> for Path<K> {
    fn from(segments: &[K]) -> Self {
        segments.iter().cloned().collect()
    }
}

impl<K: Clone> From<&Path<K>> for Path<K> {
    fn from(path: &Path<K>) -> Self {
        path.clone()
    }
}

impl<K: fmt::Debug> fmt::Debug for Path<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut t = f.debug_tuple("");
        for segment in self.0.iter() {
            t.field(segment);
        }
        t.finish()
    }
}

/// Displays as a tuple, `(a, b, c)`.
impl<K: fmt::Display> fmt::Display for Path<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", segment)?;
        }
        write!(f, ")")
    }
}
