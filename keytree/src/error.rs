/// Errors of path addressed operations.
///
/// `depth` is the index of the offending segment within the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Missing key: path does not resolve at segment {}", .depth)]
    MissingKey { depth: usize },

    #[error("Type conflict: segment {} holds a leaf and can not be descended into", .depth)]
    TypeConflict { depth: usize },
}

impl Error {
    pub(crate) fn missing(depth: usize) -> Self {
        Self::MissingKey { depth }
    }

    pub(crate) fn conflict(depth: usize) -> Self {
        Self::TypeConflict { depth }
    }

    pub fn depth(&self) -> usize {
        match self {
            Self::MissingKey { depth } | Self::TypeConflict { depth } => *depth,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
