#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    KeyTree(#[from] keytree::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
