//! Error types for the waterwheel crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("bucket count must be at least 1, got {0}")]
    InvalidBucketCount(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported snapshot version: {0}")]
    UnsupportedSnapshotVersion(u32),
}

pub type Result<T> = std::result::Result<T, Error>;
