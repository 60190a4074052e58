//! Cache error types.

use thiserror::Error;

/// Errors that can occur when using the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open the store.
    #[error("Failed to open store at {path}: {source}")]
    OpenError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to perform store operation.
    #[error("Store operation failed: {0}")]
    StoreError(String),

    /// I/O failure in a file-backed store.
    #[error("I/O error on key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

impl CacheError {
    pub(crate) fn io(key: &str, source: std::io::Error) -> Self {
        CacheError::Io {
            key: key.to_string(),
            source,
        }
    }
}
