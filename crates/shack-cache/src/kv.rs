//! Key-Value store wrapper with automatic serialization.

use crate::{CacheError, MemoryStore};
use serde::{de::DeserializeOwned, Serialize};

/// A raw byte-oriented key-value backend.
///
/// Implementations must be safe to share between threads; the order flow
/// itself is single-threaded but the server and tests hold stores behind
/// `Arc`.
pub trait KvStore: Send + Sync {
    /// Read the bytes stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Replace whatever is stored under `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check if `key` is present.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }

    /// List every key in the store.
    fn keys(&self) -> Result<Vec<String>, CacheError>;
}

impl<S: KvStore + ?Sized> KvStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        (**self).exists(key)
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        (**self).keys()
    }
}

/// Type-safe cache over a [`KvStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct Cache<S = MemoryStore> {
    store: S,
}

impl Cache<MemoryStore> {
    /// Open an empty in-memory cache.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<S: KvStore> Cache<S> {
    /// Wrap a backend.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying backend.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist. A stored value that does not
    /// deserialize as `T` is an error.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Get the raw stored bytes without deserializing.
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.store.get(key)
    }

    /// Set a value in the cache, replacing any prior value.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }
}
