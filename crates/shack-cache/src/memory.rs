//! In-memory key-value backend.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::{CacheError, KvStore};

/// Process-local store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Clone for MemoryStore {
    fn clone(&self) -> Self {
        let entries = self
            .entries
            .read()
            .map(|e| e.clone())
            .unwrap_or_default();
        Self {
            entries: RwLock::new(entries),
        }
    }
}

fn poisoned() -> CacheError {
    CacheError::StoreError("memory store lock poisoned".to_string())
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.contains_key(key))
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
