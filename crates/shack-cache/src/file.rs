//! File-backed key-value backend.
//!
//! Each key maps to one `<encoded-key>.json` file under the store root. Keys
//! are percent-encoded so any string is a valid key and `keys()` can recover
//! the original names.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{CacheError, KvStore};

const EXTENSION: &str = "json";

/// Store that persists each key as a file in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| CacheError::OpenError {
            path: root.display().to_string(),
            source,
        })?;
        debug!(root = %root.display(), "opened file store");
        Ok(Self { root })
    }

    /// Directory holding the store's files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.{}", encode_key(key), EXTENSION))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::io(key, e)),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| CacheError::io(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| CacheError::io(key, e))
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::io(key, e)),
        }
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.path_for(key).is_file())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let entries = fs::read_dir(&self.root).map_err(|e| CacheError::io("*", e))?;
        let mut keys = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| CacheError::io("*", e))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(key) = path.file_stem().and_then(|s| s.to_str()).and_then(decode_key) {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

fn decode_key(encoded: &str) -> Option<String> {
    let bytes = encoded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = encoded.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}
