//! Type-safe key-value storage for the Pizza Shack order flow.
//!
//! Plays the part browser local storage plays for the web client: a flat
//! namespace of string keys holding JSON documents. Two backends ship with the
//! crate:
//!
//! - [`MemoryStore`] - process-local, used by tests and short-lived sessions
//! - [`FileStore`] - one JSON file per key under a state directory
//!
//! # Example
//!
//! ```rust
//! use shack_cache::{Cache, MemoryStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Draft {
//!     notes: String,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("draft", &Draft { notes: "no onions".into() }).unwrap();
//!
//! let draft: Option<Draft> = cache.get("draft").unwrap();
//! assert_eq!(draft.unwrap().notes, "no onions");
//!
//! cache.delete("draft").unwrap();
//! assert!(!cache.exists("draft").unwrap());
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KvStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore};
}
