//! Browser-style local key-value storage for the museum cart.
//!
//! A page owns a single flat namespace of text slots, the same shape as
//! `window.localStorage`. Two backends are provided:
//!
//! - [`MemoryStore`] keeps slots in process memory (tests, embedding).
//! - [`FileStore`] keeps slots in one JSON file on disk (the CLI).
//!
//! [`Cache`] layers typed JSON access on top of any [`KeyValueStore`].
//!
//! # Example
//!
//! ```rust
//! use museum_cache::{Cache, MemoryStore};
//!
//! let mut cache = Cache::new(MemoryStore::new());
//! cache.set("visits", &3u32).unwrap();
//! assert_eq!(cache.get::<u32>("visits").unwrap(), Some(3));
//! ```

mod error;
mod file;
mod kv;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
