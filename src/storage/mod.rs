//! Persistence substrate for the store.
//!
//! The store only ever needs a string-keyed blob store with `load` and
//! `save`; the browser build backs this with local storage, the host binary
//! with a directory of JSON files and tests with [`MemoryStore`].

mod codec;
mod file;
mod memory;

pub use codec::{decode_orders, decode_products, encode};
pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

/// Key-value blob storage the store persists its collections to.
pub trait KeyValueStore {
    /// Returns the blob stored under `key`, or `None` if nothing was saved yet.
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Replaces the blob stored under `key`.
    fn save(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> { (**self).load(key) }
    fn save(&self, key: &str, value: &str) -> Result<(), PersistenceError> { (**self).save(key, value) }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> { (**self).load(key) }
    fn save(&self, key: &str, value: &str) -> Result<(), PersistenceError> { (**self).save(key, value) }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> { (**self).load(key) }
    fn save(&self, key: &str, value: &str) -> Result<(), PersistenceError> { (**self).save(key, value) }
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode snapshot: {0}")]
    Decode(#[source] serde_json::Error),

    /// A snapshot parsed as JSON but holds values the store cannot accept.
    #[error("corrupt snapshot: {0}")]
    Corrupt(String),

    /// The substrate refused the operation, e.g. its quota is exhausted.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}
