use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use super::{KeyValueStore, PersistenceError};

/// In-process key-value store, optionally with a byte quota like the
/// browser's local storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    /// Store that refuses saves once keys plus values exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self { Self { quota: Some(bytes), ..Self::default() } }

    pub fn len(&self) -> usize { self.lock().map(|e| e.len()).unwrap_or(0) }
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, PersistenceError> {
        self.entries.lock().map_err(|_| PersistenceError::Unavailable("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut entries = self.lock()?;
        if let Some(quota) = self.quota {
            let others: usize = entries.iter().filter(|(k, _)| k.as_str() != key).map(|(k, v)| k.len() + v.len()).sum();
            if others + key.len() + value.len() > quota {
                return Err(PersistenceError::Unavailable(format!("quota of {quota} bytes exceeded")));
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
