//! Key-value persistence for session and profile state.
//!
//! Values are opaque strings. Each store that sits on top owns exactly one
//! key; nothing else reads or writes it.

mod file;

pub use file::FileStore;

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::errors::StorageError;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local storage; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}

/// Storage whose backing medium is gone: every call fails.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FailingStore;

#[cfg(test)]
impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Err(unavailable(key))
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(unavailable(key))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Err(unavailable(key))
    }
}

#[cfg(test)]
fn unavailable(key: &str) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        message: "device not ready".to_string(),
    }
}
