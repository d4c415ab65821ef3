use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::KeyValueStore;
use crate::errors::StorageError;

/// Persistent storage keeping one file per key under a directory.
///
/// The directory is created on first write. Keys are restricted to ASCII
/// alphanumerics, `-` and `_` so they map onto file names unchanged.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(io_error(key, "key must be non-empty [A-Za-z0-9_-]"));
        }
        Ok(self.root.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, &e.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root).map_err(|e| io_error(key, &e.to_string()))?;

        // Write-then-rename so readers never see a half-written value.
        let staging = path.with_extension("tmp");
        fs::write(&staging, value).map_err(|e| io_error(key, &e.to_string()))?;
        fs::rename(&staging, &path).map_err(|e| io_error(key, &e.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key, &e.to_string())),
        }
    }
}

fn io_error(key: &str, message: &str) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        message: message.to_string(),
    }
}
