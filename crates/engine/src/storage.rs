//! Durable key/value storage collaborators for the cart.
//!
//! The engine only ever asks for `get(key)` and `set(key, value)`; what
//! sits behind that is the caller's business. [`FileStorage`] is what
//! the CLI uses, [`MemoryStorage`] is for tests and throwaway sessions.
//!
//! Storage trouble is never fatal. A failed read is `None` (the cart
//! loads empty), a failed write is logged and absorbed.

use std::collections::HashMap;
use std::path::PathBuf;

/// Key/value persistence for the cart mapping.
pub trait CartStorage {
    /// The last value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory storage; durable only for the lifetime of the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// File-backed storage: one file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at `dir`. The directory is created on the
    /// first write, not here.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CartStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(error) = std::fs::create_dir_all(&self.dir)
            .and_then(|()| std::fs::write(self.path_for(key), value))
        {
            tracing::warn!(%error, key, "cart persistence write failed");
        }
    }
}
