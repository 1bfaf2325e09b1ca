//! In-process selection store for hosts without a database

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::StorageError;
use crate::{Result, SelectionStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Arc<RwLock<HashMap<String, usize>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, as if a previous run had persisted it.
    pub fn with_index(key: impl Into<String>, index: usize) -> Self {
        let store = Self::new();
        store.values.write().insert(key.into(), index);
        store
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.values.read().get(key).copied()
    }
}

impl Clone for MemoryStore {
    fn clone(&self) -> Self {
        Self {
            values: Arc::clone(&self.values),
        }
    }
}

impl SelectionStore for MemoryStore {
    fn load_index(&self, key: &str) -> Result<Option<usize>> {
        Ok(self.get(key))
    }

    fn save_index(&self, key: &str, index: usize) -> Result<()> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        self.values.write().insert(key.to_string(), index);
        Ok(())
    }
}
