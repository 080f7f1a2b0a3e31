//! Process-local cache storage

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use nav_core::error::NavError;
use nav_core::repositories::CacheStorage;

/// Volatile storage; contents disappear with the process.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl CacheStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, NavError> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), NavError> {
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), NavError> {
        self.entries.write().remove(key);
        Ok(())
    }
}
