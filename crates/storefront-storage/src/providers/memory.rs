//! In-memory session storage using dashmap.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use storefront_core::result::AppResult;
use storefront_core::traits::SessionStorage;

/// Session storage held in process memory; cloned handles share entries.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStorage {
    entries: Arc<DashMap<String, String>>,
}

impl MemorySessionStorage {
    /// Create an empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    fn backend_name(&self) -> &str {
        "memory"
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.entries.contains_key(key))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
