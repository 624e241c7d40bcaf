//! Key-value persistence trait backing the signed-in session.

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for session persistence backends (local files or memory).
///
/// Values are opaque strings (JSON in practice). Entries have no TTL:
/// they live until removed, and for durable backends they outlive the
/// process.
#[async_trait]
pub trait SessionStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Short backend name used in logs.
    fn backend_name(&self) -> &str;

    /// Get a value by key. Returns `None` if the key does not exist.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store a value, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;

    /// Check whether a key is present.
    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Check that the backend is usable.
    async fn health_check(&self) -> AppResult<bool>;
}
