//! Local filesystem session storage.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use storefront_core::error::{AppError, ErrorKind};
use storefront_core::result::AppResult;
use storefront_core::traits::SessionStorage;

/// File extension for stored entries.
const ENTRY_EXTENSION: &str = "json";

/// Session storage keeping one file per key under a root directory.
#[derive(Debug, Clone)]
pub struct LocalSessionStorage {
    /// Root directory for all entries.
    root: PathBuf,
}

impl LocalSessionStorage {
    /// Create a local storage rooted at the given path, creating it if needed.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create session directory: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a key to its file path.
    ///
    /// Keys are restricted to ASCII alphanumerics, `_`, `-` and `.` (not
    /// leading) so an entry can never escape the root directory.
    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(AppError::validation(format!(
                "Invalid session storage key: '{key}'"
            )));
        }
        Ok(self.root.join(format!("{key}.{ENTRY_EXTENSION}")))
    }
}

#[async_trait]
impl SessionStorage for LocalSessionStorage {
    fn backend_name(&self) -> &str {
        "local"
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.resolve(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read session entry: {key}"),
                e,
            )),
        }
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let path = self.resolve(key)?;
        let tmp_path = path.with_extension(format!("{ENTRY_EXTENSION}.tmp"));

        fs::write(&tmp_path, value).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write session entry: {key}"),
                e,
            )
        })?;
        fs::rename(&tmp_path, &path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to commit session entry: {key}"),
                e,
            )
        })?;

        debug!(key, bytes = value.len(), "Wrote session entry");
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let path = self.resolve(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, "Removed session entry");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to remove session entry: {key}"),
                e,
            )),
        }
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let path = self.resolve(key)?;
        fs::try_exists(&path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to check session entry: {key}"),
                e,
            )
        })
    }

    async fn health_check(&self) -> AppResult<bool> {
        match fs::metadata(&self.root).await {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to inspect session directory: {}", self.root.display()),
                e,
            )),
        }
    }
}
