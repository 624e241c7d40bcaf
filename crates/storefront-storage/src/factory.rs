//! Builds the configured session storage backend.

use std::sync::Arc;

use tracing::info;

use storefront_core::config::{SessionConfig, StorageBackend};
use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::SessionStorage;

/// Create the backend selected by `config.backend`.
pub async fn build_session_storage(config: &SessionConfig) -> AppResult<Arc<dyn SessionStorage>> {
    let storage: Arc<dyn SessionStorage> = match config.backend {
        #[cfg(feature = "local")]
        StorageBackend::Local => {
            Arc::new(crate::providers::LocalSessionStorage::new(&config.directory).await?)
        }
        #[cfg(feature = "memory")]
        StorageBackend::Memory => Arc::new(crate::providers::MemorySessionStorage::new()),
        #[allow(unreachable_patterns)]
        other => {
            return Err(AppError::configuration(format!(
                "Storage backend '{other}' is not compiled in"
            )));
        }
    };

    info!(backend = storage.backend_name(), "Session storage ready");
    Ok(storage)
}
