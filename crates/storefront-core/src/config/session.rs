//! Session persistence configuration.

use serde::{Deserialize, Serialize};

/// Where and how the signed-in session is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Which storage backend holds the persisted entries.
    #[serde(default)]
    pub backend: StorageBackend,
    /// Root directory for the `local` backend.
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Key under which the serialized user is stored.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Key under which the role-group collection is stored.
    #[serde(default = "default_role_groups_key")]
    pub role_groups_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            directory: default_directory(),
            storage_key: default_storage_key(),
            role_groups_key: default_role_groups_key(),
        }
    }
}

/// Available session storage backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// One file per key under [`SessionConfig::directory`]; survives restarts.
    Local,
    /// Process memory only; lost on exit.
    Memory,
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::Local
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

fn default_directory() -> String {
    "data/session".to_string()
}

fn default_storage_key() -> String {
    "user".to_string()
}

fn default_role_groups_key() -> String {
    "role_groups".to_string()
}
