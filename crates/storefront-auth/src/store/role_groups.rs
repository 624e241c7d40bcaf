//! Display-only role-group collection.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::SessionStorage;
use storefront_core::types::RoleGroupId;
use storefront_entity::RoleGroup;

/// Role groups shown in admin screens, persisted as one JSON array.
///
/// Nothing in the access checks reads this collection.
pub struct RoleGroupStore {
    storage: Arc<dyn SessionStorage>,
    storage_key: String,
    groups: RwLock<Vec<RoleGroup>>,
}

impl std::fmt::Debug for RoleGroupStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleGroupStore")
            .field("storage_key", &self.storage_key)
            .finish()
    }
}

impl RoleGroupStore {
    /// Loads the collection. A missing or malformed entry loads as empty.
    pub async fn load(storage: Arc<dyn SessionStorage>, storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();
        let groups = match storage.get(&storage_key).await {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(key = %storage_key, error = %e, "Role groups are malformed; starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = %storage_key, error = %e, "Failed to read role groups; starting empty");
                Vec::new()
            }
        };

        Self {
            storage,
            storage_key,
            groups: RwLock::new(groups),
        }
    }

    /// All groups, sorted by name.
    pub async fn list(&self) -> Vec<RoleGroup> {
        let mut groups = self.groups.read().await.clone();
        groups.sort_by_key(|group| group.name.to_lowercase());
        groups
    }

    /// Finds a group by id.
    pub async fn get(&self, id: RoleGroupId) -> Option<RoleGroup> {
        self.groups
            .read()
            .await
            .iter()
            .find(|group| group.id == id)
            .cloned()
    }

    /// Adds a group. Names are trimmed and must be unique ignoring case.
    pub async fn add(&self, name: &str) -> AppResult<RoleGroup> {
        let name = validate_name(name)?;
        let mut groups = self.groups.write().await;
        ensure_unique(&groups, &name, None)?;

        let group = RoleGroup::new(name);
        let mut updated = groups.clone();
        updated.push(group.clone());
        self.persist(&updated).await?;
        *groups = updated;

        info!(group_id = %group.id, name = %group.name, "Role group added");
        Ok(group)
    }

    /// Renames a group.
    pub async fn rename(&self, id: RoleGroupId, name: &str) -> AppResult<RoleGroup> {
        let name = validate_name(name)?;
        let mut groups = self.groups.write().await;
        ensure_unique(&groups, &name, Some(id))?;

        let index = position(&groups, id)?;
        let renamed = groups[index].renamed(name);
        let mut updated = groups.clone();
        updated[index] = renamed.clone();
        self.persist(&updated).await?;
        *groups = updated;

        info!(group_id = %id, name = %renamed.name, "Role group renamed");
        Ok(renamed)
    }

    /// Removes a group, returning it.
    pub async fn remove(&self, id: RoleGroupId) -> AppResult<RoleGroup> {
        let mut groups = self.groups.write().await;
        let index = position(&groups, id)?;

        let mut updated = groups.clone();
        let removed = updated.remove(index);
        self.persist(&updated).await?;
        *groups = updated;

        info!(group_id = %id, name = %removed.name, "Role group removed");
        Ok(removed)
    }

    async fn persist(&self, groups: &[RoleGroup]) -> AppResult<()> {
        let payload = serde_json::to_string(groups)?;
        self.storage.set(&self.storage_key, &payload).await
    }
}

fn validate_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Role group name is required"));
    }
    Ok(name.to_string())
}

fn ensure_unique(groups: &[RoleGroup], name: &str, except: Option<RoleGroupId>) -> AppResult<()> {
    let clash = groups
        .iter()
        .filter(|group| Some(group.id) != except)
        .any(|group| group.name.eq_ignore_ascii_case(name));
    if clash {
        return Err(AppError::conflict(format!(
            "Role group '{name}' already exists"
        )));
    }
    Ok(())
}

fn position(groups: &[RoleGroup], id: RoleGroupId) -> AppResult<usize> {
    groups
        .iter()
        .position(|group| group.id == id)
        .ok_or_else(|| AppError::not_found(format!("Role group {id} not found")))
}
