//! Display-only grouping of roles.

use serde::{Deserialize, Serialize};

use storefront_core::types::RoleGroupId;

/// A named group of roles shown in account and admin screens.
///
/// Role groups never take part in access decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGroup {
    /// Unique identifier.
    pub id: RoleGroupId,
    /// Display name.
    pub name: String,
}

impl RoleGroup {
    /// Create a group with a fresh identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RoleGroupId::new(),
            name: name.into(),
        }
    }

    /// Return a copy carrying a different name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            id: self.id,
            name: name.into(),
        }
    }
}
