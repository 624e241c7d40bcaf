//! User entity model.

use serde::{Deserialize, Serialize};
use validator::Validate;

use storefront_core::types::UserId;

/// An authenticated storefront user, as returned by the authentication backend.
///
/// This is also the shape of the persisted session entry, so every field
/// must survive a JSON round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Login name.
    #[validate(length(min = 1, max = 100, message = "Username is required"))]
    pub username: String,
    /// Contact address.
    #[validate(email(message = "Email address is invalid"))]
    pub email: String,
    /// Human-readable display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Granted role and permission names, as issued by the backend.
    #[serde(default)]
    pub authorities: Vec<String>,
}

impl User {
    /// Create a user with a fresh identifier and no authorities.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            email: email.into(),
            name: None,
            phone: None,
            avatar: None,
            authorities: Vec::new(),
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Set the avatar URL.
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Replace the granted authorities.
    pub fn with_authorities<I, S>(mut self, authorities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authorities = authorities.into_iter().map(Into::into).collect();
        self
    }

    /// Name to show in the UI: the display name, or the username.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.username)
    }
}
