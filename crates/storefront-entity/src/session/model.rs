//! Session entity model.

use serde::Serialize;

use crate::user::User;

/// The signed-in state of the storefront.
///
/// `is_authenticated` is true exactly when a user is present. The fields
/// are private and the only constructors are [`Session::anonymous`] and
/// [`Session::authenticated`], so no other combination can exist.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Session {
    is_authenticated: bool,
    user: Option<User>,
}

impl Session {
    /// A session with nobody signed in.
    pub fn anonymous() -> Self {
        Self {
            is_authenticated: false,
            user: None,
        }
    }

    /// A session for the given user.
    pub fn authenticated(user: User) -> Self {
        Self {
            is_authenticated: true,
            user: Some(user),
        }
    }

    /// Whether a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Authorities granted to the signed-in user; empty when anonymous.
    pub fn granted_authorities(&self) -> &[String] {
        match &self.user {
            Some(user) if self.is_authenticated => user.authorities.as_slice(),
            _ => &[],
        }
    }
}
