//! Guarded route table configuration.

use serde::{Deserialize, Serialize};

/// A navigable route and the roles required to enter it.
///
/// ```toml
/// [[routes]]
/// path = "/admin"
/// required_roles = ["ADMIN"]
/// fallback = { type = "redirect", to = "/login" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Absolute path, e.g. `/seller/products`.
    pub path: String,
    /// Roles of which the visitor needs at least one. Empty means public.
    #[serde(default)]
    pub required_roles: Vec<String>,
    /// What to show when the visitor is denied.
    #[serde(default)]
    pub fallback: RouteFallback,
}

/// Outcome presented in place of a denied route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RouteFallback {
    /// Render nothing.
    Nothing,
    /// Render an access-denied view.
    Forbidden,
    /// Navigate somewhere else, typically the login view.
    Redirect {
        /// Target path.
        to: String,
    },
}

impl Default for RouteFallback {
    fn default() -> Self {
        Self::Nothing
    }
}

impl std::fmt::Display for RouteFallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteFallback::Nothing => write!(f, "nothing"),
            RouteFallback::Forbidden => write!(f, "forbidden"),
            RouteFallback::Redirect { to } => write!(f, "redirect to {to}"),
        }
    }
}
