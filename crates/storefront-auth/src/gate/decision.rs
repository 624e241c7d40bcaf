//! Allow/deny outcome shared by gates and guards.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result of an access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Show the protected content.
    Allow,
    /// Show the fallback instead.
    Deny,
}

impl Decision {
    /// `Allow` when `allowed` is true.
    pub fn from_allowed(allowed: bool) -> Self {
        if allowed { Self::Allow } else { Self::Deny }
    }

    /// Whether this is [`Decision::Allow`].
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Allow => write!(f, "allow"),
            Decision::Deny => write!(f, "deny"),
        }
    }
}
