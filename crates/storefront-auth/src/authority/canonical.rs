//! Role-name normalization.
//!
//! A role can be written as a bare name (`seller`), in upper case
//! (`SELLER`), or with the Spring-style prefix (`ROLE_SELLER`). All of
//! these name the same role. Every comparison in this crate goes through
//! [`canonicalize`] first.

use std::fmt;

use serde::Serialize;

/// Prefix that marks a role name; stripped during normalization.
pub const ROLE_PREFIX: &str = "ROLE_";

/// A role or permission name in canonical form: trimmed, upper case,
/// without the `ROLE_` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CanonicalRole(String);

impl CanonicalRole {
    /// The canonical name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name was empty after normalization. Blank names never
    /// match anything.
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    /// The `ROLE_`-prefixed spelling of this role.
    pub fn prefixed(&self) -> String {
        format!("{ROLE_PREFIX}{}", self.0)
    }
}

impl fmt::Display for CanonicalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalRole {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize a role or permission name.
///
/// Trims surrounding whitespace, upper-cases, then strips one leading
/// `ROLE_` prefix.
pub fn canonicalize(name: &str) -> CanonicalRole {
    let upper = name.trim().to_uppercase();
    let bare = upper.strip_prefix(ROLE_PREFIX).unwrap_or(&upper);
    CanonicalRole(bare.trim().to_string())
}
