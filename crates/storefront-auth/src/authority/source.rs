//! Authority source: the set of authorities granted to the current session.

use std::collections::BTreeSet;

use storefront_entity::Session;

use super::canonical::{CanonicalRole, canonicalize};

/// Canonical authorities held by a session.
pub type AuthoritySet = BTreeSet<CanonicalRole>;

/// Anything that can report the authorities granted right now.
///
/// Implementors derive the set on every call; there is no cache to
/// invalidate.
///
/// Empty queries: `has_any_authority(&[])` is `false` (nothing to
/// satisfy), `has_all_authorities(&[])` is `true` (vacuous truth).
pub trait AuthoritySource {
    /// Canonical authorities granted now; empty when nobody is signed in.
    fn authorities(&self) -> AuthoritySet;

    /// Whether the named authority is granted.
    fn has_authority(&self, name: &str) -> bool {
        is_granted(&self.authorities(), name)
    }

    /// Whether at least one of the named authorities is granted.
    fn has_any_authority<S: AsRef<str>>(&self, names: &[S]) -> bool {
        any_granted(&self.authorities(), names)
    }

    /// Whether every named authority is granted.
    fn has_all_authorities<S: AsRef<str>>(&self, names: &[S]) -> bool {
        all_granted(&self.authorities(), names)
    }
}

impl AuthoritySource for Session {
    fn authorities(&self) -> AuthoritySet {
        if !self.is_authenticated() {
            return AuthoritySet::new();
        }
        self.granted_authorities()
            .iter()
            .map(|name| canonicalize(name))
            .filter(|role| !role.is_blank())
            .collect()
    }
}

/// Membership test in canonical form. Blank names are never granted.
pub(crate) fn is_granted(granted: &AuthoritySet, name: &str) -> bool {
    let role = canonicalize(name);
    !role.is_blank() && granted.contains(&role)
}

pub(crate) fn any_granted<S: AsRef<str>>(granted: &AuthoritySet, names: &[S]) -> bool {
    names.iter().any(|name| is_granted(granted, name.as_ref()))
}

pub(crate) fn all_granted<S: AsRef<str>>(granted: &AuthoritySet, names: &[S]) -> bool {
    names.iter().all(|name| is_granted(granted, name.as_ref()))
}
