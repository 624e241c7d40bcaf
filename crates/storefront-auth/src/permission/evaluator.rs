//! Permission evaluator: authority queries that fail closed when nobody is signed in.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::watch;

use storefront_entity::Session;

use crate::authority::source::{all_granted, any_granted, is_granted};
use crate::authority::{AuthoritySet, AuthoritySource, canonicalize};

/// Gives read access to the current session.
///
/// Implementors must hand out the latest committed session on every call;
/// callers never keep the borrowed session past the closure.
pub trait SessionSource {
    /// Run `f` against the current session.
    fn with_session<R>(&self, f: impl FnOnce(&Session) -> R) -> R;
}

impl SessionSource for Session {
    fn with_session<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(self)
    }
}

impl SessionSource for watch::Receiver<Session> {
    fn with_session<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.borrow())
    }
}

impl<T: SessionSource> SessionSource for &T {
    fn with_session<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        (**self).with_session(f)
    }
}

impl<T: SessionSource> SessionSource for Arc<T> {
    fn with_session<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        (**self).with_session(f)
    }
}

/// Answers permission queries for whoever is signed in.
///
/// Every query re-reads the session and first checks that a user is
/// authenticated; if not, the answer is `false` whatever authorities might
/// linger. This includes `has_all_permissions(&[])`, which is `true` only
/// for an authenticated session.
#[derive(Debug, Clone)]
pub struct PermissionEvaluator<S> {
    source: S,
}

impl<S: SessionSource> PermissionEvaluator<S> {
    /// Creates an evaluator reading from `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Whether a user is signed in right now.
    pub fn is_authenticated(&self) -> bool {
        self.source.with_session(Session::is_authenticated)
    }

    /// Canonical authorities of the signed-in user; empty when anonymous.
    pub fn authorities(&self) -> AuthoritySet {
        self.granted().unwrap_or_default()
    }

    /// Whether the named permission is granted.
    pub fn has_permission(&self, name: &str) -> bool {
        self.granted()
            .is_some_and(|granted| is_granted(&granted, name))
    }

    /// Whether at least one named permission is granted. Empty input is `false`.
    pub fn has_any_permission<N: AsRef<str>>(&self, names: &[N]) -> bool {
        self.granted()
            .is_some_and(|granted| any_granted(&granted, names))
    }

    /// Whether every named permission is granted. Empty input is `true`
    /// when authenticated.
    pub fn has_all_permissions<N: AsRef<str>>(&self, names: &[N]) -> bool {
        self.granted()
            .is_some_and(|granted| all_granted(&granted, names))
    }

    /// The granted permission strings as issued, in grant order, without
    /// blank entries or aliases of an earlier entry. Empty when anonymous.
    pub fn user_permissions(&self) -> Vec<String> {
        self.source.with_session(|session| {
            if !session.is_authenticated() {
                return Vec::new();
            }
            let mut seen = HashSet::new();
            session
                .granted_authorities()
                .iter()
                .filter(|name| {
                    let role = canonicalize(name);
                    !role.is_blank() && seen.insert(role)
                })
                .cloned()
                .collect()
        })
    }

    /// Authorities of an authenticated session, or `None`.
    fn granted(&self) -> Option<AuthoritySet> {
        self.source.with_session(|session| {
            session
                .is_authenticated()
                .then(|| session.authorities())
        })
    }
}
