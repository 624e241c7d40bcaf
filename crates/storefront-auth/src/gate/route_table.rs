//! Declarative route table built from configuration.

use std::collections::HashSet;

use tracing::debug;

use storefront_core::config::RouteConfig;
use storefront_core::error::AppError;
use storefront_core::result::AppResult;

use super::route_guard::{RouteGuard, RouteOutcome};
use crate::permission::{PermissionEvaluator, SessionSource};

/// One navigable path. Routes without a guard are public.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    path: String,
    guard: Option<RouteGuard>,
}

impl RouteEntry {
    /// Public route.
    pub fn public(path: impl Into<String>) -> Self {
        Self {
            path: normalize_entry_path(&path.into()),
            guard: None,
        }
    }

    /// Route behind `guard`.
    pub fn guarded(path: impl Into<String>, guard: RouteGuard) -> Self {
        Self {
            path: normalize_entry_path(&path.into()),
            guard: Some(guard),
        }
    }

    /// Normalized path, lowercased.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Guard, if the route is protected.
    pub fn guard(&self) -> Option<&RouteGuard> {
        self.guard.as_ref()
    }

    /// Resolve navigation into this route.
    pub fn resolve<S: SessionSource>(&self, evaluator: &PermissionEvaluator<S>) -> RouteOutcome {
        match &self.guard {
            Some(guard) => guard.resolve(evaluator),
            None => RouteOutcome::Render,
        }
    }

    /// Whether `path` is this route or lies beneath it.
    fn covers(&self, path: &str) -> bool {
        if self.path == "/" || self.path == path {
            return true;
        }
        path.strip_prefix(self.path.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Routes with their guards, resolved by longest matching path prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Build a table from entries, rejecting relative and duplicate paths.
    pub fn new(entries: Vec<RouteEntry>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !entry.path.starts_with('/') {
                return Err(AppError::configuration(format!(
                    "Route path must be absolute: '{}'",
                    entry.path
                )));
            }
            if !seen.insert(entry.path.clone()) {
                return Err(AppError::configuration(format!(
                    "Duplicate route path: '{}'",
                    entry.path
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Build a table from the `[[routes]]` configuration section.
    ///
    /// A route with no `required_roles` is public.
    pub fn from_config(routes: &[RouteConfig]) -> AppResult<Self> {
        let entries = routes
            .iter()
            .map(|route| {
                if route.required_roles.is_empty() {
                    RouteEntry::public(route.path.as_str())
                } else {
                    RouteEntry::guarded(
                        route.path.as_str(),
                        RouteGuard::new(route.required_roles.iter().cloned())
                            .with_fallback(route.fallback.clone()),
                    )
                }
            })
            .collect();
        Self::new(entries)
    }

    /// All entries in configuration order.
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// The most specific entry covering `path`.
    pub fn find(&self, path: &str) -> Option<&RouteEntry> {
        let path = normalize_path(path);
        self.entries
            .iter()
            .filter(|entry| entry.covers(&path))
            .max_by_key(|entry| entry.path.len())
    }

    /// Resolve a navigation request for `path`.
    pub fn navigate<S: SessionSource>(
        &self,
        path: &str,
        evaluator: &PermissionEvaluator<S>,
    ) -> RouteOutcome {
        let outcome = match self.find(path) {
            Some(entry) => entry.resolve(evaluator),
            None => RouteOutcome::NotFound,
        };
        debug!(path, ?outcome, "Navigation resolved");
        outcome
    }
}

/// Reduce a requested path to the form entries are stored in.
///
/// Query and fragment are dropped, empty segments collapse and the result
/// is lowercased, so `//Admin/?tab=users` and `/admin` are the same route.
/// The result is always absolute.
fn normalize_path(path: &str) -> String {
    let path = path.trim();
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let segments: Vec<&str> = path[..end]
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();
    format!("/{}", segments.join("/")).to_lowercase()
}

/// Normalize a configured path, leaving relative paths as written so the
/// table can reject them.
fn normalize_entry_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.starts_with('/') {
        normalize_path(trimmed)
    } else {
        trimmed.to_string()
    }
}
