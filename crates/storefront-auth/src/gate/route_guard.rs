//! Role-based route guard.

use serde::Serialize;
use tracing::debug;

use storefront_core::config::RouteFallback;

use super::decision::Decision;
use crate::permission::{PermissionEvaluator, SessionSource};

/// Decide whether any of `required_roles` is granted.
///
/// No roles means no way in: an empty list denies.
pub fn evaluate_route_guard<S, N>(
    evaluator: &PermissionEvaluator<S>,
    required_roles: &[N],
) -> Decision
where
    S: SessionSource,
    N: AsRef<str>,
{
    Decision::from_allowed(evaluator.has_any_permission(required_roles))
}

/// Result of resolving a navigation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RouteOutcome {
    /// Render the guarded route.
    Render,
    /// Show the route's fallback instead.
    Fallback(RouteFallback),
    /// No route matches the path.
    NotFound,
}

/// Allows navigation into a subtree only for holders of one of the required roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    required_roles: Vec<String>,
    fallback: RouteFallback,
}

impl RouteGuard {
    /// Guard requiring any of `required_roles`, rendering nothing when denied.
    pub fn new<I, S>(required_roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required_roles: required_roles.into_iter().map(Into::into).collect(),
            fallback: RouteFallback::Nothing,
        }
    }

    /// Set what is shown when navigation is denied.
    pub fn with_fallback(mut self, fallback: RouteFallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Roles this guard accepts.
    pub fn required_roles(&self) -> &[String] {
        &self.required_roles
    }

    /// The fallback shown on denial.
    pub fn fallback(&self) -> &RouteFallback {
        &self.fallback
    }

    /// Evaluate the guard against the current session.
    pub fn evaluate<S: SessionSource>(&self, evaluator: &PermissionEvaluator<S>) -> Decision {
        evaluate_route_guard(evaluator, self.required_roles.as_slice())
    }

    /// Resolve to the guarded content or the fallback.
    pub fn resolve<S: SessionSource>(&self, evaluator: &PermissionEvaluator<S>) -> RouteOutcome {
        let decision = self.evaluate(evaluator);
        debug!(roles = ?self.required_roles, %decision, "Route guard evaluated");
        match decision {
            Decision::Allow => RouteOutcome::Render,
            Decision::Deny => RouteOutcome::Fallback(self.fallback.clone()),
        }
    }
}
