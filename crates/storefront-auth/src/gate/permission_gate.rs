//! Conditional content selection on permissions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use storefront_core::error::AppError;

use super::decision::Decision;
use crate::permission::{PermissionEvaluator, SessionSource};

/// How a gate combines its required permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// At least one required permission must be granted.
    #[default]
    Any,
    /// Every required permission must be granted.
    All,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Any => write!(f, "any"),
            MatchMode::All => write!(f, "all"),
        }
    }
}

impl FromStr for MatchMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "all" => Ok(Self::All),
            _ => Err(AppError::validation(format!(
                "Invalid match mode: '{s}'. Expected one of: any, all"
            ))),
        }
    }
}

/// Decide whether `required` is satisfied under `mode`.
///
/// `Any` with no requirements denies; `All` with no requirements allows a
/// signed-in user. Anonymous sessions are always denied.
pub fn evaluate_gate<S, N>(
    evaluator: &PermissionEvaluator<S>,
    required: &[N],
    mode: MatchMode,
) -> Decision
where
    S: SessionSource,
    N: AsRef<str>,
{
    let allowed = match mode {
        MatchMode::Any => evaluator.has_any_permission(required),
        MatchMode::All => evaluator.has_all_permissions(required),
    };
    Decision::from_allowed(allowed)
}

/// Picks between primary and denied content depending on permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGate {
    /// Permissions the gate checks.
    required_permissions: Vec<String>,
    /// How the permissions combine.
    #[serde(default)]
    match_mode: MatchMode,
}

impl PermissionGate {
    /// Gate requiring any of `required_permissions`.
    pub fn new<I, S>(required_permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required_permissions: required_permissions.into_iter().map(Into::into).collect(),
            match_mode: MatchMode::Any,
        }
    }

    /// Gate requiring all of `required_permissions`.
    pub fn all<I, S>(required_permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(required_permissions).with_mode(MatchMode::All)
    }

    /// Change the match mode.
    pub fn with_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    /// Permissions this gate checks.
    pub fn required_permissions(&self) -> &[String] {
        &self.required_permissions
    }

    /// The match mode.
    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Evaluate the gate against the current session.
    pub fn evaluate<S: SessionSource>(&self, evaluator: &PermissionEvaluator<S>) -> Decision {
        let decision = evaluate_gate(
            evaluator,
            self.required_permissions.as_slice(),
            self.match_mode,
        );
        debug!(
            required = ?self.required_permissions,
            mode = %self.match_mode,
            %decision,
            "Permission gate evaluated"
        );
        decision
    }

    /// Return `primary` when allowed, otherwise `denied` (`None` renders nothing).
    pub fn select<S: SessionSource, T>(
        &self,
        evaluator: &PermissionEvaluator<S>,
        primary: T,
        denied: Option<T>,
    ) -> Option<T> {
        match self.evaluate(evaluator) {
            Decision::Allow => Some(primary),
            Decision::Deny => denied,
        }
    }

    /// Like [`select`](Self::select), building only the content that is shown.
    pub fn render<S, T, P, D>(
        &self,
        evaluator: &PermissionEvaluator<S>,
        primary: P,
        denied: D,
    ) -> Option<T>
    where
        S: SessionSource,
        P: FnOnce() -> T,
        D: FnOnce() -> Option<T>,
    {
        match self.evaluate(evaluator) {
            Decision::Allow => Some(primary()),
            Decision::Deny => denied(),
        }
    }
}
