//! Permission evaluation behind an authentication pre-check.

pub mod evaluator;

pub use evaluator::{PermissionEvaluator, SessionSource};
