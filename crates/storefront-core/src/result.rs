//! Convenience result type alias for the storefront crates.

use crate::error::AppError;

/// A specialized `Result` type for storefront operations.
///
/// Every crate in the workspace returns `AppResult<T>` rather than
/// spelling out `Result<T, AppError>`.
pub type AppResult<T> = Result<T, AppError>;
