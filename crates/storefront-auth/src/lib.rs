//! # storefront-auth
//!
//! Client-side authorization for the storefront: who is signed in, what
//! they may see, and where they may navigate.
//!
//! ## Modules
//!
//! - `authority`: role-name normalization and the authority source
//! - `permission`: permission queries that fail closed when signed out
//! - `gate`: permission gate, route guard, and the configured route table
//! - `store`: the persisted auth store and the role-group collection

pub mod authority;
pub mod gate;
pub mod permission;
pub mod store;

pub use authority::{AuthoritySource, CanonicalRole, canonicalize};
pub use gate::{Decision, MatchMode, PermissionGate, RouteGuard, RouteOutcome, RouteTable};
pub use permission::{PermissionEvaluator, SessionSource};
pub use store::{AuthStore, RoleGroupStore};
