//! Pure access decisions for UI content and navigation.
//!
//! A gate never renders anything itself: it turns the evaluator's answer
//! into a [`Decision`] and lets the caller pick the matching content.

pub mod decision;
pub mod permission_gate;
pub mod route_guard;
pub mod route_table;

pub use decision::Decision;
pub use permission_gate::{MatchMode, PermissionGate, evaluate_gate};
pub use route_guard::{RouteGuard, RouteOutcome, evaluate_route_guard};
pub use route_table::{RouteEntry, RouteTable};
