//! # storefront-entity
//!
//! Domain entity models for the storefront access layer. Every struct in
//! this crate is a value object: `User` and `RoleGroup` are replaced
//! wholesale rather than mutated, and `Session` can only be built in one
//! of its two valid shapes.

pub mod session;
pub mod user;

pub use session::Session;
pub use user::{RoleGroup, User};
