//! User domain entities.

pub mod model;
pub mod role_group;

pub use model::User;
pub use role_group::RoleGroup;
