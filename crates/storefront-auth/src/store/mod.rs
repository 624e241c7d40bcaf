//! Process-wide state containers: the signed-in session and role groups.

pub mod auth_store;
pub mod role_groups;

pub use auth_store::AuthStore;
pub use role_groups::RoleGroupStore;
