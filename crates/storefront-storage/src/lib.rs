//! # storefront-storage
//!
//! [`SessionStorage`](storefront_core::traits::SessionStorage) backends
//! for the storefront access layer. The local backend plays the role a
//! browser's local storage plays for a web client: a small key-value
//! area that survives restarts.

pub mod factory;
pub mod providers;

pub use factory::build_session_storage;
#[cfg(feature = "local")]
pub use providers::LocalSessionStorage;
#[cfg(feature = "memory")]
pub use providers::MemorySessionStorage;
