//! Session storage implementations.

#[cfg(feature = "local")]
pub mod local;
#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "local")]
pub use local::LocalSessionStorage;
#[cfg(feature = "memory")]
pub use memory::MemorySessionStorage;
