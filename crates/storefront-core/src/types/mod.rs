//! Core type definitions used across the storefront workspace.

pub mod id;

pub use id::*;
