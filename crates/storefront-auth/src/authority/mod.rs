//! Granted authorities and role-name normalization.

pub mod canonical;
pub mod source;

pub use canonical::{CanonicalRole, ROLE_PREFIX, canonicalize};
pub use source::{AuthoritySet, AuthoritySource};
