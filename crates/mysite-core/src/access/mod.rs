//! Authorization layer (permission catalog + ownership policy).
//!
//! The catalog is compiled once at startup; the policy functions are pure and
//! can be called from any number of request tasks without synchronization.

pub mod catalog;
pub mod policy;

pub use catalog::{Permission, PermissionCatalog};
pub use policy::{can_create, can_mutate, AccessDecision, Owned};
