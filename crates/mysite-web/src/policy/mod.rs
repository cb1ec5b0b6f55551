//! Policy layer (compiled permission rules per resource kind).
//!
//! Compiles the permissions section of the config into resolved
//! [`Permission`](mysite_core::access::Permission) values once at startup so
//! handlers never look a name up per request.

pub mod engine;

pub use engine::{ResourceKind, ResourcePolicy, SitePolicies};
