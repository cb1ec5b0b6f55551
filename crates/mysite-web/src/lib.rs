//! mysite web library entry.
//!
//! Wires configuration, the request throttle, compiled access policies,
//! authentication, in-memory storage and the shop/blog/accounts handlers into
//! one axum application. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod app_state;
pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod feed;
pub mod handlers;
pub mod policy;
pub mod router;
pub mod store;
pub mod throttle;
