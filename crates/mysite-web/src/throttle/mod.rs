//! Request throttle (per-client minimum interval).
//!
//! `limiter` owns the visit records; `middleware` applies it in front of the
//! application routes and answers 429 on deny.

pub mod limiter;
pub mod middleware;

pub use limiter::{RequestThrottle, ThrottleDecision};
pub use middleware::{client_id, throttle_requests, UNKNOWN_CLIENT};
