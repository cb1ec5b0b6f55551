//! Top-level facade crate for mysite.
//!
//! Re-exports the core policy types and the web application so users can depend on a single crate.

pub mod core {
    pub use mysite_core::*;
}

pub mod web {
    pub use mysite_web::*;
}
