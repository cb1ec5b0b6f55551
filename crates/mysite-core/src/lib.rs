//! mysite core: subjects, owned resources, the permission catalog, the
//! access policy and the shop/blog domain models.
//!
//! Nothing here knows about HTTP or an async runtime. The web crate wires
//! these types into handlers; the tests drive the policy directly.
//!
//! `unwrap`, `expect` and `panic!` are denied by clippy in this crate. Bad
//! input comes back as a `SiteError`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod access;
pub mod error;
pub mod model;
pub mod subject;

/// Shared result type.
pub use error::{Result, SiteError};
