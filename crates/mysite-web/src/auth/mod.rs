//! Authentication boundary.
//!
//! Credential checking is external: a bearer token maps to a [`Subject`]
//! through an [`Authenticator`]. The bundled registry keeps accounts in
//! memory and is seeded from config.
//!
//! [`Subject`]: mysite_core::subject::Subject

pub mod accounts;
pub mod extract;

pub use accounts::{Accounts, Authenticator, NewAccount};
pub use extract::{bearer_token, CurrentUser, MaybeUser};
