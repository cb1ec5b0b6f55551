//! Shared error type across mysite crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / failed validation.
    BadRequest,
    /// No (or an unknown) credential was presented.
    Unauthenticated,
    /// Authenticated, but the access policy denied the operation.
    Forbidden,
    /// Target does not exist.
    NotFound,
    /// Operation conflicts with existing state.
    Conflict,
    /// Throttled.
    RateLimited,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Unauthenticated => "UNAUTHENTICATED",
            ClientCode::Forbidden => "FORBIDDEN",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Conflict => "CONFLICT",
            ClientCode::RateLimited => "RATE_LIMITED",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, SiteError>;

/// Unified error type used by core and web.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("authentication required")]
    Unauthenticated,
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("rate limited")]
    RateLimited,
    /// Startup-time configuration problem. Never produced per request.
    #[error("config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl SiteError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            SiteError::BadRequest(_) => ClientCode::BadRequest,
            SiteError::Unauthenticated => ClientCode::Unauthenticated,
            SiteError::Forbidden(_) => ClientCode::Forbidden,
            SiteError::NotFound(_) => ClientCode::NotFound,
            SiteError::Conflict(_) => ClientCode::Conflict,
            SiteError::RateLimited => ClientCode::RateLimited,
            SiteError::Config(_) | SiteError::Internal(_) => ClientCode::Internal,
        }
    }
}
