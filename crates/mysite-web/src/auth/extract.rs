//! Request extractors for the acting subject.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use mysite_core::error::SiteError;
use mysite_core::subject::Subject;

use crate::app_state::AppState;
use crate::error::ApiError;

/// Authenticated subject; rejects with 401 when missing or unknown.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Subject);

/// Optional subject. No header means anonymous; a bad token is still 401.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<Subject>);

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(SiteError::Unauthenticated)?;
        Ok(CurrentUser(state.authenticate(token).await?))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(header::AUTHORIZATION) {
            return Ok(MaybeUser(None));
        }
        let token = bearer_token(&parts.headers).ok_or(SiteError::Unauthenticated)?;
        Ok(MaybeUser(Some(state.authenticate(token).await?)))
    }
}
