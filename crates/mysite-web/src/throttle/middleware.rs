//! Axum middleware applying [`RequestThrottle`](super::RequestThrottle).

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::app_state::AppState;

use super::ThrottleDecision;

/// Key used when neither a peer address nor a forwarded hop is available.
pub const UNKNOWN_CLIENT: &str = "unknown";

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Resolve the throttling key for a request.
///
/// Peer IP first, then the first `X-Forwarded-For` hop, then
/// [`UNKNOWN_CLIENT`]. With `trust_forwarded_for` the forwarded hop wins.
pub fn client_id(peer: Option<SocketAddr>, headers: &HeaderMap, trust_forwarded_for: bool) -> String {
    let forwarded = headers
        .get(FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    let peer = peer.map(|a| a.ip().to_string());

    let chosen = if trust_forwarded_for {
        forwarded.map(str::to_string).or(peer)
    } else {
        peer.or_else(|| forwarded.map(str::to_string))
    };
    chosen.unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

pub async fn throttle_requests(State(app): State<AppState>, req: Request, next: Next) -> Response {
    let Some(throttle) = app.throttle() else {
        return next.run(req).await;
    };

    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = client_id(peer, req.headers(), app.cfg().throttle.trust_forwarded_for);

    match throttle.check_and_record(&client, Instant::now()) {
        ThrottleDecision::Allow => next.run(req).await,
        ThrottleDecision::Deny { retry_after } => {
            tracing::debug!(%client, path = %req.uri().path(), ?retry_after, "request throttled");
            // Retry-After is whole seconds, min 1
            let secs = retry_after.as_secs_f64().ceil().max(1.0) as u64;
            let mut resp = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({ "error": "rate limited" })),
            )
                .into_response();
            resp.headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
            resp
        }
    }
}
