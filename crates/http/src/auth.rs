//! HTTP Basic access gate.
//!
//! When [`AuthConfig::enabled`](valuemap_core::AuthConfig) is false every request
//! passes through untouched.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::sync::Arc;

use crate::AppState;
use crate::api_error::ApiError;

pub async fn require_basic_auth(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.auth.enabled() {
        return Ok(next.run(request).await);
    }

    match basic_credentials(request.headers()) {
        Some((username, password)) if state.auth.permits(&username, &password) => {
            Ok(next.run(request).await)
        },
        _ => {
            tracing::warn!(
                path = %request.uri().path(),
                "rejected request with missing or invalid credentials"
            );
            Err(ApiError::Unauthorized)
        },
    }
}

/// Extracts `(username, password)` from an `Authorization: Basic ...` header.
pub fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = BASE64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    // Passwords may contain ':', usernames may not.
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_owned(), password.to_owned()))
}
