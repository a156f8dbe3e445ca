//! Typed API error for HTTP handlers.
//!
//! Converts resolver and gate failures into JSON responses of the form
//! `{"error": "message"}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use valuemap_core::ResolveError;

pub const ACCESS_DENIED: &str = "Access Denied";

#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request — malformed body or query.
    BadRequest(String),
    /// 401 Unauthorized — missing or wrong Basic credentials.
    Unauthorized,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, ACCESS_DENIED.to_owned()),
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        Self::BadRequest(err.to_string())
    }
}
