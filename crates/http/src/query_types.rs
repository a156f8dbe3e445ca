//! Request types (Deserialize)

use serde::Deserialize;
use serde_json::Value;

use valuemap_core::ResolveError;

use crate::api_error::ApiError;

/// Body of a SimpleJSON `/search` call: `{"target": "<json-encoded query>"}`.
///
/// Grafana sends additional fields (e.g. `type`) which are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub target: Option<Value>,
}

impl SearchRequest {
    /// Parses a raw request body. An empty body is a request with no target.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(e.to_string()))
    }

    /// The target string, if any. Falsy targets (`null`, `false`, `0`) count as
    /// absent; any other non-string cannot be a JSON-encoded query object.
    pub fn target(&self) -> Result<Option<&str>, ResolveError> {
        match &self.target {
            None | Some(Value::Null | Value::Bool(false)) => Ok(None),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
            Some(Value::String(target)) => Ok(Some(target)),
            Some(_) => Err(ResolveError::InvalidQueryShape),
        }
    }
}
