use crate::api_error::ApiError;
use axum::{Json, body::Bytes, extract::State};
use std::sync::Arc;

use valuemap_core::ResultItem;

use crate::AppState;
use crate::query_types::SearchRequest;

/// SimpleJSON `/search`, used by Grafana for template variable values.
///
/// The body is read raw so that an empty or content-type-less request still
/// yields `[]` instead of an extractor rejection.
pub async fn search(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Vec<ResultItem>>, ApiError> {
    let request = SearchRequest::from_body(&body)?;
    let results = state.resolver.resolve(request.target()?)?;
    Ok(Json(results))
}
