//! HTTP API server for valuemap.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]
#![allow(clippy::single_call_fn, reason = "Helper functions improve readability")]

pub mod api_error;
pub mod auth;
mod handlers;
mod query_types;
mod viewer;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use valuemap_core::{AuthConfig, QueryResolver};

pub use query_types::SearchRequest;

/// Shared application state for all HTTP handlers.
///
/// Built once at startup and never written afterwards.
pub struct AppState {
    /// Resolver over the datasets loaded from the data file
    pub resolver: QueryResolver,
    /// Basic auth gate for `/search`
    pub auth: AuthConfig,
}

impl AppState {
    pub const fn new(resolver: QueryResolver, auth: AuthConfig) -> Self {
        Self { resolver, auth }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let search = Router::new()
        .route("/search", post(handlers::search::search))
        .route_layer(middleware::from_fn_with_state(Arc::clone(&state), auth::require_basic_auth));

    Router::new()
        .route("/", get(viewer::serve_index))
        .route("/health", get(health))
        .merge(search)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
