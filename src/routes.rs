//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`                  - Short link redirect
//! - `GET  /health`                  - Store health check
//! - `POST /shorturls`               - Create a short link
//! - `GET  /shorturls/{code}`        - Short link redirect
//! - `GET  /shorturls/stats/{code}`  - Click statistics
//!
//! # Middleware
//!
//! - **Access log** - One line per request with client IP and latency
//! - **Tracing** - Structured request/response spans
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{access_log, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with every route and middleware, before path normalization.
///
/// Handlers and the access log read [`axum::extract::ConnectInfo`], so the
/// service must be served with `into_make_service_with_connect_info`.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .merge(api::routes::shorturl_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            access_log::access_log_mw,
        ))
        .layer(tracing::layer())
        .with_state(state)
}

/// Constructs the application router with trailing slashes trimmed.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(api_router(state))
}
