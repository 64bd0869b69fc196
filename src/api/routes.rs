//! Short URL route configuration.

use crate::api::handlers::{redirect_handler, shorten_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes under `/shorturls`.
///
/// # Endpoints
///
/// - `POST /shorturls`               - Create a short link
/// - `GET  /shorturls/stats/{code}`  - Click statistics for a code
/// - `GET  /shorturls/{code}`        - Redirect (same as `GET /{code}`)
pub fn shorturl_routes() -> Router<AppState> {
    Router::new()
        .route("/shorturls", post(shorten_handler))
        .route("/shorturls/stats/{code}", get(stats_handler))
        .route("/shorturls/{code}", get(redirect_handler))
}
