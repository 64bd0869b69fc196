//! Handler for per-code statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns a mapping's metadata and its full click history.
///
/// # Endpoint
///
/// `GET /shorturls/stats/{code}`
///
/// Expired codes are still reported. Clicks are listed most recent first
/// and `totalClicks` always equals their count.
///
/// # Errors
///
/// Returns 404 Not Found if the code was never issued.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.stats_service.get_stats(&code).await?;

    Ok(Json(StatsResponse::from(stats)))
}
