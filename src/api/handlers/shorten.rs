//! Handler for short URL creation.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
};
use validator::Validate;

use crate::api::dto::shorten::{CreateShortUrlRequest, CreateShortUrlResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_info::request_origin;

/// Creates a short mapping for one URL.
///
/// # Endpoint
///
/// `POST /shorturls`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "validity": 60,          // optional, minutes (default 30)
///   "shortcode": "my-link"   // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "shortLink": "https://s.example.com/my-link",
///   "expiry": "2025-01-01T01:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 for an invalid URL, validity or shortcode
/// - 409 when the requested shortcode is taken
/// - 500 when no free code could be generated
/// - 503 when the store is unavailable
pub async fn shorten_handler(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    Json(payload): Json<CreateShortUrlRequest>,
) -> Result<(StatusCode, Json<CreateShortUrlResponse>), AppError> {
    payload.validate()?;

    let prefix = match &state.public_base_url {
        Some(base) => base.clone(),
        None => request_origin(&headers, &uri, state.behind_proxy)?,
    };

    let mapping = state
        .link_service
        .create_short_link(payload.url, payload.validity, payload.shortcode)
        .await?;

    let short_link = state.link_service.get_short_url(&prefix, &mapping.code);

    Ok((
        StatusCode::CREATED,
        Json(CreateShortUrlResponse::new(short_link, mapping.expires_at)),
    ))
}
