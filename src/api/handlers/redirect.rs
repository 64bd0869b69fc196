//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::net::SocketAddr;

use crate::domain::click_recorder::Visit;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_info::client_ip;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}` and `GET /shorturls/{code}`
///
/// # Request Flow
///
/// 1. Collect referrer, user agent and client IP from the request
/// 2. Resolve the code; a live mapping records exactly one click
/// 3. Return 302 Found with the original URL in `Location`
///
/// The click is written before the redirect is sent. If the write fails the
/// client gets an error instead of a redirect.
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown or expired.
/// Returns 503 Service Unavailable if the store cannot be reached.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Response, AppError> {
    let visit = Visit::new(
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
        Some(client_ip(&headers, addr.ip(), state.behind_proxy)),
        headers.get(header::USER_AGENT).and_then(|v| v.to_str().ok()),
    );

    let original_url = match state.redirect_service.resolve(&code, visit).await {
        Ok(url) => url,
        Err(e) if e.is_unusable_code() => {
            return Err(AppError::not_found(
                "Short link not found or expired",
                json!({ "code": code }),
            ));
        }
        Err(e) => return Err(e),
    };

    let location = HeaderValue::from_str(&original_url).map_err(|_| {
        AppError::internal(
            "Stored URL is not a valid Location header",
            json!({ "code": code }),
        )
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
