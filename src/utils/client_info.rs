//! Client and origin extraction from HTTP request headers.

use crate::AppError;
use axum::http::{HeaderMap, Uri, header};
use serde_json::json;
use std::net::IpAddr;

const X_FORWARDED_HOST: &str = "x-forwarded-host";
const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Returns the first comma-separated value of a header, trimmed.
fn first_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Builds the public origin (`scheme://host[:port]`) the client used.
///
/// When `behind_proxy` is set, `X-Forwarded-Host` and `X-Forwarded-Proto`
/// take precedence. Otherwise the `Host` header is used, falling back to the
/// request URI's authority (HTTP/2 carries it there instead of in `Host`).
/// The scheme defaults to the URI's scheme, then `http`. The port is kept so
/// that short links work on non-standard ports.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if:
/// - Neither a `Host` header nor a URI authority is present
/// - The header value contains invalid UTF-8
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "localhost:8080".parse().unwrap());
///
/// assert_eq!(
///     request_origin(&headers, &Uri::from_static("/shorturls"), false).unwrap(),
///     "http://localhost:8080"
/// );
/// ```
pub fn request_origin(
    headers: &HeaderMap,
    uri: &Uri,
    behind_proxy: bool,
) -> Result<String, AppError> {
    let forwarded_host = behind_proxy
        .then(|| first_value(headers, X_FORWARDED_HOST))
        .flatten();

    let host = match (forwarded_host, headers.get(header::HOST)) {
        (Some(host), _) => host,
        (None, Some(value)) => value
            .to_str()
            .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?,
        (None, None) => uri
            .authority()
            .map(|authority| authority.as_str())
            .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?,
    };

    let scheme = behind_proxy
        .then(|| first_value(headers, X_FORWARDED_PROTO))
        .flatten()
        .or_else(|| uri.scheme_str())
        .unwrap_or("http");

    Ok(format!("{}://{}", scheme, host))
}

/// Resolves the client IP address recorded with a click.
///
/// Uses the socket peer address unless `behind_proxy` is set, in which case
/// the first `X-Forwarded-For` hop (or `X-Real-IP`) is trusted.
pub fn client_ip(headers: &HeaderMap, peer: IpAddr, behind_proxy: bool) -> String {
    if behind_proxy
        && let Some(ip) =
            first_value(headers, X_FORWARDED_FOR).or_else(|| first_value(headers, X_REAL_IP))
    {
        return ip.to_string();
    }

    peer.to_string()
}
