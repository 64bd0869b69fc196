//! Combined-format access log line per request.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::{net::SocketAddr, time::Instant};

use crate::state::AppState;
use crate::utils::client_info::client_ip;

/// Logs client IP, method, path, status and latency once the response is ready.
///
/// The client IP honours `X-Forwarded-For` only when the service runs
/// behind a trusted proxy.
pub async fn access_log_mw(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();

    let ip = client_ip(req.headers(), addr.ip(), state.behind_proxy);
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let version = format!("{:?}", req.version());

    let ua = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let referer = req
        .headers()
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let ms = start.elapsed().as_millis();

    tracing::info!(
        target: "access",
        r#"{ip} "{method} {path} {version}" {status} "{referer}" "{ua}" {ms}ms"#
    );

    response
}
