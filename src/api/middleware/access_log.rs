//! Structured access logging.

use axum::{
    extract::{ConnectInfo, Request},
    http::header,
    middleware::Next,
    response::Response,
};
use std::{net::SocketAddr, time::Instant};

/// Logs one line per request: method, path, version, status, latency.
///
/// Request details are captured before the handler runs, so the line
/// reflects the original method and path even when body parsing fails
/// further down the pipeline. The client address comes from the
/// `ConnectInfo` extension when the server injects it; `-` otherwise.
pub async fn access_log_mw(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let version = format!("{:?}", req.version());

    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "-".to_string(), |ConnectInfo(addr)| addr.ip().to_string());

    let ua = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let ms = start.elapsed().as_millis();

    tracing::info!(
        r#"{ip} "{method} {path} {version}" {status} "{ua}" {ms}ms"#,
        ip = ip,
        method = method,
        path = path,
        version = version,
        status = status,
        ua = ua,
        ms = ms,
    );

    response
}
