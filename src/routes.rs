//! Top-level router: middleware chain, API routing, static SPA host.
//!
//! # Route Structure
//!
//! - `GET /health`   - Liveness check (public)
//! - `/api/*`        - REST API (products, orders, users)
//! - `/*`            - Static frontend bundle; unmatched paths fall back
//!   to the entry document so client-side routing always loads
//!
//! # Middleware
//!
//! Applied in fixed order ahead of routing:
//!
//! 1. **Security headers** - response-side, always continues
//! 2. **CORS** - origin policy from configuration
//! 3. **Access logging** - one line per request
//! 4. **Body parsing** - at the handler boundary, via [`crate::api::extract::Json`]
//!
//! The order is load-bearing: the access log captures method and path
//! before body parsing gets a chance to fail, and parsing completes
//! before any handler reads the payload.

use std::path::Path;

use axum::routing::get;
use axum::{Router, middleware};
use tower_http::services::{ServeDir, ServeFile};

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{access_log::access_log_mw, cors, security::security_headers_mw};
use crate::config::Config;
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
///
/// API prefixes are registered before the static fallback so they are
/// never shadowed by it; conversely, requests that miss inside `/api`
/// are answered by the API's own JSON 404 rather than the entry
/// document. Every request produces exactly one response: a router
/// match, a static file, the SPA entry document, or the error
/// interceptor's uniform body.
pub fn app_router(state: AppState, config: &Config) -> Router {
    let entry_document = Path::new(&config.static_dir).join("index.html");
    let spa = ServeDir::new(&config.static_dir).fallback(ServeFile::new(entry_document));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .fallback_service(spa)
        .with_state(state)
        // Innermost layer runs closest to the routers; requests traverse
        // security -> cors -> access log -> routing.
        .layer(middleware::from_fn(access_log_mw))
        .layer(cors::layer(&config.cors_allowed_origins))
        .layer(middleware::from_fn(security_headers_mw))
}
