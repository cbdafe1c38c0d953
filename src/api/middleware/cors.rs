//! Cross-origin resource sharing policy.

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

/// Builds the CORS layer from the configured origin list.
///
/// A list containing `*` (the default) allows any origin; otherwise only
/// the listed origins are allowed. Methods and headers are unrestricted
/// either way; the storefront API is a public surface.
pub fn layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
