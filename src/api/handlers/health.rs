//! Handler for the health check endpoint.

use axum::Json;
use chrono::Utc;

use crate::api::dto::health::HealthResponse;

/// Returns a liveness token and the current server time.
///
/// # Endpoint
///
/// `GET /health`
///
/// Always responds 200 and never touches shared state, so repeated
/// probes are side-effect free.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
