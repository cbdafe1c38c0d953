//! DTO for the health check endpoint.

use serde::Serialize;

/// Liveness response consumed by external orchestration.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Current server time, RFC 3339.
    pub timestamp: String,
}
