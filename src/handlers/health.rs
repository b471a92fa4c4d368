//! Health check endpoint
//!
//! Provides a simple liveness check for monitoring and load balancers.

use axum::http::StatusCode;

/// Liveness body returned by GET /
const LIVENESS_BODY: &str = "chatrelay is alive";

/// Health check handler
///
/// Returns 200 OK with a fixed plain-text body. Deliberately independent of
/// provider configuration or reachability - liveness must not require a
/// successful provider call.
pub async fn handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, LIVENESS_BODY)
}
