//! Health check endpoint handler.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use orgsearch_persistence::core::{OrganizationStorage, SearchProvider};
use tracing::{debug, warn};

use crate::error::error_body;
use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// Pings the store, so a lost database shows up here.
///
/// # Response
///
/// - `200 OK` - `{"status":"healthy","backend":..,"timestamp":..}`
/// - `503 Service Unavailable` - The store did not answer
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> Response
where
    S: SearchProvider + 'static,
{
    debug!("Processing health check request");

    let backend_name = state.storage().backend_name();

    if let Err(e) = state.storage().health_check().await {
        warn!(backend = backend_name, error = %e, "Health check failed");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(error_body("storage unavailable", "unavailable")),
        )
            .into_response();
    }

    let health_response = serde_json::json!({
        "status": "healthy",
        "backend": backend_name,
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    (StatusCode::OK, Json(health_response)).into_response()
}
