//! Create handler.
//!
//! `POST [base]/api/v1/organizations`

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use orgsearch_persistence::core::{OrganizationStorage, SearchProvider};
use tracing::{debug, info};

use crate::error::RestResult;
use crate::extractors::OrganizationBody;
use crate::state::AppState;

/// Handler for organization creation. The store assigns the id.
///
/// # Response
///
/// - `201 Created` - The stored organization
/// - `400 Bad Request` - Undecodable body, or a body that carries an `id`
///
/// # Example
///
/// ```http
/// POST /api/v1/organizations HTTP/1.1
/// Content-Type: application/json
///
/// {"name":"CLEAR","creation_date":"2002-09-22T00:00:00Z","employee_count":5,"is_public":true}
/// ```
pub async fn create_handler<S>(
    State(state): State<AppState<S>>,
    OrganizationBody(organization): OrganizationBody,
) -> RestResult<Response>
where
    S: SearchProvider + 'static,
{
    debug!(name = %organization.name, "Processing create request");

    let created = state.storage().create(organization).await?;

    info!(id = %created.id, "Organization created");

    Ok((StatusCode::CREATED, Json(created)).into_response())
}
