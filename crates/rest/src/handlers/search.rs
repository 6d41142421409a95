//! Search handler.
//!
//! `GET [base]/api/v1/organizations?filter=..&range_filter=..&page=..&page_size=..`

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use orgsearch_persistence::core::SearchProvider;
use orgsearch_persistence::search::SearchExecutor;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::SearchParams;
use crate::responses::OrganizationPage;
use crate::state::AppState;

/// Handler for organization search.
///
/// # Response
///
/// - `200 OK` - A page of organizations, possibly empty
/// - `400 Bad Request` - Malformed filter, unknown field, range on a
///   categorical field, or bad pagination
/// - `404 Not Found` - No matches, only when `empty_result_not_found` is set
/// - `500 Internal Server Error` - The store failed
pub async fn search_handler<S>(
    State(state): State<AppState<S>>,
    SearchParams(request): SearchParams,
) -> RestResult<Response>
where
    S: SearchProvider + 'static,
{
    debug!(
        filters = request.filters.len(),
        range_filters = request.range_filters.len(),
        page = ?request.page,
        page_size = ?request.page_size,
        "Processing search request"
    );

    let query = request.compile(state.schema(), state.pagination())?;
    debug!(query = %query, "Compiled search");

    let page = SearchExecutor::new(state.storage()).execute(&query).await?;

    if page.is_empty() && state.empty_result_not_found() {
        return Err(RestError::NotFound {
            message: "No organizations found".to_string(),
        });
    }

    Ok((StatusCode::OK, Json(OrganizationPage::from(page))).into_response())
}
