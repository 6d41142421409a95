//! API route configuration.

use axum::{Router, routing::get};
use orgsearch_persistence::core::SearchProvider;

use crate::handlers;
use crate::state::AppState;

/// Organization collection path.
pub const ORGANIZATIONS_PATH: &str = "/api/v1/organizations";

/// Creates all API routes.
///
/// # Routes
///
/// - `GET /health` - Health check
/// - `GET /api/v1/organizations` - Search
/// - `POST /api/v1/organizations` - Create
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: SearchProvider + 'static,
{
    Router::new()
        .route("/health", get(handlers::health_handler::<S>))
        .route(
            ORGANIZATIONS_PATH,
            get(handlers::search_handler::<S>).post(handlers::create_handler::<S>),
        )
        .with_state(state)
}
