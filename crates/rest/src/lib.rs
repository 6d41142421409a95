//! # orgsearch-rest - Organization search HTTP API
//!
//! Exposes the filter query language of `orgsearch-persistence` over HTTP.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use orgsearch_rest::{create_app, ServerConfig};
//! use orgsearch_persistence::backends::sqlite::SqliteBackend;
//! use orgsearch_persistence::core::OrganizationStorage;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SqliteBackend::open("orgsearch.db")?;
//!     backend.init_schema().await?;
//!
//!     let app = create_app(backend);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8082").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Interaction | HTTP Method | URL Pattern |
//! |------------|-------------|-------------|
//! | search | GET | `/api/v1/organizations?filter=..&range_filter=..&page=..&page_size=..` |
//! | create | POST | `/api/v1/organizations` |
//! | health | GET | `/health` |
//!
//! `filter` and `range_filter` may repeat; all filters must hold.
//!
//! ## Error Handling
//!
//! Errors are JSON bodies `{"error": .., "code": ..}`. Rejected input is
//! `400`; store failures are `500` with a generic message.
//!
//! ## Architecture
//!
//! - [`error`] - Error types and their HTTP mapping
//! - [`config`] - Server configuration
//! - [`state`] - Application state (storage, configuration, field schema)
//! - [`handlers`] - HTTP request handlers
//! - [`extractors`] - Axum extractors for query strings and bodies
//! - [`responses`] - Response bodies
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod responses;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method};
use orgsearch_persistence::core::{OrganizationStorage, SearchProvider};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(storage: S) -> Router
where
    S: SearchProvider + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Arguments
///
/// * `storage` - The storage backend to use
/// * `config` - Server configuration
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: SearchProvider + 'static,
{
    info!(
        backend = storage.backend_name(),
        default_page_size = config.default_page_size,
        max_page_size = config.max_page_size,
        "Creating REST API server"
    );

    let cors = build_cors_layer(&config);
    let timeout = std::time::Duration::from_secs(config.request_timeout);

    let state = AppState::new(Arc::new(storage), config);
    let router = routing::create_routes(state);

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            timeout,
        ));

    router.layer(cors).layer(service_builder)
}

/// Builds the CORS layer based on configuration.
///
/// Each list is comma-separated; `*` allows anything. Entries that do not
/// parse are skipped.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new();

    let cors = match config.cors_origins.trim() {
        "*" => cors.allow_origin(Any),
        list => cors.allow_origin(parse_list::<HeaderValue>(list)),
    };

    let cors = match config.cors_methods.trim() {
        "*" => cors.allow_methods(Any),
        list => cors.allow_methods(parse_list::<Method>(list)),
    };

    match config.cors_headers.trim() {
        "*" => cors.allow_headers(Any),
        list => cors.allow_headers(parse_list::<HeaderName>(list)),
    }
}

fn parse_list<T: FromStr>(list: &str) -> Vec<T> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect()
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` takes precedence over `level`. Call once at startup.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "orgsearch={level},orgsearch_rest={level},orgsearch_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
