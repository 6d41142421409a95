//! Organization search service.
//!
//! Serves filtered, paginated organization searches over HTTP.

use clap::Parser;
use orgsearch_persistence::core::{OrganizationStorage, SearchProvider};
use orgsearch_rest::{ServerConfig, create_app_with_config, init_logging};
use tracing::info;

#[cfg(feature = "sqlite")]
use orgsearch_persistence::backends::sqlite::SqliteBackend;

/// Starts the Axum HTTP server and runs until Ctrl+C.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Initializes the schema, then serves.
async fn start<S>(backend: S, config: ServerConfig) -> anyhow::Result<()>
where
    S: SearchProvider + 'static,
{
    backend.init_schema().await?;
    let existing = backend.count().await?;
    info!(
        backend = backend.backend_name(),
        organizations = existing,
        "Storage ready"
    );

    let app = create_app_with_config(backend, config.clone());
    serve(app, &config).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        default_page_size = config.default_page_size,
        max_page_size = config.max_page_size,
        "Starting organization search service"
    );

    if config.is_postgres_url() {
        start_postgres(config).await
    } else {
        start_sqlite(config).await
    }
}

#[cfg(feature = "sqlite")]
async fn start_sqlite(config: ServerConfig) -> anyhow::Result<()> {
    info!(database = %config.database_url, "Initializing SQLite backend");
    let backend = SqliteBackend::open(&config.database_url)?;
    start(backend, config).await
}

/// Fallback when sqlite feature is not enabled.
#[cfg(not(feature = "sqlite"))]
async fn start_sqlite(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The sqlite backend requires the 'sqlite' feature. \
         Build with: cargo build -p orgsearch --features sqlite"
    )
}

#[cfg(feature = "postgres")]
async fn start_postgres(config: ServerConfig) -> anyhow::Result<()> {
    use orgsearch_persistence::backends::postgres::PostgresBackend;

    info!("Initializing PostgreSQL backend");
    let backend = PostgresBackend::from_connection_string(&config.database_url).await?;
    start(backend, config).await
}

/// Fallback when postgres feature is not enabled.
#[cfg(not(feature = "postgres"))]
async fn start_postgres(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The postgres backend requires the 'postgres' feature. \
         Build with: cargo build -p orgsearch --features postgres"
    )
}
