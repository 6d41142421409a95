//! Server configuration for the organization search API.
//!
//! Every option can be given on the command line or through an
//! `ORGSEARCH_` environment variable.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ORGSEARCH_PORT` | 8082 | Server port |
//! | `ORGSEARCH_HOST` | 127.0.0.1 | Host to bind |
//! | `ORGSEARCH_LOG_LEVEL` | info | Log level |
//! | `ORGSEARCH_DATABASE_URL` | orgsearch.db | SQLite path, `:memory:`, or `postgres://` URL |
//! | `ORGSEARCH_DEFAULT_PAGE_SIZE` | 20 | Page size when `page_size` is absent |
//! | `ORGSEARCH_MAX_PAGE_SIZE` | 1000 | Upper clamp for `page_size` |
//! | `ORGSEARCH_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `ORGSEARCH_CORS_ORIGINS` | * | Allowed origins |
//! | `ORGSEARCH_CORS_METHODS` | GET,HEAD,POST,PUT,PATCH,DELETE,OPTIONS | Allowed methods |
//! | `ORGSEARCH_CORS_HEADERS` | Content-Type,Authorization,Accept | Allowed headers |
//! | `ORGSEARCH_EMPTY_RESULT_NOT_FOUND` | false | Answer empty searches with 404 |
//!
//! # Example
//!
//! ```rust
//! use orgsearch_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use clap::Parser;

const DEFAULT_CORS_METHODS: &str = "GET,HEAD,POST,PUT,PATCH,DELETE,OPTIONS";
const DEFAULT_CORS_HEADERS: &str = "Content-Type,Authorization,Accept";

/// Server configuration for the organization search API.
#[derive(Debug, Clone, Parser)]
#[command(name = "orgsearch")]
#[command(about = "Organization search service")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "ORGSEARCH_PORT", default_value = "8082")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "ORGSEARCH_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "ORGSEARCH_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Database location: a SQLite file path, `:memory:`, or a `postgres://` URL.
    #[arg(long, env = "ORGSEARCH_DATABASE_URL", default_value = "orgsearch.db")]
    pub database_url: String,

    /// Page size used when a request does not name one.
    #[arg(long, env = "ORGSEARCH_DEFAULT_PAGE_SIZE", default_value = "20")]
    pub default_page_size: u32,

    /// Largest page size a request may ask for.
    #[arg(long, env = "ORGSEARCH_MAX_PAGE_SIZE", default_value = "1000")]
    pub max_page_size: u32,

    /// Request timeout in seconds.
    #[arg(long, env = "ORGSEARCH_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "ORGSEARCH_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(long, env = "ORGSEARCH_CORS_METHODS", default_value = DEFAULT_CORS_METHODS)]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(long, env = "ORGSEARCH_CORS_HEADERS", default_value = DEFAULT_CORS_HEADERS)]
    pub cors_headers: String,

    /// Answer searches that return no organizations with 404 instead of an
    /// empty 200 page.
    #[arg(long, env = "ORGSEARCH_EMPTY_RESULT_NOT_FOUND", default_value = "false")]
    pub empty_result_not_found: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8082,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            database_url: "orgsearch.db".to_string(),
            default_page_size: 20,
            max_page_size: 1000,
            request_timeout: 30,
            cors_origins: "*".to_string(),
            cors_methods: DEFAULT_CORS_METHODS.to_string(),
            cors_headers: DEFAULT_CORS_HEADERS.to_string(),
            empty_result_not_found: false,
        }
    }
}

impl ServerConfig {
    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns true if the database URL names a PostgreSQL server.
    pub fn is_postgres_url(&self) -> bool {
        self.database_url.starts_with("postgres://")
            || self.database_url.starts_with("postgresql://")
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.default_page_size == 0 {
            errors.push("Default page size cannot be 0".to_string());
        }

        if self.max_page_size == 0 {
            errors.push("Max page size cannot be 0".to_string());
        }

        if self.default_page_size > self.max_page_size {
            errors.push("Default page size cannot exceed max page size".to_string());
        }

        if self.database_url.trim().is_empty() {
            errors.push("Database URL cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// Uses an in-memory database, an OS-assigned port and a short timeout.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            log_level: "debug".to_string(),
            database_url: ":memory:".to_string(),
            request_timeout: 5,
            ..Self::default()
        }
    }
}
