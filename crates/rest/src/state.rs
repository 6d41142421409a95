//! Application state for the organization search API.
//!
//! Holds the storage backend, configuration, the field schema searches are
//! validated against, and the pagination resolver built from configuration.
//! Everything is shared read-only across requests.

use std::sync::Arc;

use orgsearch_persistence::core::SearchProvider;
use orgsearch_persistence::search::FieldSchema;
use orgsearch_persistence::types::PaginationResolver;

use crate::config::ServerConfig;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The storage backend type (must implement [`SearchProvider`])
///
/// # Example
///
/// ```rust,ignore
/// use orgsearch_rest::{AppState, ServerConfig};
/// use orgsearch_persistence::backends::sqlite::SqliteBackend;
/// use std::sync::Arc;
///
/// let backend = SqliteBackend::in_memory()?;
/// let state = AppState::new(Arc::new(backend), ServerConfig::default());
/// ```
pub struct AppState<S> {
    storage: Arc<S>,
    config: Arc<ServerConfig>,
    schema: Arc<FieldSchema>,
    pagination: PaginationResolver,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: Arc::clone(&self.config),
            schema: Arc::clone(&self.schema),
            pagination: self.pagination,
        }
    }
}

impl<S: SearchProvider> AppState<S> {
    /// Creates state over the organizations schema.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Self {
        Self::with_schema(storage, config, FieldSchema::organizations())
    }

    /// Creates state with an explicit field schema.
    pub fn with_schema(storage: Arc<S>, config: ServerConfig, schema: FieldSchema) -> Self {
        let pagination = PaginationResolver::new(config.default_page_size)
            .with_max_page_size(config.max_page_size);

        Self {
            storage,
            config: Arc::new(config),
            schema: Arc::new(schema),
            pagination,
        }
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the schema searches are validated against.
    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    /// Returns the pagination resolver.
    pub fn pagination(&self) -> &PaginationResolver {
        &self.pagination
    }

    /// Returns whether empty searches answer 404.
    pub fn empty_result_not_found(&self) -> bool {
        self.config.empty_result_not_found
    }
}
