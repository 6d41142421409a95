//! Persistence and search layer for the organization service.
//!
//! This crate stores organization records and answers filtered, paginated
//! searches over them. Requests carry a small filter language:
//!
//! - `filter=field:value` matches a categorical field exactly, or as a
//!   `LIKE` pattern when the value contains `*`
//! - `range_filter=field:[start TO end)` bounds a continuous field, with `[`/`]`
//!   inclusive, `(`/`)` exclusive, and `*` for an open side
//!
//! # Backend Features
//!
//! - `sqlite` (default) - SQLite with in-memory and file modes
//! - `postgres` - PostgreSQL via tokio-postgres and deadpool
//!
//! # Architecture
//!
//! - [`types`] - Records and pagination parameters
//! - [`error`] - Error types for all operations
//! - [`search`] - Filter grammar, parser, compiler and executor
//! - [`core`] - Storage traits
//! - [`backends`] - Backend implementations
//!
//! # Quick Start
//!
//! ```no_run
//! # #[cfg(feature = "sqlite")]
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use orgsearch_persistence::backends::sqlite::SqliteBackend;
//! use orgsearch_persistence::core::OrganizationStorage;
//! use orgsearch_persistence::search::{FieldSchema, SearchExecutor, SearchRequest};
//! use orgsearch_persistence::types::PaginationResolver;
//!
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema().await?;
//!
//! let query = SearchRequest {
//!     filters: vec!["name:CLEAR*".to_string()],
//!     ..Default::default()
//! }
//! .compile(&FieldSchema::organizations(), &PaginationResolver::default())?;
//!
//! let page = SearchExecutor::new(&backend).execute(&query).await?;
//! println!("{} of {} organizations", page.items.len(), page.total_count);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod search;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{SearchError, StorageError, StorageResult, ValidationError};
pub use search::{CompiledQuery, FieldSchema, SearchExecutor, SearchPage, SearchRequest};
pub use types::{NewOrganization, Organization, PaginationParams, PaginationResolver};

pub use core::{OrganizationStorage, SearchProvider};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
