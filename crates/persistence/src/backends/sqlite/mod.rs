//! SQLite backend implementation.
//!
//! Implements [`OrganizationStorage`](crate::core::OrganizationStorage) and
//! [`SearchProvider`](crate::core::SearchProvider) on top of an r2d2 pool of
//! rusqlite connections. It supports both in-memory databases (for tests) and
//! file-based databases.
//!
//! # Example
//!
//! ```no_run
//! use orgsearch_persistence::backends::sqlite::SqliteBackend;
//! use orgsearch_persistence::core::OrganizationStorage;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::open("./data/orgs.db")?;
//! backend.init_schema().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! A single `organizations` table. Timestamps are stored as fixed-width UTC
//! text and booleans as 0/1; filter values are coerced to the same
//! representation before binding, and a value that does not convert fails the
//! query. `LIKE` is case sensitive on every pooled connection.

mod backend;
mod schema;
mod search_impl;
mod storage;

pub use backend::{SqliteBackend, SqliteBackendConfig};
