//! Database backend implementations.
//!
//! Each backend implements [`OrganizationStorage`](crate::core::OrganizationStorage)
//! and [`SearchProvider`](crate::core::SearchProvider) and is gated behind a
//! feature flag.
//!
//! # Available Backends
//!
//! | Backend | Feature | Description |
//! |---------|---------|-------------|
//! | SQLite | `sqlite` | Embedded database, file or in-memory |
//! | PostgreSQL | `postgres` | Pooled tokio-postgres clients |
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "sqlite")]
//! use orgsearch_persistence::backends::sqlite::SqliteBackend;
//!
//! # #[cfg(feature = "sqlite")]
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//! let backend = SqliteBackend::open("./data/orgsearch.db")?;
//! # Ok(())
//! # }
//! ```

#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub mod query_builder;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub mod postgres;
