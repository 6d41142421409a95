//! Core storage traits and abstractions.
//!
//! - [`OrganizationStorage`] - Schema bootstrap and single-row inserts
//! - [`SearchProvider`] - Execution of compiled searches
//!
//! ```text
//! OrganizationStorage
//!     └── SearchProvider
//! ```

mod search;
mod storage;

pub use search::SearchProvider;
pub use storage::OrganizationStorage;
