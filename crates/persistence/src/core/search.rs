//! Search provider trait.
//!
//! A [`SearchProvider`] executes a [`CompiledQuery`]: it must support
//! parameterized equality, pattern and comparison predicates joined with AND,
//! stable ordering on a unique key, limit/offset windows, and counting the rows
//! that match a predicate set.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::search::CompiledQuery;
use crate::types::Organization;

use super::storage::OrganizationStorage;

/// Store-side execution of compiled searches.
///
/// # Example
///
/// ```ignore
/// use orgsearch_persistence::core::SearchProvider;
///
/// async fn first_page<S: SearchProvider>(storage: &S, query: &CompiledQuery) -> StorageResult<()> {
///     let total = storage.search_count(query).await?;
///     let rows = storage.search(query).await?;
///     println!("{} of {}", rows.len(), total);
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait SearchProvider: OrganizationStorage {
    /// Returns the page of matching rows, ordered by the sort key and bounded
    /// by the query's limit and offset.
    async fn search(&self, query: &CompiledQuery) -> StorageResult<Vec<Organization>>;

    /// Counts all rows matching the predicates, ignoring limit and offset.
    async fn search_count(&self, query: &CompiledQuery) -> StorageResult<u64>;
}
