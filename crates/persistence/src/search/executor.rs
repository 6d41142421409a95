//! Search executor.
//!
//! Runs a [`CompiledQuery`] against a [`SearchProvider`] and derives page
//! metadata from the total count.

use tracing::{debug, error};

use crate::core::SearchProvider;
use crate::error::{SearchError, StorageError};
use crate::types::Organization;

use super::compiler::CompiledQuery;

/// Message returned to callers when the store fails. The underlying error is
/// logged, not returned.
const EXECUTION_FAILED: &str = "failed to query organizations";

/// One page of search results with count metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    /// Matching rows for this page, in sort-key order.
    pub items: Vec<Organization>,
    /// Rows matching the predicates across all pages.
    pub total_count: u64,
    /// The 1-based page number.
    pub page: u32,
    /// Rows per page.
    pub page_size: u32,
    /// `ceil(total_count / page_size)`.
    pub total_pages: u64,
}

impl SearchPage {
    /// Returns true if the page holds no rows.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Executes compiled queries against a provider.
pub struct SearchExecutor<'p, S: ?Sized> {
    provider: &'p S,
}

impl<'p, S> SearchExecutor<'p, S>
where
    S: SearchProvider + ?Sized,
{
    /// Creates an executor over a provider.
    pub fn new(provider: &'p S) -> Self {
        Self { provider }
    }

    /// Counts the matches, then fetches the page.
    ///
    /// Zero matches is a successful, empty page. Store failures become
    /// [`SearchError::Execution`] and are reported once, without retries.
    pub async fn execute(&self, query: &CompiledQuery) -> Result<SearchPage, SearchError> {
        let backend = self.provider.backend_name();

        let total_count = self
            .provider
            .search_count(query)
            .await
            .map_err(|e| execution_error(backend, e))?;

        let items = self
            .provider
            .search(query)
            .await
            .map_err(|e| execution_error(backend, e))?;

        let pagination = query.pagination();
        debug!(
            backend = backend,
            total = total_count,
            returned = items.len(),
            page = pagination.page(),
            "Search executed"
        );

        Ok(SearchPage {
            items,
            total_count,
            page: pagination.page(),
            page_size: pagination.page_size(),
            total_pages: pagination.total_pages(total_count),
        })
    }
}

fn execution_error(backend: &str, err: StorageError) -> SearchError {
    match err {
        StorageError::Search(search) if search.is_client_error() => search,
        other => {
            error!(backend = backend, error = %other, "Search execution failed");
            SearchError::Execution {
                message: EXECUTION_FAILED.to_string(),
            }
        }
    }
}
