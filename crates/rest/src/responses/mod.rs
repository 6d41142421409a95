//! Response bodies.

use orgsearch_persistence::search::SearchPage;
use orgsearch_persistence::types::Organization;
use serde::{Deserialize, Serialize};

/// One page of organizations with pagination metadata.
///
/// ```json
/// {
///   "organizations": [...],
///   "page": 1,
///   "page_size": 20,
///   "total_pages": 3,
///   "total_count": 45
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationPage {
    /// Organizations on this page, in id order.
    pub organizations: Vec<Organization>,
    /// The 1-based page number.
    pub page: u32,
    /// Rows per page.
    pub page_size: u32,
    /// Pages needed to hold every match.
    pub total_pages: u64,
    /// Matches across all pages.
    pub total_count: u64,
}

impl From<SearchPage> for OrganizationPage {
    fn from(page: SearchPage) -> Self {
        Self {
            organizations: page.items,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
            total_count: page.total_count,
        }
    }
}
