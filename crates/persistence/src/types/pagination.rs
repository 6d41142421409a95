//! Page-number pagination for search requests.
//!
//! Pages are 1-based. A request that omits `page` or `page_size` gets the
//! defaults; anything present must parse as a strictly positive integer.

use serde::Serialize;

use crate::error::SearchError;

/// Default page when `page` is absent.
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size when `page_size` is absent.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Name of the page query parameter.
pub const PAGE_PARAM: &str = "page";

/// Name of the page size query parameter.
pub const PAGE_SIZE_PARAM: &str = "page_size";

/// A validated page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationParams {
    page: u32,
    page_size: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationParams {
    /// Creates pagination, rejecting zero values.
    pub fn new(page: u32, page_size: u32) -> Result<Self, SearchError> {
        if page == 0 {
            return Err(invalid(PAGE_PARAM, page));
        }
        if page_size == 0 {
            return Err(invalid(PAGE_SIZE_PARAM, page_size));
        }
        Ok(Self { page, page_size })
    }

    /// The 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Rows per page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Rows to skip before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }

    /// Rows to return.
    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }

    /// Number of pages needed for `total_count` rows.
    pub fn total_pages(&self, total_count: u64) -> u64 {
        total_count.div_ceil(u64::from(self.page_size))
    }
}

/// Resolves raw `page`/`page_size` strings with the built-in defaults.
pub fn resolve_pagination(
    raw_page: Option<&str>,
    raw_page_size: Option<&str>,
) -> Result<PaginationParams, SearchError> {
    PaginationResolver::default().resolve(raw_page, raw_page_size)
}

/// Resolves pagination with a configurable default and ceiling for the page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationResolver {
    default_page_size: u32,
    max_page_size: Option<u32>,
}

impl Default for PaginationResolver {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: None,
        }
    }
}

impl PaginationResolver {
    /// Creates a resolver. A zero default falls back to [`DEFAULT_PAGE_SIZE`].
    pub fn new(default_page_size: u32) -> Self {
        Self {
            default_page_size: if default_page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                default_page_size
            },
            max_page_size: None,
        }
    }

    /// Clamps requested page sizes to `max`.
    pub fn with_max_page_size(mut self, max: u32) -> Self {
        self.max_page_size = Some(max.max(1));
        self
    }

    /// Resolves raw query values. Empty strings count as absent.
    pub fn resolve(
        &self,
        raw_page: Option<&str>,
        raw_page_size: Option<&str>,
    ) -> Result<PaginationParams, SearchError> {
        let page = match raw_page.filter(|s| !s.is_empty()) {
            Some(raw) => parse_positive(PAGE_PARAM, raw)?,
            None => DEFAULT_PAGE,
        };

        let mut page_size = match raw_page_size.filter(|s| !s.is_empty()) {
            Some(raw) => parse_positive(PAGE_SIZE_PARAM, raw)?,
            None => self.default_page_size,
        };
        if let Some(max) = self.max_page_size {
            page_size = page_size.min(max);
        }

        PaginationParams::new(page, page_size)
    }
}

fn parse_positive(parameter: &str, raw: &str) -> Result<u32, SearchError> {
    match raw.parse::<i64>() {
        Ok(value) if value >= 1 => u32::try_from(value).map_err(|_| invalid(parameter, raw)),
        _ => Err(invalid(parameter, raw)),
    }
}

fn invalid(parameter: &str, value: impl ToString) -> SearchError {
    SearchError::InvalidPagination {
        parameter: parameter.to_string(),
        value: value.to_string(),
    }
}
