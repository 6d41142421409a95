//! Search parameters extractor.
//!
//! Reads `filter`, `range_filter`, `page` and `page_size` from the query
//! string. Filters may repeat, so the raw query is decoded pair by pair
//! instead of through a map.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use orgsearch_persistence::search::{FILTER_PARAM, RANGE_FILTER_PARAM, SearchRequest};
use orgsearch_persistence::types::{PAGE_PARAM, PAGE_SIZE_PARAM};

/// Axum extractor for organization search parameters.
///
/// Extraction never fails. Validation happens when the request is compiled
/// against the field schema.
///
/// # Example
///
/// ```rust,ignore
/// use orgsearch_rest::extractors::SearchParams;
///
/// async fn search_handler(SearchParams(request): SearchParams) {
///     println!("{} filters", request.filters.len());
/// }
/// ```
#[derive(Debug, Default)]
pub struct SearchParams(pub SearchRequest);

impl SearchParams {
    /// Parses a raw, still percent-encoded query string.
    ///
    /// Unrecognized parameters are ignored. For `page` and `page_size` the
    /// first occurrence wins.
    pub fn from_query(query: &str) -> Self {
        let mut request = SearchRequest::default();

        for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match name.as_ref() {
                FILTER_PARAM => request.filters.push(value.into_owned()),
                RANGE_FILTER_PARAM => request.range_filters.push(value.into_owned()),
                PAGE_PARAM => {
                    request.page.get_or_insert_with(|| value.into_owned());
                }
                PAGE_SIZE_PARAM => {
                    request.page_size.get_or_insert_with(|| value.into_owned());
                }
                _ => {}
            }
        }

        Self(request)
    }
}

impl<S> FromRequestParts<S> for SearchParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(SearchParams::from_query(parts.uri.query().unwrap_or_default()))
    }
}
