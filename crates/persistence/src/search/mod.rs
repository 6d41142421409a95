//! Filter query language and paginated search.
//!
//! Raw request parameters flow through these stages:
//!
//! ```text
//! filter / range_filter ──► grammar (lexer) ──► parser ──┐
//!                                                         ├──► compiler ──► executor ──► SearchPage
//! page / page_size ──────► pagination resolver ─────────┘
//! ```
//!
//! Everything before the executor is pure and validates the request against
//! an injected [`FieldSchema`]; only the executor touches the store.
//!
//! # Example
//!
//! ```
//! use orgsearch_persistence::search::{FieldSchema, SearchRequest};
//! use orgsearch_persistence::types::PaginationResolver;
//!
//! let schema = FieldSchema::organizations();
//! let request = SearchRequest {
//!     filters: vec!["name:CLEAR".to_string()],
//!     range_filters: vec!["creation_date:[2002-09-22T00:00:00Z TO *]".to_string()],
//!     page: Some("2".to_string()),
//!     page_size: None,
//! };
//!
//! let query = request.compile(&schema, &PaginationResolver::default()).unwrap();
//! assert_eq!(query.predicates().len(), 2);
//! assert_eq!(query.offset(), 20);
//! ```

pub mod compiler;
pub mod executor;
pub mod grammar;
pub mod parser;
pub mod schema;

pub use compiler::{CompareOp, CompiledQuery, Predicate, QueryCompiler, compile};
pub use executor::{SearchExecutor, SearchPage};
pub use parser::{
    CategoryFilter, CategoryMatch, LIKE_ESCAPE, RangeBound, RangeFilter, parse_category_filter,
    parse_filters, parse_range_filter,
};
pub use schema::{FieldKind, FieldSchema};

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::types::PaginationResolver;

/// Name of the repeated category filter parameter.
pub const FILTER_PARAM: &str = "filter";

/// Name of the repeated range filter parameter.
pub const RANGE_FILTER_PARAM: &str = "range_filter";

/// Raw, unvalidated search parameters of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// `filter` values, in request order.
    #[serde(default)]
    pub filters: Vec<String>,
    /// `range_filter` values, in request order.
    #[serde(default)]
    pub range_filters: Vec<String>,
    /// Raw `page`.
    #[serde(default)]
    pub page: Option<String>,
    /// Raw `page_size`.
    #[serde(default)]
    pub page_size: Option<String>,
}

impl SearchRequest {
    /// Validates the request and compiles it.
    ///
    /// Pagination is resolved first, then category filters, then range
    /// filters; the first error wins.
    pub fn compile(
        &self,
        schema: &FieldSchema,
        resolver: &PaginationResolver,
    ) -> Result<CompiledQuery, SearchError> {
        let pagination = resolver.resolve(self.page.as_deref(), self.page_size.as_deref())?;
        let (categories, ranges) = parse_filters(schema, &self.filters, &self.range_filters)?;
        Ok(QueryCompiler::new(schema).compile(&categories, &ranges, pagination))
    }
}
