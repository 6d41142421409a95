//! Core types for the persistence layer.
//!
//! - [`Organization`], [`NewOrganization`] - stored records and create payloads
//! - [`PaginationParams`], [`PaginationResolver`] - page-number pagination

mod organization;
mod pagination;

pub use organization::{NewOrganization, Organization};
pub use pagination::{
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, PAGE_PARAM, PAGE_SIZE_PARAM, PaginationParams,
    PaginationResolver, resolve_pagination,
};
