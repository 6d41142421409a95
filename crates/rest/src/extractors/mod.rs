//! Axum extractors for organization requests.
//!
//! - [`SearchParams`] - Filter and pagination query parameters
//! - [`OrganizationBody`] - Create request payloads

pub mod organization_body;
pub mod search_params;

pub use organization_body::OrganizationBody;
pub use search_params::SearchParams;
