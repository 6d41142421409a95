//! Route configuration.
//!
//! This module maps HTTP paths to handlers.

pub mod api_routes;

pub use api_routes::{ORGANIZATIONS_PATH, create_routes};
