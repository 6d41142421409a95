//! HTTP request handlers.
//!
//! - [`search`] - Filtered, paginated organization search
//! - [`create`] - Organization creation
//! - [`health`] - Health check endpoint

pub mod create;
pub mod health;
pub mod search;

pub use create::create_handler;
pub use health::health_handler;
pub use search::search_handler;
