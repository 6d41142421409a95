//! Core record storage trait.
//!
//! This module defines the [`OrganizationStorage`] trait, the write side and
//! lifecycle of an organization store.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::{NewOrganization, Organization};

/// Core storage trait for organization records.
///
/// # Example
///
/// ```ignore
/// use orgsearch_persistence::core::OrganizationStorage;
/// use orgsearch_persistence::types::NewOrganization;
///
/// async fn example<S: OrganizationStorage>(storage: &S, payload: NewOrganization) -> Result<(), StorageError> {
///     storage.init_schema().await?;
///     let stored = storage.create(payload).await?;
///     println!("Created: {}", stored.id);
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait OrganizationStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Creates the organizations table if it does not exist yet.
    async fn init_schema(&self) -> StorageResult<()>;

    /// Inserts one organization under a freshly generated v4 UUID and returns
    /// the stored record.
    ///
    /// # Errors
    ///
    /// * `StorageError::Backend` - If the insert fails
    async fn create(&self, organization: NewOrganization) -> StorageResult<Organization>;

    /// Counts every stored organization.
    async fn count(&self) -> StorageResult<u64>;

    /// Confirms the store answers queries.
    async fn health_check(&self) -> StorageResult<()>;
}
