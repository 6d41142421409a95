//! OrganizationStorage implementation for PostgreSQL.

use async_trait::async_trait;
use tracing::debug;

use crate::backends::query_builder::ORGANIZATIONS_TABLE;
use crate::core::OrganizationStorage;
use crate::error::{BackendError, StorageError, StorageResult};
use crate::types::{NewOrganization, Organization};

use super::PostgresBackend;
use super::backend::BACKEND_NAME;

pub(super) fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: BACKEND_NAME.to_string(),
        message,
        source: None,
    })
}

#[async_trait]
impl OrganizationStorage for PostgresBackend {
    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }

    async fn init_schema(&self) -> StorageResult<()> {
        self.init_schema_async().await
    }

    async fn create(&self, organization: NewOrganization) -> StorageResult<Organization> {
        let client = self.get_client().await?;
        let organization = organization.into_organization(uuid::Uuid::new_v4());

        client
            .execute(
                &format!(
                    "INSERT INTO {} (id, name, creation_date, employee_count, is_public)
                     VALUES ($1, $2, $3, $4, $5)",
                    ORGANIZATIONS_TABLE
                ),
                &[
                    &organization.id,
                    &organization.name,
                    &organization.creation_date,
                    &organization.employee_count,
                    &organization.is_public,
                ],
            )
            .await
            .map_err(|e| internal_error(format!("Failed to insert organization: {}", e)))?;

        debug!(id = %organization.id, "Created organization");
        Ok(organization)
    }

    async fn count(&self) -> StorageResult<u64> {
        let client = self.get_client().await?;
        let row = client
            .query_one(&format!("SELECT COUNT(*) FROM {}", ORGANIZATIONS_TABLE), &[])
            .await
            .map_err(|e| internal_error(format!("Failed to count organizations: {}", e)))?;
        let count: i64 = row.get(0);
        Ok(count.max(0) as u64)
    }

    async fn health_check(&self) -> StorageResult<()> {
        let client = self.get_client().await.map_err(|_| {
            StorageError::Backend(BackendError::Unavailable {
                backend_name: BACKEND_NAME.to_string(),
                message: "Failed to get connection".to_string(),
            })
        })?;
        client.query_one("SELECT 1", &[]).await?;
        Ok(())
    }
}
