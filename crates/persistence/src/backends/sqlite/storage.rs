//! OrganizationStorage implementation for SQLite.

use async_trait::async_trait;
use rusqlite::params;
use tracing::debug;

use crate::backends::query_builder::{ORGANIZATIONS_TABLE, sqlite_timestamp};
use crate::core::OrganizationStorage;
use crate::error::{BackendError, StorageError, StorageResult};
use crate::types::{NewOrganization, Organization};

use super::SqliteBackend;
use super::backend::BACKEND_NAME;

fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: BACKEND_NAME.to_string(),
        message,
        source: None,
    })
}

#[async_trait]
impl OrganizationStorage for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }

    async fn init_schema(&self) -> StorageResult<()> {
        self.init_schema_sync()
    }

    async fn create(&self, organization: NewOrganization) -> StorageResult<Organization> {
        let conn = self.get_connection()?;
        let organization = organization.into_organization(uuid::Uuid::new_v4());

        conn.execute(
            &format!(
                "INSERT INTO {} (id, name, creation_date, employee_count, is_public)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                ORGANIZATIONS_TABLE
            ),
            params![
                organization.id.to_string(),
                organization.name,
                sqlite_timestamp(&organization.creation_date),
                organization.employee_count,
                organization.is_public,
            ],
        )
        .map_err(|e| internal_error(format!("Failed to insert organization: {}", e)))?;

        debug!(id = %organization.id, "Created organization");
        Ok(organization)
    }

    async fn count(&self) -> StorageResult<u64> {
        let conn = self.get_connection()?;
        let count: i64 = conn
            .query_row(
                &format!("SELECT COUNT(*) FROM {}", ORGANIZATIONS_TABLE),
                [],
                |row| row.get(0),
            )
            .map_err(|e| internal_error(format!("Failed to count organizations: {}", e)))?;
        Ok(count.max(0) as u64)
    }

    async fn health_check(&self) -> StorageResult<()> {
        self.health_check_sync()
    }
}
