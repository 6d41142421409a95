//! PostgreSQL schema definitions.

use deadpool_postgres::Object;

use crate::error::{BackendError, StorageError, StorageResult};

use super::backend::BACKEND_NAME;

/// Creates the organizations table.
pub async fn initialize_schema(client: &Object) -> StorageResult<()> {
    client
        .batch_execute(
            "CREATE TABLE IF NOT EXISTS organizations (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL,
                creation_date TIMESTAMPTZ NOT NULL,
                employee_count BIGINT NOT NULL,
                is_public BOOLEAN NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_organizations_name ON organizations(name);
            CREATE INDEX IF NOT EXISTS idx_organizations_creation_date ON organizations(creation_date);
            CREATE INDEX IF NOT EXISTS idx_organizations_employee_count ON organizations(employee_count);",
        )
        .await
        .map_err(|e| {
            StorageError::Backend(BackendError::MigrationError {
                message: format!("{} schema: {}", BACKEND_NAME, e),
            })
        })
}
