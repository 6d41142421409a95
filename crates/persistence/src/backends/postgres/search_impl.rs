//! SearchProvider implementation for PostgreSQL.

use async_trait::async_trait;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

use crate::backends::query_builder::{Dialect, QueryBuilder, SqlParam};
use crate::core::SearchProvider;
use crate::error::{BackendError, StorageError, StorageResult};
use crate::search::CompiledQuery;
use crate::types::Organization;

use super::PostgresBackend;
use super::storage::internal_error;

fn to_sql_params(params: &[SqlParam]) -> Vec<Box<dyn ToSql + Sync + Send>> {
    params
        .iter()
        .map(|p| -> Box<dyn ToSql + Sync + Send> {
            match p {
                SqlParam::String(s) => Box::new(s.clone()),
                SqlParam::Integer(i) => Box::new(*i),
            }
        })
        .collect()
}

fn decode_row(row: &Row) -> StorageResult<Organization> {
    let decode = |e: tokio_postgres::Error| {
        StorageError::Backend(BackendError::SerializationError {
            message: format!("Failed to decode organization row: {}", e),
        })
    };

    Ok(Organization {
        id: row.try_get("id").map_err(decode)?,
        name: row.try_get("name").map_err(decode)?,
        creation_date: row.try_get("creation_date").map_err(decode)?,
        employee_count: row.try_get("employee_count").map_err(decode)?,
        is_public: row.try_get("is_public").map_err(decode)?,
    })
}

#[async_trait]
impl SearchProvider for PostgresBackend {
    async fn search(&self, query: &CompiledQuery) -> StorageResult<Vec<Organization>> {
        let fragment = QueryBuilder::new(Dialect::Postgres).build_page(query)?;
        tracing::debug!(sql = %fragment.sql, params = fragment.params.len(), "PostgreSQL search");

        let params = to_sql_params(&fragment.params);
        let param_refs: Vec<&(dyn ToSql + Sync)> = params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect();

        let client = self.get_client().await?;
        let rows = client
            .query(&fragment.sql, &param_refs)
            .await
            .map_err(|e| internal_error(format!("Failed to execute search: {}", e)))?;

        rows.iter().map(decode_row).collect()
    }

    async fn search_count(&self, query: &CompiledQuery) -> StorageResult<u64> {
        let fragment = QueryBuilder::new(Dialect::Postgres).build_count(query)?;
        tracing::debug!(sql = %fragment.sql, params = fragment.params.len(), "PostgreSQL count");

        let params = to_sql_params(&fragment.params);
        let param_refs: Vec<&(dyn ToSql + Sync)> = params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect();

        let client = self.get_client().await?;
        let row = client
            .query_one(&fragment.sql, &param_refs)
            .await
            .map_err(|e| internal_error(format!("Failed to count organizations: {}", e)))?;

        let count: i64 = row.get(0);
        Ok(count.max(0) as u64)
    }
}
