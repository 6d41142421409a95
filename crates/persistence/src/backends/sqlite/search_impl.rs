//! SearchProvider implementation for SQLite.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backends::query_builder::{Dialect, QueryBuilder, SqlParam};
use crate::core::SearchProvider;
use crate::error::{BackendError, StorageError, StorageResult};
use crate::search::CompiledQuery;
use crate::types::Organization;

use super::SqliteBackend;
use super::backend::BACKEND_NAME;

fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: BACKEND_NAME.to_string(),
        message,
        source: None,
    })
}

fn serialization_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::SerializationError { message })
}

fn to_sql_params(params: &[SqlParam]) -> Vec<Box<dyn rusqlite::ToSql>> {
    params
        .iter()
        .map(|p| -> Box<dyn rusqlite::ToSql> {
            match p {
                SqlParam::String(s) => Box::new(s.clone()),
                SqlParam::Integer(i) => Box::new(*i),
            }
        })
        .collect()
}

/// Raw column values as SQLite returns them.
type OrganizationRow = (String, String, String, i64, bool);

fn decode_row((id, name, creation_date, employee_count, is_public): OrganizationRow) -> StorageResult<Organization> {
    let id = Uuid::parse_str(&id)
        .map_err(|e| serialization_error(format!("Invalid organization id '{}': {}", id, e)))?;
    let creation_date = DateTime::parse_from_rfc3339(&creation_date)
        .map_err(|e| {
            serialization_error(format!(
                "Invalid creation_date '{}' for {}: {}",
                creation_date, id, e
            ))
        })?
        .with_timezone(&Utc);

    Ok(Organization {
        id,
        name,
        creation_date,
        employee_count,
        is_public,
    })
}

#[async_trait]
impl SearchProvider for SqliteBackend {
    async fn search(&self, query: &CompiledQuery) -> StorageResult<Vec<Organization>> {
        let fragment = QueryBuilder::new(Dialect::Sqlite).build_page(query)?;
        tracing::debug!(sql = %fragment.sql, params = fragment.params.len(), "SQLite search");

        let conn = self.get_connection()?;
        let mut stmt = conn
            .prepare(&fragment.sql)
            .map_err(|e| internal_error(format!("Failed to prepare search: {}", e)))?;

        let all_params = to_sql_params(&fragment.params);
        let param_refs: Vec<&dyn rusqlite::ToSql> = all_params.iter().map(|p| p.as_ref()).collect();

        let rows = stmt
            .query_map(param_refs.as_slice(), |row| {
                Ok::<OrganizationRow, rusqlite::Error>((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                ))
            })
            .map_err(|e| internal_error(format!("Failed to run search: {}", e)))?;

        let mut organizations = Vec::new();
        for row in rows {
            let row = row.map_err(|e| internal_error(format!("Failed to read row: {}", e)))?;
            organizations.push(decode_row(row)?);
        }

        Ok(organizations)
    }

    async fn search_count(&self, query: &CompiledQuery) -> StorageResult<u64> {
        let fragment = QueryBuilder::new(Dialect::Sqlite).build_count(query)?;
        tracing::debug!(sql = %fragment.sql, params = fragment.params.len(), "SQLite count");

        let conn = self.get_connection()?;
        let all_params = to_sql_params(&fragment.params);
        let param_refs: Vec<&dyn rusqlite::ToSql> = all_params.iter().map(|p| p.as_ref()).collect();

        let count: i64 = conn
            .query_row(&fragment.sql, param_refs.as_slice(), |row| row.get(0))
            .map_err(|e| internal_error(format!("Failed to count organizations: {}", e)))?;

        Ok(count.max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OrganizationStorage;
    use crate::search::{FieldSchema, SearchExecutor, SearchRequest};
    use crate::types::{NewOrganization, PaginationResolver};
    use chrono::TimeZone;

    fn create_test_backend() -> SqliteBackend {
        let backend = SqliteBackend::in_memory().unwrap();
        backend.init_schema_sync().unwrap();
        backend
    }

    async fn seed(backend: &SqliteBackend) {
        let rows = [
            ("CLEAR", (2002, 9, 22), 5, true),
            ("CLEARWATER", (2010, 1, 1), 10, false),
            ("Acme", (1999, 12, 31), 250, true),
            ("Globex", (2002, 9, 21), 7, false),
            ("CLEAR", (2020, 6, 15), 1200, false),
        ];
        for (name, (y, m, d), employees, public) in rows {
            backend
                .create(NewOrganization {
                    name: name.to_string(),
                    creation_date: Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap(),
                    employee_count: employees,
                    is_public: public,
                })
                .await
                .unwrap();
        }
    }

    fn query(filters: &[&str], ranges: &[&str], page: Option<&str>, size: Option<&str>) -> CompiledQuery {
        SearchRequest {
            filters: filters.iter().map(|s| s.to_string()).collect(),
            range_filters: ranges.iter().map(|s| s.to_string()).collect(),
            page: page.map(str::to_string),
            page_size: size.map(str::to_string),
        }
        .compile(&FieldSchema::organizations(), &PaginationResolver::default())
        .unwrap()
    }

    fn names(orgs: &[Organization]) -> Vec<&str> {
        orgs.iter().map(|o| o.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_exact_filter() {
        let backend = create_test_backend();
        seed(&backend).await;

        let q = query(&["name:CLEAR"], &[], None, None);
        let results = backend.search(&q).await.unwrap();
        assert_eq!(names(&results), vec!["CLEAR", "CLEAR"]);
        assert_eq!(backend.search_count(&q).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_wildcard_filter() {
        let backend = create_test_backend();
        seed(&backend).await;

        let q = query(&["name:CLEAR*"], &[], None, None);
        assert_eq!(backend.search_count(&q).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_boolean_filter() {
        let backend = create_test_backend();
        seed(&backend).await;

        let q = query(&["is_public:true"], &[], None, None);
        let results = backend.search(&q).await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|o| o.is_public));
    }

    #[tokio::test]
    async fn test_integer_range() {
        let backend = create_test_backend();
        seed(&backend).await;

        // Numeric, not text, comparison: 1200 must not sort below 250
        let q = query(&[], &["employee_count:[10 TO *]"], None, None);
        assert_eq!(backend.search_count(&q).await.unwrap(), 3);

        let q = query(&[], &["employee_count:(5 TO 10)"], None, None);
        let results = backend.search(&q).await.unwrap();
        assert_eq!(names(&results), vec!["Globex"]);
    }

    #[tokio::test]
    async fn test_date_range_with_category() {
        let backend = create_test_backend();
        seed(&backend).await;

        let q = query(
            &["name:CLEAR"],
            &["creation_date:[2002-09-22T00:00:00Z TO *]"],
            None,
            None,
        );
        assert_eq!(backend.search_count(&q).await.unwrap(), 2);

        let q = query(&[], &["creation_date:(2002-09-22T00:00:00Z TO *]"], None, None);
        assert_eq!(backend.search_count(&q).await.unwrap(), 2);

        let q = query(&[], &["creation_date:[* TO 2002-09-22)"], None, None);
        let results = backend.search(&q).await.unwrap();
        let mut found = names(&results);
        found.sort();
        assert_eq!(found, vec!["Acme", "Globex"]);
    }

    #[tokio::test]
    async fn test_pagination_is_stable_and_gap_free() {
        let backend = create_test_backend();
        seed(&backend).await;

        let mut seen = Vec::new();
        for page in ["1", "2", "3"] {
            let q = query(&[], &[], Some(page), Some("2"));
            let results = backend.search(&q).await.unwrap();
            seen.extend(results.into_iter().map(|o| o.id));
        }

        assert_eq!(seen.len(), 5);
        let mut sorted = seen.clone();
        sorted.sort_by_key(|id| id.to_string());
        assert_eq!(seen, sorted);
    }

    #[tokio::test]
    async fn test_executor_over_sqlite() {
        let backend = create_test_backend();
        seed(&backend).await;

        let q = query(&[], &[], Some("2"), Some("2"));
        let page = SearchExecutor::new(&backend).execute(&q).await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_count, 5);
        assert_eq!(page.total_pages, 3);

        let q = query(&["name:Nobody"], &[], None, None);
        let page = SearchExecutor::new(&backend).execute(&q).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn test_unconvertible_bounds_fail_instead_of_matching() {
        let backend = create_test_backend();
        seed(&backend).await;

        for range in [
            "employee_count:[* TO abc]",
            "employee_count:[abc TO *]",
            "creation_date:[* TO garbage]",
        ] {
            let q = query(&[], &[range], None, None);
            assert!(backend.search(&q).await.is_err(), "{range}");

            let err = SearchExecutor::new(&backend).execute(&q).await.unwrap_err();
            assert!(matches!(err, crate::error::SearchError::Execution { .. }), "{range}");
        }

        let q = query(&["is_public:maybe"], &[], None, None);
        assert!(backend.search_count(&q).await.is_err());
    }

    async fn create_named(backend: &SqliteBackend, names: &[&str]) {
        for name in names {
            backend
                .create(NewOrganization {
                    name: name.to_string(),
                    creation_date: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
                    employee_count: 1,
                    is_public: false,
                })
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_wildcard_treats_underscore_and_percent_literally() {
        let backend = create_test_backend();
        create_named(&backend, &["ABC", "A_C", "100%", "1000"]).await;

        let q = query(&["name:A_C*"], &[], None, None);
        assert_eq!(names(&backend.search(&q).await.unwrap()), vec!["A_C"]);

        let q = query(&["name:*0%"], &[], None, None);
        assert_eq!(names(&backend.search(&q).await.unwrap()), vec!["100%"]);
    }

    #[tokio::test]
    async fn test_wildcard_is_case_sensitive() {
        let backend = create_test_backend();
        create_named(&backend, &["ABC"]).await;

        let q = query(&["name:abc*"], &[], None, None);
        assert_eq!(backend.search_count(&q).await.unwrap(), 0);
        let q = query(&["name:abc"], &[], None, None);
        assert_eq!(backend.search_count(&q).await.unwrap(), 0);
        let q = query(&["name:AB*"], &[], None, None);
        assert_eq!(backend.search_count(&q).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_table_is_execution_error() {
        let backend = SqliteBackend::in_memory().unwrap();
        let q = query(&[], &[], None, None);
        let err = SearchExecutor::new(&backend).execute(&q).await.unwrap_err();
        assert!(matches!(err, crate::error::SearchError::Execution { .. }));
    }
}
