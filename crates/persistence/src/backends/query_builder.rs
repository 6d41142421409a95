//! SQL query builder for compiled searches.
//!
//! Translates a [`CompiledQuery`] into parameterized SQL against the
//! `organizations` table. Placeholders and value coercion follow the target
//! [`Dialect`].

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use uuid::Uuid;

use crate::error::{BackendError, StorageError, StorageResult};
use crate::search::{CompareOp, CompiledQuery, LIKE_ESCAPE, Predicate};

/// Table holding organization rows.
pub const ORGANIZATIONS_TABLE: &str = "organizations";

/// Storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// UUID primary key.
    Uuid,
    /// Free text.
    Text,
    /// 64-bit integer.
    Integer,
    /// Boolean flag.
    Boolean,
    /// UTC timestamp.
    Timestamp,
}

impl ColumnType {
    /// PostgreSQL type name used in casts.
    pub fn postgres_type(&self) -> &'static str {
        match self {
            ColumnType::Uuid => "UUID",
            ColumnType::Text => "TEXT",
            ColumnType::Integer => "BIGINT",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Timestamp => "TIMESTAMPTZ",
        }
    }
}

/// Columns of the organizations table, in select order.
pub const ORGANIZATION_COLUMNS: &[(&str, ColumnType)] = &[
    ("id", ColumnType::Uuid),
    ("name", ColumnType::Text),
    ("creation_date", ColumnType::Timestamp),
    ("employee_count", ColumnType::Integer),
    ("is_public", ColumnType::Boolean),
];

/// Looks up a column's type.
pub fn column_type(column: &str) -> Option<ColumnType> {
    ORGANIZATION_COLUMNS
        .iter()
        .find(|(name, _)| *name == column)
        .map(|(_, ty)| *ty)
}

/// Comma separated select list.
pub fn select_columns() -> String {
    ORGANIZATION_COLUMNS
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Formats a timestamp the way SQLite stores it: fixed width UTC with
/// microseconds, so text order matches time order.
pub fn sqlite_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// SQL flavour of the target store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `?N` placeholders; values coerced before binding.
    Sqlite,
    /// `$N` placeholders; text values cast by the server.
    Postgres,
}

impl Dialect {
    fn placeholder(&self, index: usize) -> String {
        match self {
            Dialect::Sqlite => format!("?{}", index),
            Dialect::Postgres => format!("${}", index),
        }
    }

    fn backend_name(&self) -> &'static str {
        match self {
            Dialect::Sqlite => "sqlite",
            Dialect::Postgres => "postgres",
        }
    }
}

/// A fragment of SQL with bound parameters.
#[derive(Debug, Clone)]
pub struct SqlFragment {
    /// The SQL clause.
    pub sql: String,
    /// Bound parameter values.
    pub params: Vec<SqlParam>,
}

/// A bound SQL parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    /// String parameter.
    String(String),
    /// Integer parameter.
    Integer(i64),
}

impl SqlParam {
    /// Creates a string parameter.
    pub fn string(s: impl Into<String>) -> Self {
        SqlParam::String(s.into())
    }

    /// Creates an integer parameter.
    pub fn integer(i: i64) -> Self {
        SqlParam::Integer(i)
    }
}

impl SqlFragment {
    /// Creates a new SQL fragment.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Returns true if this fragment is empty.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

/// Builds SQL statements for compiled searches.
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder {
    dialect: Dialect,
}

impl QueryBuilder {
    /// Creates a builder for a dialect.
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Builds the `WHERE` clause (empty when there are no predicates).
    pub fn build_where(&self, query: &CompiledQuery) -> StorageResult<SqlFragment> {
        let mut fragment = SqlFragment::new("");
        let mut clauses = Vec::with_capacity(query.predicates().len());

        for predicate in query.predicates() {
            clauses.push(self.build_predicate(predicate, &mut fragment.params)?);
        }

        if !clauses.is_empty() {
            fragment.sql = format!("WHERE {}", clauses.join(" AND "));
        }
        Ok(fragment)
    }

    /// Builds the count statement.
    pub fn build_count(&self, query: &CompiledQuery) -> StorageResult<SqlFragment> {
        let mut fragment = self.build_where(query)?;
        fragment.sql = join_sql(&[
            format!("SELECT COUNT(*) FROM {}", ORGANIZATIONS_TABLE).as_str(),
            fragment.sql.as_str(),
        ]);
        Ok(fragment)
    }

    /// Builds the page statement: filtered, ordered by the sort key, limited.
    pub fn build_page(&self, query: &CompiledQuery) -> StorageResult<SqlFragment> {
        let sort_key = query.sort_key();
        self.checked_column(sort_key)?;

        let mut fragment = self.build_where(query)?;
        fragment.params.push(SqlParam::integer(to_i64(query.limit())));
        let limit = self.dialect.placeholder(fragment.params.len());
        fragment.params.push(SqlParam::integer(to_i64(query.offset())));
        let offset = self.dialect.placeholder(fragment.params.len());

        fragment.sql = join_sql(&[
            format!("SELECT {} FROM {}", select_columns(), ORGANIZATIONS_TABLE).as_str(),
            fragment.sql.as_str(),
            format!("ORDER BY {} ASC LIMIT {} OFFSET {}", sort_key, limit, offset).as_str(),
        ]);
        Ok(fragment)
    }

    fn checked_column(&self, column: &str) -> StorageResult<ColumnType> {
        column_type(column).ok_or_else(|| {
            StorageError::Backend(BackendError::Internal {
                backend_name: self.dialect.backend_name().to_string(),
                message: format!("column '{}' is not part of {}", column, ORGANIZATIONS_TABLE),
                source: None,
            })
        })
    }

    fn build_predicate(
        &self,
        predicate: &Predicate,
        params: &mut Vec<SqlParam>,
    ) -> StorageResult<String> {
        let ty = self.checked_column(&predicate.field)?;
        let column = predicate.field.as_str();

        if predicate.op == CompareOp::Like {
            params.push(SqlParam::string(&predicate.value));
            let placeholder = self.dialect.placeholder(params.len());
            let lhs = if ty == ColumnType::Text {
                column.to_string()
            } else {
                format!("CAST({} AS TEXT)", column)
            };
            return Ok(format!("{} LIKE {} ESCAPE '{}'", lhs, placeholder, LIKE_ESCAPE));
        }

        let rhs = match self.dialect {
            Dialect::Sqlite => {
                params.push(coerce_sqlite(&predicate.value, ty)?);
                self.dialect.placeholder(params.len())
            }
            Dialect::Postgres => {
                params.push(SqlParam::string(&predicate.value));
                let placeholder = self.dialect.placeholder(params.len());
                if ty == ColumnType::Text {
                    placeholder
                } else {
                    format!("CAST({}::TEXT AS {})", placeholder, ty.postgres_type())
                }
            }
        };

        Ok(format!("{} {} {}", column, predicate.op.to_sql_op(), rhs))
    }
}

fn join_sql(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Converts an opaque filter value into the representation SQLite stores for
/// the column.
///
/// A value that does not convert is a store error, the same outcome as a
/// failed server-side cast on PostgreSQL.
fn coerce_sqlite(value: &str, ty: ColumnType) -> StorageResult<SqlParam> {
    let trimmed = value.trim();
    let param = match ty {
        ColumnType::Integer => trimmed.parse::<i64>().ok().map(SqlParam::Integer),
        ColumnType::Boolean => match trimmed.to_ascii_lowercase().as_str() {
            "true" | "t" | "1" => Some(SqlParam::Integer(1)),
            "false" | "f" | "0" => Some(SqlParam::Integer(0)),
            _ => None,
        },
        ColumnType::Timestamp => {
            parse_timestamp(trimmed).map(|ts| SqlParam::String(sqlite_timestamp(&ts)))
        }
        ColumnType::Uuid => Uuid::parse_str(trimmed)
            .ok()
            .map(|id| SqlParam::String(id.to_string())),
        ColumnType::Text => Some(SqlParam::string(value)),
    };

    param.ok_or_else(|| {
        StorageError::Backend(BackendError::Internal {
            backend_name: Dialect::Sqlite.backend_name().to_string(),
            message: format!(
                "invalid input syntax for type {}: \"{}\"",
                ty.postgres_type().to_ascii_lowercase(),
                value
            ),
            source: None,
        })
    })
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
