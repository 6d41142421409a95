//! Query compiler.
//!
//! Assembles parsed filters and a page window into a [`CompiledQuery`]: a flat
//! conjunction of predicates, ascending order on the schema's sort key, and a
//! limit/offset pair. Compilation does no I/O and cannot fail.

use std::fmt;

use crate::types::PaginationParams;

use super::parser::{CategoryFilter, CategoryMatch, RangeFilter};
use super::schema::FieldSchema;

/// Comparison applied by a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// Equal
    Eq,
    /// Pattern match (`LIKE`)
    Like,
    /// Greater than
    Gt,
    /// Greater than or equal
    Ge,
    /// Less than
    Lt,
    /// Less than or equal
    Le,
}

impl CompareOp {
    /// Returns the SQL operator.
    pub fn to_sql_op(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Like => "LIKE",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
        }
    }

    fn lower(inclusive: bool) -> Self {
        if inclusive { CompareOp::Ge } else { CompareOp::Gt }
    }

    fn upper(inclusive: bool) -> Self {
        if inclusive { CompareOp::Le } else { CompareOp::Lt }
    }
}

/// A single `field op value` constraint. The value stays an opaque string;
/// the store coerces it to the column type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    /// Column name.
    pub field: String,
    /// Comparison operator.
    pub op: CompareOp,
    /// Raw filter value, or a `%` pattern for `Like`.
    pub value: String,
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} \"{}\"", self.field, self.op.to_sql_op(), self.value)
    }
}

/// A fully resolved search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    predicates: Vec<Predicate>,
    sort_key: String,
    pagination: PaginationParams,
}

impl CompiledQuery {
    /// Predicates, all combined with AND.
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// The unique field rows are ordered by, ascending.
    pub fn sort_key(&self) -> &str {
        &self.sort_key
    }

    /// The page window this query was built for.
    pub fn pagination(&self) -> PaginationParams {
        self.pagination
    }

    /// Maximum rows to return.
    pub fn limit(&self) -> u64 {
        self.pagination.limit()
    }

    /// Rows to skip.
    pub fn offset(&self) -> u64 {
        self.pagination.offset()
    }
}

impl fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.predicates.is_empty() {
            write!(f, "WHERE ")?;
            for (i, predicate) in self.predicates.iter().enumerate() {
                if i > 0 {
                    write!(f, " AND ")?;
                }
                write!(f, "{}", predicate)?;
            }
            write!(f, " ")?;
        }
        write!(
            f,
            "ORDER BY {} ASC LIMIT {} OFFSET {}",
            self.sort_key,
            self.limit(),
            self.offset()
        )
    }
}

/// Compiles filters against a schema.
#[derive(Debug, Clone)]
pub struct QueryCompiler<'s> {
    schema: &'s FieldSchema,
}

impl<'s> QueryCompiler<'s> {
    /// Creates a compiler that orders by the schema's sort key.
    pub fn new(schema: &'s FieldSchema) -> Self {
        Self { schema }
    }

    /// Builds the query. Category predicates come first, then range
    /// predicates, each in input order.
    pub fn compile(
        &self,
        category_filters: &[CategoryFilter],
        range_filters: &[RangeFilter],
        pagination: PaginationParams,
    ) -> CompiledQuery {
        let mut predicates = Vec::with_capacity(category_filters.len() + 2 * range_filters.len());

        for filter in category_filters {
            let (op, value) = match &filter.matcher {
                CategoryMatch::Exact(value) => (CompareOp::Eq, value),
                CategoryMatch::Like(pattern) => (CompareOp::Like, pattern),
            };
            predicates.push(Predicate {
                field: filter.field.clone(),
                op,
                value: value.clone(),
            });
        }

        for filter in range_filters {
            if let Some(start) = &filter.start {
                predicates.push(Predicate {
                    field: filter.field.clone(),
                    op: CompareOp::lower(start.inclusive),
                    value: start.value.clone(),
                });
            }
            if let Some(end) = &filter.end {
                predicates.push(Predicate {
                    field: filter.field.clone(),
                    op: CompareOp::upper(end.inclusive),
                    value: end.value.clone(),
                });
            }
        }

        CompiledQuery {
            predicates,
            sort_key: self.schema.sort_key().to_string(),
            pagination,
        }
    }
}

/// Compiles with the given schema. See [`QueryCompiler::compile`].
pub fn compile(
    schema: &FieldSchema,
    category_filters: &[CategoryFilter],
    range_filters: &[RangeFilter],
    pagination: PaginationParams,
) -> CompiledQuery {
    QueryCompiler::new(schema).compile(category_filters, range_filters, pagination)
}
