//! Field schema for filterable record fields.
//!
//! The schema lists every field a filter may name and whether that field has an
//! ordered (continuous) domain. It is built once at startup and shared
//! read-only, typically behind an `Arc`, by the parser and the compiler.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Whether a field's values are discrete or ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Discrete values. Only categorical filters apply.
    Categorical,
    /// Ordered values. Both categorical and range filters apply.
    Continuous,
}

impl FieldKind {
    /// Returns true for fields that accept range filters.
    pub fn is_continuous(&self) -> bool {
        matches!(self, FieldKind::Continuous)
    }
}

/// Immutable mapping from field name to [`FieldKind`], plus the unique key the
/// compiled queries sort by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    fields: BTreeMap<String, FieldKind>,
    sort_key: String,
}

impl FieldSchema {
    /// Starts a schema builder sorted by the given unique key.
    pub fn builder(sort_key: impl Into<String>) -> FieldSchemaBuilder {
        FieldSchemaBuilder {
            fields: BTreeMap::new(),
            sort_key: sort_key.into(),
        }
    }

    /// The schema of the organizations collection.
    pub fn organizations() -> Self {
        Self::builder("id")
            .categorical("name")
            .continuous("creation_date")
            .continuous("employee_count")
            .categorical("is_public")
            .build()
    }

    /// Looks up the kind of a field.
    pub fn kind(&self, field: &str) -> Option<FieldKind> {
        self.fields.get(field).copied()
    }

    /// Returns true if the field is known.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// The unique field used for deterministic ordering.
    pub fn sort_key(&self) -> &str {
        &self.sort_key
    }

    /// Iterates over fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, FieldKind)> {
        self.fields.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    /// Number of filterable fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field is filterable.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for FieldSchema {
    fn default() -> Self {
        Self::organizations()
    }
}

/// Builder for [`FieldSchema`].
#[derive(Debug)]
pub struct FieldSchemaBuilder {
    fields: BTreeMap<String, FieldKind>,
    sort_key: String,
}

impl FieldSchemaBuilder {
    /// Adds a field with an explicit kind.
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.insert(name.into(), kind);
        self
    }

    /// Adds a categorical field.
    pub fn categorical(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Categorical)
    }

    /// Adds a continuous field.
    pub fn continuous(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Continuous)
    }

    /// Finishes the schema.
    pub fn build(self) -> FieldSchema {
        FieldSchema {
            fields: self.fields,
            sort_key: self.sort_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organizations_schema() {
        let schema = FieldSchema::organizations();
        assert_eq!(schema.len(), 4);
        assert_eq!(schema.kind("name"), Some(FieldKind::Categorical));
        assert_eq!(schema.kind("creation_date"), Some(FieldKind::Continuous));
        assert_eq!(schema.kind("employee_count"), Some(FieldKind::Continuous));
        assert_eq!(schema.kind("is_public"), Some(FieldKind::Categorical));
        assert_eq!(schema.kind("wrong_name"), None);
        assert_eq!(schema.sort_key(), "id");
    }

    #[test]
    fn test_sort_key_is_not_filterable() {
        let schema = FieldSchema::organizations();
        assert!(!schema.contains("id"));
    }

    #[test]
    fn test_custom_schema() {
        let schema = FieldSchema::builder("sku")
            .continuous("price")
            .categorical("color")
            .build();
        let names: Vec<_> = schema.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["color", "price"]);
        assert!(schema.kind("price").is_some_and(|k| k.is_continuous()));
    }
}
