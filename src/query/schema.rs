//! Declarative resource tables
//!
//! A [`ResourceSchema`] names a legacy table, the columns exposed from it in
//! select-list order, the kind each column is decoded as, and the ordering
//! key used for keyset pagination. JSON field names default to the
//! snake_case form of the column and can be overridden per column.

use crate::database::{ColumnKind, Row, Value};

use super::naming::to_snake_case;

/// One exposed column
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub column: String,
    /// JSON field name
    pub name: String,
    pub kind: ColumnKind,
}

/// A paginatable legacy table
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    /// Short label used in logs, metrics and error messages
    label: &'static str,
    table: &'static str,
    fields: Vec<FieldSpec>,
    /// Positions of the ordering key columns within `fields`
    key: Vec<usize>,
}

impl ResourceSchema {
    pub fn builder(label: &'static str, table: &'static str) -> ResourceSchemaBuilder {
        ResourceSchemaBuilder {
            label,
            table,
            fields: Vec::new(),
            key: Vec::new(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, column: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.column == column)
    }

    pub fn key_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.key.iter().map(|&index| &self.fields[index])
    }

    pub fn key_kinds(&self) -> Vec<ColumnKind> {
        self.key_fields().map(|field| field.kind).collect()
    }

    pub fn key_arity(&self) -> usize {
        self.key.len()
    }

    /// Ordering key of a raw row, values as stored
    pub fn key_values(&self, row: &Row) -> Vec<Value> {
        self.key
            .iter()
            .map(|&index| row.get(index).cloned().unwrap_or(Value::Null))
            .collect()
    }
}

pub struct ResourceSchemaBuilder {
    label: &'static str,
    table: &'static str,
    fields: Vec<FieldSpec>,
    key: Vec<&'static str>,
}

impl ResourceSchemaBuilder {
    pub fn column(mut self, column: &str, kind: ColumnKind) -> Self {
        self.fields.push(FieldSpec {
            column: column.to_string(),
            name: to_snake_case(column),
            kind,
        });
        self
    }

    pub fn text(self, column: &str) -> Self {
        self.column(column, ColumnKind::Text)
    }

    pub fn integer(self, column: &str) -> Self {
        self.column(column, ColumnKind::Integer)
    }

    pub fn decimal(self, column: &str) -> Self {
        self.column(column, ColumnKind::Decimal)
    }

    pub fn boolean(self, column: &str) -> Self {
        self.column(column, ColumnKind::Boolean)
    }

    pub fn date(self, column: &str) -> Self {
        self.column(column, ColumnKind::Date)
    }

    pub fn datetime(self, column: &str) -> Self {
        self.column(column, ColumnKind::DateTime)
    }

    pub fn texts(self, columns: &[&str]) -> Self {
        columns.iter().fold(self, |builder, column| builder.text(column))
    }

    pub fn integers(self, columns: &[&str]) -> Self {
        columns.iter().fold(self, |builder, column| builder.integer(column))
    }

    pub fn decimals(self, columns: &[&str]) -> Self {
        columns.iter().fold(self, |builder, column| builder.decimal(column))
    }

    /// Numbered columns `{prefix}01` through `{prefix}{count:02}`
    pub fn series(self, prefix: &str, count: usize, kind: ColumnKind) -> Self {
        (1..=count).fold(self, |builder, n| builder.column(&format!("{prefix}{n:02}"), kind))
    }

    /// Override the JSON name of an already declared column
    pub fn rename(mut self, column: &str, name: &str) -> Self {
        if let Some(field) = self.fields.iter_mut().find(|field| field.column == column) {
            field.name = name.to_string();
        }
        self
    }

    /// Ordering key, most significant column first
    pub fn key(mut self, columns: &[&'static str]) -> Self {
        self.key = columns.to_vec();
        self
    }

    /// # Panics
    ///
    /// When the key is empty or names an undeclared column. Schemas are
    /// static tables and every one of them is built in tests.
    pub fn build(self) -> ResourceSchema {
        assert!(!self.key.is_empty(), "{} schema declares no key", self.label);

        let key = self
            .key
            .iter()
            .map(|column| {
                self.fields
                    .iter()
                    .position(|field| field.column == *column)
                    .unwrap_or_else(|| panic!("{} key column {column} is not declared", self.label))
            })
            .collect();

        ResourceSchema {
            label: self.label,
            table: self.table,
            fields: self.fields,
            key,
        }
    }
}
