//! Keyset select construction
//!
//! A page query selects every schema column, applies the caller's filters,
//! continues strictly after the cursor key when there is one, orders by the
//! key ascending and over-fetches one row so the caller can tell whether
//! another page exists.
//!
//! For a key `(k1, k2, k3)` and cursor `(c1, c2, c3)` the continuation is
//!
//! ```text
//! (k1 > c1) OR (k1 = c1 AND k2 > c2) OR (k1 = c1 AND k2 = c2 AND k3 > c3)
//! ```
//!
//! which is lexicographic order, correct even where the first key column has
//! duplicate values.

use crate::database::{CompareOp, Predicate, Select, Value};

use super::schema::ResourceSchema;

/// A caller supplied restriction
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// One column compared with one value
    Compare {
        column: &'static str,
        op: CompareOp,
        value: Value,
    },
    /// Matches when any of the inner filters does
    AnyOf(Vec<Filter>),
}

impl Filter {
    fn compare(column: &'static str, op: CompareOp, value: impl Into<Value>) -> Self {
        Filter::Compare {
            column,
            op,
            value: value.into(),
        }
    }

    pub fn eq(column: &'static str, value: impl Into<Value>) -> Self {
        Self::compare(column, CompareOp::Eq, value)
    }

    pub fn gte(column: &'static str, value: impl Into<Value>) -> Self {
        Self::compare(column, CompareOp::Gte, value)
    }

    pub fn lte(column: &'static str, value: impl Into<Value>) -> Self {
        Self::compare(column, CompareOp::Lte, value)
    }

    /// Substring match
    pub fn contains(column: &'static str, text: &str) -> Self {
        Self::compare(column, CompareOp::Like, Value::Text(format!("%{text}%")))
    }

    pub fn any_of(filters: Vec<Filter>) -> Self {
        Filter::AnyOf(filters)
    }

    /// Every column the filter reads
    pub fn columns(&self) -> Vec<&'static str> {
        match self {
            Filter::Compare { column, .. } => vec![*column],
            Filter::AnyOf(filters) => filters.iter().flat_map(Filter::columns).collect(),
        }
    }

    fn predicate(&self) -> Predicate {
        match self {
            Filter::Compare { column, op, value } => Predicate::compare(*column, *op, value.clone()),
            Filter::AnyOf(filters) => {
                Predicate::AnyOf(filters.iter().map(|filter| vec![filter.predicate()]).collect())
            }
        }
    }
}

fn base_select(schema: &ResourceSchema) -> Select {
    Select {
        table: schema.table().to_string(),
        columns: schema
            .fields()
            .iter()
            .map(|field| (field.column.clone(), field.kind))
            .collect(),
        filter: Vec::new(),
        order_by: Vec::new(),
        limit: None,
    }
}

/// Keyset continuation strictly after `after`
fn after_predicate(schema: &ResourceSchema, after: &[Value]) -> Predicate {
    let columns: Vec<&str> = schema.key_fields().map(|field| field.column.as_str()).collect();

    let branches = (0..columns.len().min(after.len()))
        .map(|depth| {
            let mut branch: Vec<Predicate> = (0..depth)
                .map(|i| Predicate::compare(columns[i], CompareOp::Eq, after[i].clone()))
                .collect();
            branch.push(Predicate::compare(columns[depth], CompareOp::Gt, after[depth].clone()));
            branch
        })
        .collect();

    Predicate::AnyOf(branches)
}

/// Select for one page of `limit` rows, fetching `limit + 1`
pub fn page_select(
    schema: &ResourceSchema,
    filters: &[Filter],
    after: Option<&[Value]>,
    limit: u64,
) -> Select {
    let mut select = base_select(schema);

    select.filter = filters.iter().map(Filter::predicate).collect();
    if let Some(after) = after {
        select.filter.push(after_predicate(schema, after));
    }

    select.order_by = schema.key_fields().map(|field| field.column.clone()).collect();
    select.limit = Some(limit.saturating_add(1));
    select
}

/// Select for the single record with the full key `key`
pub fn lookup_select(schema: &ResourceSchema, key: &[Value]) -> Select {
    let mut select = base_select(schema);

    select.filter = schema
        .key_fields()
        .zip(key)
        .map(|(field, value)| Predicate::compare(field.column.as_str(), CompareOp::Eq, value.clone()))
        .collect();
    select.limit = Some(1);
    select
}
