//! Statements handed to connections
//!
//! A [`Select`] is the structured form of every read the service issues. It is
//! rendered once per dialect into a [`Statement`] with positional parameters;
//! the structured form rides along so connectors that do not speak SQL can
//! still evaluate it.

use std::fmt::Write as _;

use super::value::{ColumnKind, Value};

/// SQL flavour of the backend behind a connector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlDialect {
    /// Pervasive PSQL over ODBC: `SELECT TOP n`, `?` placeholders
    Pervasive,
    Sqlite,
    Postgres,
    MySql,
}

impl SqlDialect {
    /// Placeholder for the 1-based parameter `index`
    pub fn placeholder(&self, index: usize) -> String {
        match self {
            SqlDialect::Postgres => format!("${index}"),
            _ => "?".to_string(),
        }
    }

    /// Whether the row limit is expressed as `SELECT TOP n`
    pub fn uses_top(&self) -> bool {
        matches!(self, SqlDialect::Pervasive)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SqlDialect::Pervasive => "pervasive",
            SqlDialect::Sqlite => "sqlite",
            SqlDialect::Postgres => "postgres",
            SqlDialect::MySql => "mysql",
        }
    }
}

/// Comparison applied by a single predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Gt,
    Gte,
    Lte,
    /// SQL `LIKE`, the value carries its own `%` wildcards
    Like,
}

impl CompareOp {
    fn sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lte => "<=",
            CompareOp::Like => "LIKE",
        }
    }
}

/// A boolean condition over one row
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Compare {
        column: String,
        op: CompareOp,
        value: Value,
    },
    /// Disjunction of conjunctions: `(a AND b) OR (c) OR ...`
    AnyOf(Vec<Vec<Predicate>>),
}

impl Predicate {
    pub fn compare(column: impl Into<String>, op: CompareOp, value: Value) -> Self {
        Predicate::Compare {
            column: column.into(),
            op,
            value,
        }
    }
}

/// Structured single-table select
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: String,
    /// Selected columns with the kind each is decoded as
    pub columns: Vec<(String, ColumnKind)>,
    /// Conjunction of predicates
    pub filter: Vec<Predicate>,
    /// Ascending sort columns
    pub order_by: Vec<String>,
    pub limit: Option<u64>,
}

impl Select {
    /// Render into SQL text with positional parameters for `dialect`
    pub fn render(&self, dialect: SqlDialect) -> Statement {
        let mut sql = String::from("SELECT ");
        let mut values = Vec::new();

        if let (Some(limit), true) = (self.limit, dialect.uses_top()) {
            let _ = write!(sql, "TOP {limit} ");
        }

        let columns: Vec<&str> = self.columns.iter().map(|(name, _)| name.as_str()).collect();
        let _ = write!(sql, "{} FROM {}", columns.join(", "), self.table);

        if !self.filter.is_empty() {
            let clauses: Vec<String> = self
                .filter
                .iter()
                .map(|predicate| render_predicate(predicate, dialect, &mut values))
                .collect();
            let _ = write!(sql, " WHERE {}", clauses.join(" AND "));
        }

        if !self.order_by.is_empty() {
            let order: Vec<String> = self.order_by.iter().map(|c| format!("{c} ASC")).collect();
            let _ = write!(sql, " ORDER BY {}", order.join(", "));
        }

        if let (Some(limit), false) = (self.limit, dialect.uses_top()) {
            let _ = write!(sql, " LIMIT {limit}");
        }

        Statement {
            sql,
            values,
            columns: self.columns.iter().map(|(_, kind)| *kind).collect(),
            select: Some(self.clone()),
        }
    }
}

fn render_predicate(predicate: &Predicate, dialect: SqlDialect, values: &mut Vec<Value>) -> String {
    match predicate {
        Predicate::Compare { column, op, value } => {
            values.push(value.clone());
            format!("{column} {} {}", op.sql(), dialect.placeholder(values.len()))
        }
        Predicate::AnyOf(branches) => {
            let rendered: Vec<String> = branches
                .iter()
                .map(|branch| {
                    let parts: Vec<String> = branch
                        .iter()
                        .map(|p| render_predicate(p, dialect, values))
                        .collect();
                    format!("({})", parts.join(" AND "))
                })
                .collect();
            format!("({})", rendered.join(" OR "))
        }
    }
}

/// A rendered statement ready for a connection
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    /// Bound parameters, in placeholder order
    pub values: Vec<Value>,
    /// Kind of each result column, in select-list order
    pub columns: Vec<ColumnKind>,
    /// Structured form, absent for raw statements
    pub select: Option<Select>,
}

impl Statement {
    /// A parameterless statement with no structured form
    pub fn raw(sql: impl Into<String>, columns: Vec<ColumnKind>) -> Self {
        Self {
            sql: sql.into(),
            values: Vec::new(),
            columns,
            select: None,
        }
    }

    /// Liveness probe returning a single integer
    pub fn ping() -> Self {
        Self::raw("SELECT 1", vec![ColumnKind::Integer])
    }
}
