//! In-memory connector
//!
//! Serves tables held in memory by evaluating the structured [`Select`] that
//! travels with every statement. Connection failures, slow connects, slow or
//! failing queries can be switched on at runtime, and every physical
//! connection is counted so tests can assert on open/close behaviour.

use std::cmp::Ordering as CmpOrdering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::database::{
    CompareOp, Connection, Connector, DriverError, Predicate, Row, Select, SqlDialect, Statement, Value,
};

#[derive(Debug, Clone, Default)]
struct FakeTable {
    columns: Vec<String>,
    rows: Vec<Row>,
}

#[derive(Default)]
struct FakeState {
    tables: Mutex<HashMap<String, FakeTable>>,
    statements: Mutex<Vec<Statement>>,
    query_failure: Mutex<Option<String>>,
    connect_delay: Mutex<Duration>,
    query_delay: Mutex<Duration>,
    unavailable: AtomicBool,
    failing_connects: AtomicU32,
    connect_attempts: AtomicU64,
    open: AtomicI64,
    peak_open: AtomicI64,
    closed: AtomicU64,
}

/// Connector over in-memory tables, cheap to clone and shared between clones
#[derive(Clone)]
pub struct FakeConnector {
    dialect: SqlDialect,
    secrets: Vec<String>,
    state: Arc<FakeState>,
}

impl Default for FakeConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeConnector {
    pub fn new() -> Self {
        Self {
            dialect: SqlDialect::Pervasive,
            secrets: Vec::new(),
            state: Arc::new(FakeState::default()),
        }
    }

    pub fn with_dialect(mut self, dialect: SqlDialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Register a secret; connection failures will mention it
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secrets.push(secret.into());
        self
    }

    pub fn with_table(self, table: &str, columns: &[&str], rows: Vec<Row>) -> Self {
        self.insert_table(table, columns, rows);
        self
    }

    pub fn insert_table(&self, table: &str, columns: &[&str], rows: Vec<Row>) {
        let table_data = FakeTable {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        };
        lock(&self.state.tables).insert(table.to_string(), table_data);
    }

    /// Every connect fails while set
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// The next `count` connects fail
    pub fn fail_next_connects(&self, count: u32) {
        self.state.failing_connects.store(count, Ordering::SeqCst);
    }

    pub fn set_connect_delay(&self, delay: Duration) {
        *lock(&self.state.connect_delay) = delay;
    }

    pub fn set_query_delay(&self, delay: Duration) {
        *lock(&self.state.query_delay) = delay;
    }

    pub fn fail_queries_with(&self, message: Option<&str>) {
        *lock(&self.state.query_failure) = message.map(str::to_string);
    }

    pub fn connect_attempts(&self) -> u64 {
        self.state.connect_attempts.load(Ordering::SeqCst)
    }

    pub fn open_connections(&self) -> i64 {
        self.state.open.load(Ordering::SeqCst)
    }

    pub fn peak_open_connections(&self) -> i64 {
        self.state.peak_open.load(Ordering::SeqCst)
    }

    pub fn closed_connections(&self) -> u64 {
        self.state.closed.load(Ordering::SeqCst)
    }

    /// Statements executed so far, oldest first
    pub fn statements(&self) -> Vec<Statement> {
        lock(&self.state.statements).clone()
    }

    pub fn last_statement(&self) -> Option<Statement> {
        lock(&self.state.statements).last().cloned()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl Connector for FakeConnector {
    fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    async fn connect(&self) -> Result<Box<dyn Connection>, DriverError> {
        self.state.connect_attempts.fetch_add(1, Ordering::SeqCst);

        let delay = *lock(&self.state.connect_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let scheduled_failure = self
            .state
            .failing_connects
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();

        if scheduled_failure || self.state.unavailable.load(Ordering::SeqCst) {
            return Err(DriverError::new(format!(
                "[08001] unable to reach data source (credentials {})",
                self.secrets.join(",")
            )));
        }

        let open = self.state.open.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.peak_open.fetch_max(open, Ordering::SeqCst);

        Ok(Box::new(FakeConnection {
            state: self.state.clone(),
            closed: false,
        }))
    }

    fn secrets(&self) -> Vec<String> {
        self.secrets.clone()
    }
}

struct FakeConnection {
    state: Arc<FakeState>,
    closed: bool,
}

impl FakeConnection {
    fn mark_closed(&mut self) {
        if !self.closed {
            self.closed = true;
            self.state.open.fetch_sub(1, Ordering::SeqCst);
            self.state.closed.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl Drop for FakeConnection {
    fn drop(&mut self) {
        self.mark_closed();
    }
}

#[async_trait]
impl Connection for FakeConnection {
    async fn query(&mut self, statement: &Statement) -> Result<Vec<Row>, DriverError> {
        if self.closed {
            return Err(DriverError::new("connection is closed"));
        }

        lock(&self.state.statements).push(statement.clone());

        let delay = *lock(&self.state.query_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = lock(&self.state.query_failure).clone() {
            return Err(DriverError::new(message));
        }

        match &statement.select {
            Some(select) => {
                let tables = lock(&self.state.tables);
                let table = tables
                    .get(&select.table)
                    .ok_or_else(|| DriverError::new(format!("table {} not found", select.table)))?;
                evaluate(table, select)
            }
            // Raw statements are liveness probes
            None => Ok(vec![vec![Value::Int(1)]]),
        }
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        self.mark_closed();
        Ok(())
    }
}

fn evaluate(table: &FakeTable, select: &Select) -> Result<Vec<Row>, DriverError> {
    let position = |column: &str| table.columns.iter().position(|c| c == column);

    for (column, _) in &select.columns {
        if position(column).is_none() {
            return Err(DriverError::new(format!("column {column} not found")));
        }
    }

    let mut rows: Vec<&Row> = table
        .rows
        .iter()
        .filter(|row| select.filter.iter().all(|p| matches(p, row, &position)))
        .collect();

    rows.sort_by(|a, b| {
        for column in &select.order_by {
            if let Some(index) = position(column) {
                let ordering = a[index].compare(&b[index]).unwrap_or(CmpOrdering::Equal);
                if ordering != CmpOrdering::Equal {
                    return ordering;
                }
            }
        }
        CmpOrdering::Equal
    });

    if let Some(limit) = select.limit {
        rows.truncate(limit as usize);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            select
                .columns
                .iter()
                .map(|(column, _)| position(column).map(|i| row[i].clone()).unwrap_or(Value::Null))
                .collect()
        })
        .collect())
}

fn matches(predicate: &Predicate, row: &Row, position: &dyn Fn(&str) -> Option<usize>) -> bool {
    match predicate {
        Predicate::Compare { column, op, value } => {
            let Some(cell) = position(column).map(|i| &row[i]) else {
                return false;
            };

            match op {
                CompareOp::Like => like(cell, value),
                CompareOp::Eq => cell.compare(value) == Some(CmpOrdering::Equal),
                CompareOp::Gt => cell.compare(value) == Some(CmpOrdering::Greater),
                CompareOp::Gte => matches!(
                    cell.compare(value),
                    Some(CmpOrdering::Greater | CmpOrdering::Equal)
                ),
                CompareOp::Lte => matches!(
                    cell.compare(value),
                    Some(CmpOrdering::Less | CmpOrdering::Equal)
                ),
            }
        }
        Predicate::AnyOf(branches) => branches
            .iter()
            .any(|branch| branch.iter().all(|p| matches(p, row, position))),
    }
}

fn like(cell: &Value, pattern: &Value) -> bool {
    let (Some(text), Some(pattern)) = (cell.as_text(), pattern.as_text()) else {
        return false;
    };

    let starts = pattern.starts_with('%');
    let ends = pattern.ends_with('%') && pattern.len() > 1;
    let needle = pattern.trim_start_matches('%').trim_end_matches('%');

    match (starts, ends) {
        (true, true) => text.contains(needle),
        (true, false) => text.ends_with(needle),
        (false, true) => text.starts_with(needle),
        (false, false) => text == needle,
    }
}
