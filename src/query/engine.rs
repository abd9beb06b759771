//! Resource query engine
//!
//! One generic implementation of "give me a page of table T ordered by key K,
//! filtered by F, after cursor C" and "give me the record with key K". Every
//! endpoint is a schema plus a set of filters fed to this engine.

use std::time::Instant;

use thiserror::Error;

use crate::database::{DatabaseError, DatabasePool, Row, Select, Value};
use crate::pagination::{cursor, CursorError, Page};

use super::builder::{lookup_select, page_select, Filter};
use super::mapping::{map_row, ResourceRecord};
use super::schema::ResourceSchema;

#[derive(Debug, Error)]
pub enum QueryEngineError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Cursor(#[from] CursorError),

    #[error("Unknown filter column {column} for {resource}")]
    UnknownColumn {
        resource: &'static str,
        column: &'static str,
    },

    #[error("Expected {expected} key values for {resource}, got {actual}")]
    KeyArity {
        resource: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// What a caller asks of one list endpoint
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    /// Page size, already resolved against the configured bounds
    pub limit: u64,
    pub cursor: Option<String>,
    pub filters: Vec<Filter>,
}

#[derive(Clone)]
pub struct ResourceQueryEngine {
    pool: DatabasePool,
}

impl ResourceQueryEngine {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    /// Fetch one page of `schema`
    ///
    /// The cursor is decoded before any connection is taken, so a malformed
    /// cursor never costs a database round trip.
    #[tracing::instrument(skip(self, schema, request), fields(
        resource = schema.label(),
        table = schema.table(),
        limit = request.limit,
        has_cursor = request.cursor.is_some(),
        filters = request.filters.len(),
    ))]
    pub async fn paginate(
        &self,
        schema: &ResourceSchema,
        request: PageRequest,
    ) -> Result<Page<ResourceRecord>, QueryEngineError> {
        let limit = request.limit.max(1);

        let after = request
            .cursor
            .as_deref()
            .map(|c| cursor::decode(c, &schema.key_kinds()))
            .transpose()?;

        self.check_filters(schema, &request.filters)?;

        let select = page_select(schema, &request.filters, after.as_deref(), limit);
        let mut rows = self.fetch(schema, &select).await?;

        let has_more = rows.len() as u64 > limit;
        rows.truncate(limit as usize);

        let next_cursor = if has_more {
            rows.last().map(|row| cursor::encode(&schema.key_values(row)))
        } else {
            None
        };

        tracing::debug!(rows = rows.len(), has_more, "Page fetched");

        let data = rows.into_iter().map(|row| map_row(schema, row)).collect();

        Ok(Page::new(data, limit, request.cursor, next_cursor))
    }

    /// Fetch the record with the full ordering key `key`
    #[tracing::instrument(skip(self, schema, key), fields(
        resource = schema.label(),
        table = schema.table(),
        key_arity = key.len(),
    ))]
    pub async fn find(
        &self,
        schema: &ResourceSchema,
        key: Vec<Value>,
    ) -> Result<Option<ResourceRecord>, QueryEngineError> {
        if key.len() != schema.key_arity() {
            return Err(QueryEngineError::KeyArity {
                resource: schema.label(),
                expected: schema.key_arity(),
                actual: key.len(),
            });
        }

        let select = lookup_select(schema, &key);
        let rows = self.fetch(schema, &select).await?;

        Ok(rows.into_iter().next().map(|row| map_row(schema, row)))
    }

    fn check_filters(&self, schema: &ResourceSchema, filters: &[Filter]) -> Result<(), QueryEngineError> {
        let unknown = filters
            .iter()
            .flat_map(Filter::columns)
            .find(|column| schema.field(column).is_none());

        match unknown {
            Some(column) => Err(QueryEngineError::UnknownColumn {
                resource: schema.label(),
                column,
            }),
            None => Ok(()),
        }
    }

    /// Acquire, run, release; the connection is released on every path
    async fn fetch(&self, schema: &ResourceSchema, select: &Select) -> Result<Vec<Row>, QueryEngineError> {
        let statement = select.render(self.pool.dialect());
        let started = Instant::now();

        let mut connection = self.pool.acquire().await?;
        let result = connection.query(&statement).await;
        self.pool.release(connection).await;

        let elapsed = started.elapsed();
        let outcome = if result.is_ok() { "ok" } else { "error" };

        if let Some(metrics) = self.pool.metrics() {
            metrics.record_db_query(schema.table(), outcome, elapsed.as_secs_f64());
        }

        match &result {
            Ok(rows) => tracing::debug!(
                rows = rows.len(),
                params = statement.values.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "Query completed"
            ),
            Err(err) => tracing::error!(
                error = %err,
                params = statement.values.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "Query failed"
            ),
        }

        Ok(result?)
    }
}
