//! Bounded connection pool with circuit breaker protection
//!
//! Physical connections are not reused. Each [`DatabasePool::acquire`] waits
//! for one of `max_connections` slots, opens a fresh connection through the
//! [`Connector`], and [`DatabasePool::release`] closes it before handing the
//! slot back. The legacy ODBC backend keeps a hard cap on concurrent sessions
//! and does not survive long-lived ones well, so short sessions under a
//! counting semaphore are the whole strategy.
//!
//! Acquisition order:
//!
//! 1. consult the circuit breaker, failing fast with `CircuitOpen` while open
//! 2. wait at most `acquire_timeout` for a slot, else `PoolExhausted`
//! 3. open a connection, reporting the outcome to the breaker; on failure the
//!    slot is returned immediately. The attempt is bounded only by the
//!    driver's own connect timeout and is not cancelled here
//!
//! Connection errors are scrubbed of every secret the connector reports
//! before they are logged or returned.

use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::time::timeout;

use super::connector::{redact, Connection, Connector};
use super::statement::{SqlDialect, Statement};
use super::value::Row;
use crate::config::{DatabaseConfig, ResilienceConfig};
use crate::metrics::AppMetrics;
use crate::resilience::{CircuitBreaker, CircuitBreakerConfig, CircuitBreakerError, CircuitState};

/// Database access error
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Circuit breaker is open
    #[error("Database circuit breaker is open, service temporarily unavailable")]
    CircuitOpen { retry_after: Duration },

    /// No slot became free within the acquire timeout
    #[error("Connection pool exhausted, no connection available within {}s", .timeout.as_secs_f64())]
    PoolExhausted { timeout: Duration },

    /// Opening the physical connection failed
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    /// The statement failed on an open connection
    #[error("Database query failed: {0}")]
    QueryError(String),
}

impl DatabaseError {
    /// How long a client should wait before retrying, when that is known
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            DatabaseError::CircuitOpen { retry_after } => Some(*retry_after),
            DatabaseError::PoolExhausted { .. } => Some(Duration::from_secs(1)),
            _ => None,
        }
    }
}

/// Pool sizing, timeouts and breaker tuning
#[derive(Debug, Clone)]
pub struct PoolConfiguration {
    pub max_connections: usize,
    pub acquire_timeout: Duration,
    /// Holding a connection longer than this is logged as slow
    pub query_timeout: Duration,
    pub circuit_breaker: CircuitBreakerConfig,
}

impl PoolConfiguration {
    pub fn from_config(database: &DatabaseConfig, resilience: &ResilienceConfig) -> Self {
        Self {
            max_connections: database.max_connections as usize,
            acquire_timeout: database.acquire_timeout(),
            query_timeout: database.query_timeout(),
            circuit_breaker: resilience.circuit_breaker.to_breaker_config(),
        }
    }
}

impl Default for PoolConfiguration {
    fn default() -> Self {
        Self {
            max_connections: 3,
            acquire_timeout: Duration::from_secs(10),
            query_timeout: Duration::from_secs(30),
            circuit_breaker: CircuitBreakerConfig::default(),
        }
    }
}

struct PoolInner {
    connector: Arc<dyn Connector>,
    semaphore: Arc<Semaphore>,
    circuit_breaker: CircuitBreaker,
    config: PoolConfiguration,
    secrets: Vec<String>,
    metrics: Option<AppMetrics>,
}

impl PoolInner {
    fn active_connections(&self) -> usize {
        self.config
            .max_connections
            .saturating_sub(self.semaphore.available_permits())
    }

    fn publish_gauges(&self) {
        if let Some(metrics) = &self.metrics {
            metrics.set_pool_active(self.active_connections());
            metrics.set_circuit_open(self.circuit_breaker.state() == CircuitState::Open);
        }
    }
}

/// Shared handle to the pool
///
/// Cloning is cheap; every clone draws from the same slots and breaker.
#[derive(Clone)]
pub struct DatabasePool {
    inner: Arc<PoolInner>,
}

impl DatabasePool {
    #[tracing::instrument(skip(connector, config, metrics), fields(
        dialect = connector.dialect().as_str(),
        max_connections = config.max_connections,
        circuit_breaker_enabled = config.circuit_breaker.enabled,
        failure_threshold = config.circuit_breaker.failure_threshold,
    ))]
    pub fn new(
        connector: Arc<dyn Connector>,
        config: PoolConfiguration,
        metrics: Option<AppMetrics>,
    ) -> Self {
        let circuit_breaker =
            CircuitBreaker::with_config("database".to_string(), config.circuit_breaker.clone());
        let secrets = connector.secrets();
        let max_connections = config.max_connections.max(1);

        tracing::info!("Database pool initialized");

        Self {
            inner: Arc::new(PoolInner {
                connector,
                semaphore: Arc::new(Semaphore::new(max_connections)),
                circuit_breaker,
                config: PoolConfiguration {
                    max_connections,
                    ..config
                },
                secrets,
                metrics,
            }),
        }
    }

    /// Acquire a freshly opened connection
    pub async fn acquire(&self) -> Result<PooledConnection, DatabaseError> {
        let inner = &self.inner;

        if let Err(CircuitBreakerError::Open { retry_after, .. }) = inner.circuit_breaker.check() {
            tracing::warn!(
                retry_after_secs = retry_after.as_secs_f64(),
                "Database circuit breaker open, rejecting acquisition"
            );
            self.observe_acquire("circuit_open");
            return Err(DatabaseError::CircuitOpen { retry_after });
        }

        let wait = timeout(
            inner.config.acquire_timeout,
            inner.semaphore.clone().acquire_owned(),
        )
        .await;

        let permit = match wait {
            Ok(Ok(permit)) => permit,
            Ok(Err(_)) => {
                return Err(DatabaseError::ConnectionError(
                    "connection pool is closed".to_string(),
                ));
            }
            Err(_) => {
                tracing::warn!(
                    max_connections = inner.config.max_connections,
                    acquire_timeout_secs = inner.config.acquire_timeout.as_secs_f64(),
                    "No connection slot became available"
                );
                self.observe_acquire("exhausted");
                return Err(DatabaseError::PoolExhausted {
                    timeout: inner.config.acquire_timeout,
                });
            }
        };

        let started = Instant::now();
        let attempt = inner.circuit_breaker.call(inner.connector.connect());

        match attempt.await {
            Ok(connection) => {
                let pooled = PooledConnection {
                    connection: Some(connection),
                    acquired_at: Instant::now(),
                    pool: inner.clone(),
                    permit: Some(permit),
                };

                tracing::debug!(
                    connect_ms = started.elapsed().as_millis() as u64,
                    active_connections = inner.active_connections(),
                    "Database connection opened"
                );
                self.observe_acquire("ok");
                inner.publish_gauges();

                Ok(pooled)
            }
            Err(CircuitBreakerError::Open { retry_after, .. }) => {
                drop(permit);
                self.observe_acquire("circuit_open");
                Err(DatabaseError::CircuitOpen { retry_after })
            }
            Err(CircuitBreakerError::Inner(err)) => {
                drop(permit);

                let message = redact(err.message(), &inner.secrets);
                tracing::error!(
                    error = %message,
                    failure_count = inner.circuit_breaker.failure_count(),
                    circuit_state = %inner.circuit_breaker.state(),
                    "Failed to open database connection"
                );
                self.observe_acquire("error");
                inner.publish_gauges();

                Err(DatabaseError::ConnectionError(message))
            }
        }
    }

    /// Close `connection` and return its slot
    pub async fn release(&self, connection: PooledConnection) {
        connection.close().await;
    }

    /// Run the liveness probe on a fresh connection
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        let mut connection = self.acquire().await?;
        let result = connection.query(&Statement::ping()).await;
        self.release(connection).await;

        result.map(|_| ())
    }

    fn observe_acquire(&self, outcome: &'static str) {
        if let Some(metrics) = &self.inner.metrics {
            metrics.record_pool_acquire(outcome);
        }
    }

    pub fn dialect(&self) -> SqlDialect {
        self.inner.connector.dialect()
    }

    pub fn circuit_breaker(&self) -> &CircuitBreaker {
        &self.inner.circuit_breaker
    }

    pub fn circuit_state(&self) -> CircuitState {
        self.inner.circuit_breaker.state()
    }

    pub fn config(&self) -> &PoolConfiguration {
        &self.inner.config
    }

    pub fn max_connections(&self) -> usize {
        self.inner.config.max_connections
    }

    pub fn available_slots(&self) -> usize {
        self.inner.semaphore.available_permits()
    }

    pub fn active_connections(&self) -> usize {
        self.inner.active_connections()
    }

    pub fn metrics(&self) -> Option<&AppMetrics> {
        self.inner.metrics.as_ref()
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("dialect", &self.dialect())
            .field("max_connections", &self.max_connections())
            .field("available_slots", &self.available_slots())
            .field("circuit_breaker", &self.inner.circuit_breaker)
            .finish()
    }
}

/// A connection checked out of the pool
///
/// Hand it back with [`DatabasePool::release`]. Dropping it also closes the
/// connection and frees the slot, but without waiting for the driver.
pub struct PooledConnection {
    connection: Option<Box<dyn Connection>>,
    acquired_at: Instant,
    pool: Arc<PoolInner>,
    permit: Option<OwnedSemaphorePermit>,
}

impl PooledConnection {
    pub async fn query(&mut self, statement: &Statement) -> Result<Vec<Row>, DatabaseError> {
        let connection = self
            .connection
            .as_mut()
            .ok_or_else(|| DatabaseError::ConnectionError("connection already closed".to_string()))?;

        connection
            .query(statement)
            .await
            .map_err(|err| DatabaseError::QueryError(redact(err.message(), &self.pool.secrets)))
    }

    /// Time since the connection was opened
    pub fn held_for(&self) -> Duration {
        self.acquired_at.elapsed()
    }

    async fn close(mut self) {
        if let Some(mut connection) = self.connection.take() {
            if let Err(err) = connection.close().await {
                tracing::warn!(
                    error = %redact(err.message(), &self.pool.secrets),
                    "Error while closing database connection"
                );
            }
        }
    }
}

impl Drop for PooledConnection {
    fn drop(&mut self) {
        if self.connection.take().is_some() {
            tracing::debug!("Pooled connection dropped without release");
        }

        // The connection is gone before the slot is handed back.
        drop(self.permit.take());

        let held = self.acquired_at.elapsed();
        let slow = held > self.pool.config.query_timeout;

        if slow {
            tracing::warn!(
                held_secs = held.as_secs_f64(),
                query_timeout_secs = self.pool.config.query_timeout.as_secs_f64(),
                "Database connection held longer than query timeout"
            );
        }

        if let Some(metrics) = &self.pool.metrics {
            metrics.record_connection_hold(held, slow);
        }
        self.pool.publish_gauges();
    }
}
