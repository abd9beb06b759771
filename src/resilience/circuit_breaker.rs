//! Circuit breaker guarding connection attempts
//!
//! The breaker counts failures reported by its caller. Once the count reaches
//! `failure_threshold` it opens and rejects work until `recovery_timeout` has
//! elapsed since the most recent failure. From then on it is half-open: callers
//! are let through to probe the backend. Any success closes it again and clears
//! the count, a failure keeps it open and restarts the recovery window.
//!
//! ```text
//! ┌─────────┐
//! │ Closed  │ ◄──────────────────────┐
//! └────┬────┘                        │
//!      │ failure_threshold           │ any success
//!      │ failures                    │
//!      ▼                             │
//! ┌─────────┐  recovery_timeout  ┌───┴───────┐
//! │  Open   │───────────────────►│ HalfOpen  │
//! └─────────┘◄───────────────────└───────────┘
//!                 any failure
//! ```
//!
//! Half-open is not stored. It is derived from the open flag and the age of
//! the last failure each time the breaker is consulted, so the number of
//! concurrent probes is not limited.

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Circuit breaker state as observed at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Normal operation, allowing all requests through
    Closed,
    /// Failing state, rejecting all requests until the recovery timeout expires
    Open,
    /// Recovery timeout elapsed, requests are let through as probes
    HalfOpen,
}

impl CircuitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CircuitState::Closed => "closed",
            CircuitState::Open => "open",
            CircuitState::HalfOpen => "half_open",
        }
    }
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CircuitState::Closed => write!(f, "Closed"),
            CircuitState::Open => write!(f, "Open"),
            CircuitState::HalfOpen => write!(f, "HalfOpen"),
        }
    }
}

/// Circuit breaker configuration
#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// When false the breaker never opens and records nothing
    pub enabled: bool,
    /// Number of failures before opening the circuit
    pub failure_threshold: u32,
    /// Time since the last failure before probes are allowed
    pub recovery_timeout: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            failure_threshold: 5,
            recovery_timeout: Duration::from_secs(60),
        }
    }
}

/// Circuit breaker error
#[derive(Debug, thiserror::Error)]
pub enum CircuitBreakerError<E = std::convert::Infallible> {
    /// Circuit is open, rejecting requests
    #[error("Circuit breaker is open for {name}")]
    Open { name: String, retry_after: Duration },
    /// The underlying operation failed
    #[error("Operation failed: {0}")]
    Inner(#[source] E),
}

impl CircuitBreakerError {
    fn widen<E>(self) -> CircuitBreakerError<E> {
        match self {
            CircuitBreakerError::Open { name, retry_after } => {
                CircuitBreakerError::Open { name, retry_after }
            }
            CircuitBreakerError::Inner(never) => match never {},
        }
    }
}

#[derive(Debug, Default)]
struct BreakerState {
    failure_count: u32,
    last_failure: Option<Instant>,
    is_open: bool,
}

impl BreakerState {
    fn observe(&self, recovery_timeout: Duration) -> CircuitState {
        if !self.is_open {
            return CircuitState::Closed;
        }

        match self.last_failure {
            Some(at) if at.elapsed() < recovery_timeout => CircuitState::Open,
            _ => CircuitState::HalfOpen,
        }
    }

    fn remaining(&self, recovery_timeout: Duration) -> Duration {
        self.last_failure
            .map(|at| recovery_timeout.saturating_sub(at.elapsed()))
            .unwrap_or_default()
    }
}

/// Running totals, kept outside the state lock
#[derive(Debug, Default)]
struct BreakerTotals {
    successes: AtomicU64,
    failures: AtomicU64,
    rejections: AtomicU64,
}

/// Failure counting circuit breaker
///
/// Cloning is cheap and every clone shares the same state. The inner mutex is
/// only held for the few field updates of a decision, never across an await.
#[derive(Clone)]
pub struct CircuitBreaker {
    /// Name for logging and debugging
    name: String,
    state: Arc<Mutex<BreakerState>>,
    totals: Arc<BreakerTotals>,
    config: CircuitBreakerConfig,
}

impl CircuitBreaker {
    /// Create a new circuit breaker with default configuration
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, CircuitBreakerConfig::default())
    }

    /// Create a new circuit breaker with custom configuration
    pub fn with_config(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self {
            name: name.into(),
            state: Arc::new(Mutex::new(BreakerState::default())),
            totals: Arc::new(BreakerTotals::default()),
            config,
        }
    }

    /// A breaker that lets everything through
    pub fn disabled(name: impl Into<String>) -> Self {
        Self::with_config(
            name,
            CircuitBreakerConfig {
                enabled: false,
                ..CircuitBreakerConfig::default()
            },
        )
    }

    fn lock(&self) -> MutexGuard<'_, BreakerState> {
        // The state is a handful of plain fields, a poisoned guard is still usable.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }

    /// Current state, derived at call time
    pub fn state(&self) -> CircuitState {
        if !self.config.enabled {
            return CircuitState::Closed;
        }

        self.lock().observe(self.config.recovery_timeout)
    }

    pub fn failure_count(&self) -> u32 {
        self.lock().failure_count
    }

    /// Time left before the breaker lets a probe through, zero unless open
    pub fn retry_after(&self) -> Duration {
        if !self.config.enabled {
            return Duration::ZERO;
        }

        let state = self.lock();
        match state.observe(self.config.recovery_timeout) {
            CircuitState::Open => state.remaining(self.config.recovery_timeout),
            _ => Duration::ZERO,
        }
    }

    /// Decide whether an attempt may proceed
    ///
    /// Returns the state the attempt runs under (`Closed` or `HalfOpen`), or
    /// [`CircuitBreakerError::Open`] carrying the remaining cooldown.
    pub fn check(&self) -> Result<CircuitState, CircuitBreakerError> {
        if !self.config.enabled {
            return Ok(CircuitState::Closed);
        }

        let state = self.lock();
        match state.observe(self.config.recovery_timeout) {
            CircuitState::Open => {
                let retry_after = state.remaining(self.config.recovery_timeout);
                drop(state);

                self.totals.rejections.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(
                    circuit_breaker = %self.name,
                    retry_after_ms = retry_after.as_millis() as u64,
                    "Circuit breaker rejected attempt"
                );

                Err(CircuitBreakerError::Open {
                    name: self.name.clone(),
                    retry_after,
                })
            }
            CircuitState::HalfOpen => {
                tracing::debug!(
                    circuit_breaker = %self.name,
                    state = "Open -> HalfOpen",
                    failure_count = state.failure_count,
                    "Circuit breaker letting probe through"
                );
                Ok(CircuitState::HalfOpen)
            }
            CircuitState::Closed => Ok(CircuitState::Closed),
        }
    }

    /// Record a successful attempt, closing the breaker
    pub fn record_success(&self) {
        if !self.config.enabled {
            return;
        }

        self.totals.successes.fetch_add(1, Ordering::Relaxed);

        let mut state = self.lock();
        let was_open = state.is_open;
        *state = BreakerState::default();
        drop(state);

        if was_open {
            tracing::info!(
                circuit_breaker = %self.name,
                state = "HalfOpen -> Closed",
                "Circuit breaker closed after successful recovery"
            );
        }
    }

    /// Record a failed attempt and return the resulting state
    pub fn record_failure(&self) -> CircuitState {
        if !self.config.enabled {
            return CircuitState::Closed;
        }

        self.totals.failures.fetch_add(1, Ordering::Relaxed);

        let mut state = self.lock();
        state.failure_count = state.failure_count.saturating_add(1);
        state.last_failure = Some(Instant::now());

        if state.is_open {
            tracing::warn!(
                circuit_breaker = %self.name,
                state = "HalfOpen -> Open",
                failure_count = state.failure_count,
                "Circuit breaker re-opened after failed probe"
            );
            return CircuitState::Open;
        }

        if state.failure_count >= self.config.failure_threshold {
            state.is_open = true;
            tracing::warn!(
                circuit_breaker = %self.name,
                state = "Closed -> Open",
                failure_count = state.failure_count,
                failure_threshold = self.config.failure_threshold,
                recovery_timeout_secs = self.config.recovery_timeout.as_secs_f64(),
                "Circuit breaker opened due to repeated failures"
            );
            return CircuitState::Open;
        }

        CircuitState::Closed
    }

    /// Run `f` under the breaker, recording its outcome
    pub async fn call<F, T, E>(&self, f: F) -> Result<T, CircuitBreakerError<E>>
    where
        F: Future<Output = Result<T, E>>,
    {
        self.check().map_err(CircuitBreakerError::widen)?;

        match f.await {
            Ok(value) => {
                self.record_success();
                Ok(value)
            }
            Err(err) => {
                self.record_failure();
                Err(CircuitBreakerError::Inner(err))
            }
        }
    }

    /// Manually reset the circuit breaker to Closed state
    pub fn reset(&self) {
        *self.lock() = BreakerState::default();
        tracing::info!(
            circuit_breaker = %self.name,
            "Circuit breaker manually reset to Closed"
        );
    }

    pub fn total_successes(&self) -> u64 {
        self.totals.successes.load(Ordering::Relaxed)
    }

    pub fn total_failures(&self) -> u64 {
        self.totals.failures.load(Ordering::Relaxed)
    }

    pub fn total_rejections(&self) -> u64 {
        self.totals.rejections.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for CircuitBreaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircuitBreaker")
            .field("name", &self.name)
            .field("state", &self.state())
            .field("failure_count", &self.failure_count())
            .field("total_failures", &self.total_failures())
            .field("total_rejections", &self.total_rejections())
            .field("config", &self.config)
            .finish()
    }
}
