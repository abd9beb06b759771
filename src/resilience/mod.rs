//! Database circuit breaker
//!
//! Stops connection attempts against a backend that keeps failing and lets
//! probes through once the recovery timeout has passed.

mod circuit_breaker;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitBreakerError, CircuitState};
