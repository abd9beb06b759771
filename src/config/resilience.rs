use std::time::Duration;

use serde::Deserialize;

use super::{ConfigError, Validate};
use crate::resilience::CircuitBreakerConfig;

/// Resilience configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResilienceConfig {
    /// Circuit breaker in front of the connection pool
    #[serde(default = "CircuitBreakerSettings::default")]
    pub circuit_breaker: CircuitBreakerSettings,
}

/// Circuit breaker configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CircuitBreakerSettings {
    /// Enable circuit breaker
    #[serde(default = "default_circuit_breaker_enabled")]
    pub enabled: bool,
    /// Number of failed connection attempts before opening the circuit
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,
    /// Seconds since the last failure before probes are let through
    #[serde(default = "default_recovery_timeout")]
    pub recovery_timeout: u64,
}

fn default_circuit_breaker_enabled() -> bool {
    true
}

fn default_failure_threshold() -> u32 {
    5
}

fn default_recovery_timeout() -> u64 {
    60
}

impl Default for CircuitBreakerSettings {
    fn default() -> Self {
        Self {
            enabled: default_circuit_breaker_enabled(),
            failure_threshold: default_failure_threshold(),
            recovery_timeout: default_recovery_timeout(),
        }
    }
}

impl CircuitBreakerSettings {
    pub fn to_breaker_config(&self) -> CircuitBreakerConfig {
        CircuitBreakerConfig {
            enabled: self.enabled,
            failure_threshold: self.failure_threshold,
            recovery_timeout: Duration::from_secs(self.recovery_timeout),
        }
    }
}

impl Validate for CircuitBreakerSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }
        if self.failure_threshold == 0 {
            return Err(ConfigError::ValidationError(
                "resilience.circuit_breaker.failure_threshold must be > 0".to_string(),
            ));
        }
        if self.recovery_timeout == 0 {
            return Err(ConfigError::ValidationError(
                "resilience.circuit_breaker.recovery_timeout must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for ResilienceConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.circuit_breaker.validate()
    }
}
