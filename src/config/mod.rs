pub mod app;
pub mod database;
pub mod resilience;
pub mod security;

use thiserror::Error;

pub use app::{
    ApiConfig, AppConfig, AppMetadata, LogFormat, ObservabilityConfig, ServerConfig, TlsConfig,
};
pub use database::{DatabaseConfig, PaginationConfig};
pub use resilience::{CircuitBreakerSettings, ResilienceConfig};
pub use security::{CorsConfig, RateLimitConfig, SecurityConfig};

/// Configuration loading or validation failure
///
/// Messages name the offending key, never its value.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Post-deserialization checks for a configuration section
pub trait Validate {
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Load the application configuration from files and environment variables
pub fn load() -> Result<AppConfig, ConfigError> {
    app::load_config()
}
