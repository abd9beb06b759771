use std::fmt;
use std::net::IpAddr;

use serde::Deserialize;

use super::{ConfigError, Validate};

/// Security configuration
///
/// `api_key` is a secret; `Debug` never prints it.
#[derive(Clone, Default, Deserialize)]
pub struct SecurityConfig {
    /// Shared key every client sends in `X-API-Key`
    #[serde(default)]
    pub api_key: String,
    /// Client addresses allowed to connect, empty allows everyone
    #[serde(default)]
    pub allowed_ips: Vec<String>,
    /// CORS configuration
    #[serde(default = "CorsConfig::default")]
    pub cors: CorsConfig,
    /// Rate limiting configuration
    #[serde(default = "RateLimitConfig::default")]
    pub rate_limit: RateLimitConfig,
}

/// CORS (Cross-Origin Resource Sharing) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_cors_enabled")]
    pub enabled: bool,
    /// Allowed origins (e.g., ["https://example.com", "*"])
    #[serde(default = "default_cors_origins")]
    pub origins: Vec<String>,
    /// Max age in seconds for preflight requests
    #[serde(default = "default_cors_max_age")]
    pub max_age: usize,
}

/// Per client rate limiting
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_rate_limit_enabled")]
    pub enabled: bool,
    /// Sustained requests per minute per client address
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,
    /// Requests a client may issue back to back, defaults to `requests_per_minute`
    #[serde(default)]
    pub burst: Option<u32>,
    /// Minimum spacing between two requests of one client; closer requests are delayed
    #[serde(default)]
    pub min_request_interval_ms: u64,
}

fn default_cors_enabled() -> bool {
    true
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_cors_max_age() -> usize {
    3600 // 1 hour
}

fn default_rate_limit_enabled() -> bool {
    true
}

fn default_requests_per_minute() -> u32 {
    60
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: default_cors_enabled(),
            origins: default_cors_origins(),
            max_age: default_cors_max_age(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_rate_limit_enabled(),
            requests_per_minute: default_requests_per_minute(),
            burst: None,
            min_request_interval_ms: 0,
        }
    }
}

impl SecurityConfig {
    /// Parsed allowlist
    pub fn allowed_ips(&self) -> Result<Vec<IpAddr>, ConfigError> {
        self.allowed_ips
            .iter()
            .map(|entry| entry.trim())
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                entry.parse::<IpAddr>().map_err(|_| {
                    ConfigError::ValidationError(format!(
                        "security.allowed_ips contains an invalid address: {entry}"
                    ))
                })
            })
            .collect()
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("api_key", &"<redacted>")
            .field("allowed_ips", &self.allowed_ips)
            .field("cors", &self.cors)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}

impl RateLimitConfig {
    pub fn burst(&self) -> u32 {
        self.burst.unwrap_or(self.requests_per_minute)
    }
}

impl Validate for SecurityConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "security.api_key cannot be empty".to_string(),
            ));
        }
        self.allowed_ips()?;
        self.cors.validate()?;
        self.rate_limit.validate()?;
        Ok(())
    }
}

impl Validate for CorsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.origins.is_empty() {
            return Err(ConfigError::ValidationError(
                "security.cors.origins cannot be empty when CORS is enabled".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for RateLimitConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }
        if self.requests_per_minute == 0 {
            return Err(ConfigError::ValidationError(
                "security.rate_limit.requests_per_minute must be > 0".to_string(),
            ));
        }
        if self.burst == Some(0) {
            return Err(ConfigError::ValidationError(
                "security.rate_limit.burst must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
