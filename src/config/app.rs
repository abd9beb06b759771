use serde::Deserialize;

use super::{
    ConfigError, DatabaseConfig, PaginationConfig, ResilienceConfig, SecurityConfig, Validate,
};

/// Top-level application configuration that aggregates all config modules
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Application metadata
    #[serde(default)]
    pub app: AppMetadata,
    /// HTTP listener (host, port, workers, TLS)
    #[serde(default)]
    pub server: ServerConfig,
    /// Data source and pool sizing
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Circuit breaker tuning
    #[serde(default)]
    pub resilience: ResilienceConfig,
    /// Page size bounds
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// API key, IP allowlist, CORS, rate limiting
    #[serde(default)]
    pub security: SecurityConfig,
    /// Logging
    #[serde(default)]
    pub observability: ObservabilityConfig,
    /// API documentation
    #[serde(default)]
    pub api: ApiConfig,
}

/// Application metadata configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppMetadata {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_app_version")]
    pub version: String,
    /// Application environment (development, staging, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Worker threads, 0 means one per CPU
    #[serde(default = "default_server_workers")]
    pub workers: usize,
    /// Serve HTTPS when both files are set
    #[serde(default)]
    pub tls: TlsConfig,
}

/// PEM certificate chain and private key for HTTPS
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TlsConfig {
    #[serde(default)]
    pub cert_file: Option<String>,
    #[serde(default)]
    pub key_file: Option<String>,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

/// API documentation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Serve Swagger UI at /docs and the OpenAPI document at /api.json
    #[serde(default = "default_swagger_enabled")]
    pub swagger_enabled: bool,
}

fn default_app_name() -> String {
    "pastel-bridge".to_string()
}

fn default_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8000
}

fn default_server_workers() -> usize {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_swagger_enabled() -> bool {
    true
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
            environment: default_environment(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            workers: default_server_workers(),
            tls: TlsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Effective worker count
    pub fn workers(&self) -> usize {
        match self.workers {
            0 => num_cpus::get(),
            workers => workers,
        }
    }
}

impl TlsConfig {
    /// Certificate and key paths, when HTTPS is configured
    pub fn files(&self) -> Option<(&str, &str)> {
        match (non_blank(&self.cert_file), non_blank(&self.key_file)) {
            (Some(cert_file), Some(key_file)) => Some((cert_file, key_file)),
            _ => None,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            swagger_enabled: default_swagger_enabled(),
        }
    }
}

impl Validate for AppMetadata {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError("app.name cannot be empty".to_string()));
        }
        if self.version.is_empty() {
            return Err(ConfigError::ValidationError("app.version cannot be empty".to_string()));
        }
        if self.environment.is_empty() {
            return Err(ConfigError::ValidationError("app.environment cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::ValidationError("server.host cannot be empty".to_string()));
        }
        if self.port == 0 {
            return Err(ConfigError::ValidationError("server.port must be > 0".to_string()));
        }
        self.tls.validate()
    }
}

impl Validate for TlsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let cert = non_blank(&self.cert_file).is_some();
        let key = non_blank(&self.key_file).is_some();
        if cert != key {
            return Err(ConfigError::ValidationError(
                "server.tls.cert_file and server.tls.key_file must be set together".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for ObservabilityConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "observability.log_level cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.app.validate()?;
        self.server.validate()?;
        self.database.validate()?;
        self.resilience.validate()?;
        self.pagination.validate()?;
        self.security.validate()?;
        self.observability.validate()?;
        Ok(())
    }
}

/// Load configuration from files and environment variables
///
/// Configuration loading follows this precedence (highest to lowest):
/// 1. Environment variables: PASTEL_BRIDGE__SERVER__PORT=8080
/// 2. config/local.toml (git-ignored, developer overrides)
/// 3. config/{APP_ENV}.toml (development/staging/production)
/// 4. config/default.toml (base defaults)
///
/// List settings (`security.allowed_ips`, `security.cors.origins`) accept a
/// comma separated value when given through the environment.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    use config::{Config, Environment, File};

    let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

    let config = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", env)).required(false))
        .add_source(File::with_name("config/local").required(false))
        .add_source(
            Environment::with_prefix("PASTEL_BRIDGE")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("security.allowed_ips")
                .with_list_parse_key("security.cors.origins"),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    app_config.validate()?;

    Ok(app_config)
}
