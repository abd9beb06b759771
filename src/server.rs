//! HTTP server assembly

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::HttpServer;
use anyhow::Context;
use rustls::pki_types::pem::PemObject;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};

use crate::config::{AppConfig, ConfigError, CorsConfig};
use crate::database::{Connector, DatabasePool, PoolConfiguration, SeaOrmConnector};
use crate::metrics::AppMetrics;
use crate::query::ResourceQueryEngine;
use crate::security::IpRateLimiter;

/// Everything the request handlers and middleware share
///
/// Built once per process; every worker's `App` clones from it, so all of them
/// draw from the same pool, breaker and rate limit buckets.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub pool: DatabasePool,
    pub engine: ResourceQueryEngine,
    pub metrics: AppMetrics,
    pub allowed_ips: Vec<IpAddr>,
    pub rate_limiter: IpRateLimiter,
}

impl AppState {
    pub fn new(config: AppConfig, connector: Arc<dyn Connector>) -> Result<Self, ConfigError> {
        let allowed_ips = config.security.allowed_ips()?;
        let metrics = AppMetrics::with_config(Some(&config));
        let pool = DatabasePool::new(
            connector,
            PoolConfiguration::from_config(&config.database, &config.resilience),
            Some(metrics.clone()),
        );
        let engine = ResourceQueryEngine::new(pool.clone());
        let rate_limiter = IpRateLimiter::new(config.security.rate_limit.clone());

        Ok(Self {
            config,
            pool,
            engine,
            metrics,
            allowed_ips,
            rate_limiter,
        })
    }
}

/// CORS policy from configuration; disabled means same-origin only
pub fn cors(config: &CorsConfig) -> Cors {
    if !config.enabled {
        return Cors::default();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "OPTIONS"])
        .allow_any_header()
        .expose_headers(vec!["Retry-After", "X-Process-Time"])
        .max_age(config.max_age);

    if config.origins.iter().any(|origin| origin == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

/// Build the full application from an [`AppState`]
///
/// Middleware run outermost first: request logging, CORS, metrics, rate
/// limit, IP allowlist, API key.
#[macro_export]
macro_rules! app {
    ($state:expr) => {{
        let state: &$crate::server::AppState = &$state;

        ::actix_web::App::new()
            .app_data(::actix_web::web::Data::new(state.pool.clone()))
            .app_data(::actix_web::web::Data::new(state.engine.clone()))
            .app_data(::actix_web::web::Data::new(state.config.pagination.clone()))
            .app_data(::actix_web::web::Data::new(state.config.app.clone()))
            .app_data(::actix_web::web::Data::new(state.metrics.clone()))
            .configure($crate::router::route)
            .configure(|app| {
                if state.config.api.swagger_enabled {
                    $crate::router::docs(app);
                }
            })
            .wrap($crate::security::ApiKeyMiddleware::new(
                state.config.security.api_key.clone(),
            ))
            .wrap($crate::security::IpAllowlistMiddleware::new(
                state.allowed_ips.clone(),
            ))
            .wrap($crate::security::RateLimitMiddleware::with_limiter(
                state.rate_limiter.clone(),
            ))
            .wrap($crate::metrics::MetricsMiddleware::new(state.metrics.clone()))
            .wrap($crate::server::cors(&state.config.security.cors))
            .wrap($crate::middlewares::RequestLogging)
    }};
}

/// How often idle rate limit clients are dropped
const RATE_LIMIT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

fn spawn_rate_limit_sweep(limiter: IpRateLimiter) {
    if !limiter.config().enabled {
        return;
    }

    actix_web::rt::spawn(async move {
        let mut ticker = tokio::time::interval(RATE_LIMIT_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            limiter.evict_idle();
        }
    });
}

/// Server side TLS from a PEM certificate chain and private key
pub fn tls_config(cert_file: &str, key_file: &str) -> anyhow::Result<rustls::ServerConfig> {
    let certs = CertificateDer::pem_file_iter(cert_file)
        .with_context(|| format!("Failed to open TLS certificate {cert_file}"))?
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to parse TLS certificate {cert_file}"))?;
    if certs.is_empty() {
        anyhow::bail!("No certificate found in {cert_file}");
    }

    let key = PrivateKeyDer::from_pem_file(key_file)
        .with_context(|| format!("Failed to read TLS private key {key_file}"))?;

    let provider = Arc::new(rustls::crypto::aws_lc_rs::default_provider());
    let config = rustls::ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .context("TLS certificate and private key do not match")?;

    Ok(config)
}

/// Serve until the process is asked to stop
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let connector = Arc::new(SeaOrmConnector::new(
        config.database.url.clone(),
        config.database.connection_timeout(),
    ));
    let state = AppState::new(config, connector)?;

    let host = state.config.server.host.clone();
    let port = state.config.server.port;
    let workers = state.config.server.workers();
    let tls = state
        .config
        .server
        .tls
        .files()
        .map(|(cert_file, key_file)| tls_config(cert_file, key_file))
        .transpose()?;

    tracing::info!(
        name = %state.config.app.name,
        version = %state.config.app.version,
        environment = %state.config.app.environment,
        database = ?state.config.database,
        host = %host,
        port,
        workers,
        tls = tls.is_some(),
        "Starting HTTP server"
    );

    spawn_rate_limit_sweep(state.rate_limiter.clone());

    let server = HttpServer::new(move || app!(state)).workers(workers);
    let server = match tls {
        Some(tls) => server.bind_rustls_0_23((host.as_str(), port), tls)?,
        None => server.bind((host.as_str(), port))?,
    };

    server.run().await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}
