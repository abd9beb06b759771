pub mod middleware;

pub use middleware::MetricsMiddleware;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

#[derive(Clone)]
pub struct AppMetrics {
    prometheus_handle: Arc<PrometheusHandle>,
}

impl AppMetrics {
    pub fn new() -> Self {
        Self::with_config(None)
    }

    pub fn with_config(config: Option<&crate::config::AppConfig>) -> Self {
        let handle = PROMETHEUS_HANDLE.get_or_init(|| {
            let builder = PrometheusBuilder::new();

            let builder = if let Some(cfg) = config {
                builder
                    .add_global_label("service", cfg.app.name.clone())
                    .add_global_label("version", cfg.app.version.clone())
                    .add_global_label("environment", cfg.app.environment.clone())
            } else {
                builder
            };

            let builder = builder
                .set_buckets_for_metric(
                    Matcher::Full("http_requests_duration_seconds".to_string()),
                    &[0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0],
                )
                .expect("Failed to set buckets for http_requests_duration_seconds")
                .set_buckets_for_metric(
                    Matcher::Full("db_queries_duration_seconds".to_string()),
                    &[0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 30.0],
                )
                .expect("Failed to set buckets for db_queries_duration_seconds")
                .set_buckets_for_metric(
                    Matcher::Full("db_pool_hold_duration_seconds".to_string()),
                    &[0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 30.0, 60.0],
                )
                .expect("Failed to set buckets for db_pool_hold_duration_seconds");

            let handle = builder
                .install_recorder()
                .expect("Failed to install Prometheus recorder");

            Self::describe_metrics();
            handle
        });

        Self {
            prometheus_handle: Arc::new(handle.clone()),
        }
    }

    fn describe_metrics() {
        // HTTP metrics
        describe_counter!("http_requests_total", "Total number of HTTP requests");
        describe_histogram!(
            "http_requests_duration_seconds",
            "HTTP request duration in seconds"
        );
        describe_gauge!(
            "http_requests_in_flight",
            "Number of HTTP requests currently being processed"
        );

        // Pool metrics
        describe_counter!(
            "db_pool_acquire_total",
            "Connection acquisitions by outcome (ok, exhausted, circuit_open, error)"
        );
        describe_gauge!(
            "db_pool_connections_active",
            "Number of physical connections currently open"
        );
        describe_histogram!(
            "db_pool_hold_duration_seconds",
            "Time a connection was held between acquire and release"
        );
        describe_counter!(
            "db_slow_holds_total",
            "Connections held longer than the configured query timeout"
        );
        describe_gauge!(
            "db_circuit_breaker_open",
            "1 while the database circuit breaker rejects connection attempts"
        );

        // Query metrics
        describe_counter!("db_queries_total", "Total number of resource queries");
        describe_histogram!(
            "db_queries_duration_seconds",
            "Resource query duration in seconds"
        );
    }

    // HTTP metrics
    pub fn record_http_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        counter!(
            "http_requests_total",
            "method" => method.to_string(),
            "path" => path.to_string(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            "http_requests_duration_seconds",
            "method" => method.to_string(),
            "path" => path.to_string()
        )
        .record(duration_secs);
    }

    pub fn http_request_start(&self) {
        gauge!("http_requests_in_flight").increment(1.0);
    }

    pub fn http_request_end(&self) {
        gauge!("http_requests_in_flight").decrement(1.0);
    }

    // Pool metrics
    pub fn record_pool_acquire(&self, outcome: &'static str) {
        counter!("db_pool_acquire_total", "outcome" => outcome).increment(1);
    }

    pub fn set_pool_active(&self, count: usize) {
        gauge!("db_pool_connections_active").set(count as f64);
    }

    pub fn record_connection_hold(&self, held: Duration, slow: bool) {
        histogram!("db_pool_hold_duration_seconds").record(held.as_secs_f64());
        if slow {
            counter!("db_slow_holds_total").increment(1);
        }
    }

    pub fn set_circuit_open(&self, open: bool) {
        gauge!("db_circuit_breaker_open").set(if open { 1.0 } else { 0.0 });
    }

    // Query metrics
    pub fn record_db_query(&self, table: &str, outcome: &'static str, duration_secs: f64) {
        counter!(
            "db_queries_total",
            "table" => table.to_string(),
            "outcome" => outcome
        )
        .increment(1);
        histogram!("db_queries_duration_seconds", "table" => table.to_string())
            .record(duration_secs);
    }

    // Prometheus export
    pub fn render(&self) -> String {
        self.prometheus_handle.render()
    }
}

impl Default for AppMetrics {
    fn default() -> Self {
        Self::new()
    }
}
