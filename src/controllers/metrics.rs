//! Prometheus scrape endpoint

use actix_web::web::Data;
use actix_web::{HttpResponse, Responder};

use crate::database::DatabasePool;
use crate::metrics::AppMetrics;
use crate::resilience::CircuitState;

pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Prometheus text exposition
///
/// Pool gauges are refreshed from the live pool on every scrape, so they are
/// current even when no request has touched the database since the last one.
#[get("/metrics")]
pub async fn metrics(metrics: Data<AppMetrics>, pool: Option<Data<DatabasePool>>) -> impl Responder {
    if let Some(pool) = pool {
        metrics.set_pool_active(pool.active_connections());
        metrics.set_circuit_open(pool.circuit_state() == CircuitState::Open);
    }

    HttpResponse::Ok()
        .content_type(PROMETHEUS_CONTENT_TYPE)
        .body(metrics.render())
}
