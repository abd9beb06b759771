//! Health check endpoints
//!
//! Liveness never touches the database. Readiness only looks at the circuit
//! breaker. `/api/ping` is the one probe that takes a pooled connection.

use actix_web::web::{Data, Json};
use actix_web::{HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::AppMetadata;
use crate::database::DatabasePool;
use crate::errors::ApiError;
use crate::resilience::CircuitState;

/// Liveness health check response (simple)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LivenessResponse {
    /// Service status
    pub status: String,
    /// Timestamp of the check
    pub timestamp: DateTime<Utc>,
}

/// Readiness health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadinessResponse {
    /// `ready` or `not_ready`
    pub status: String,
    pub timestamp: DateTime<Utc>,
    /// `closed`, `open` or `half_open`
    pub circuit_breaker: String,
}

/// Database probe response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PingResponse {
    /// `healthy` or `unhealthy`
    pub status: String,
    /// `connected` or `disconnected`
    pub database: String,
    /// `passed` or `failed`
    pub connection_test: String,
    pub circuit_breaker: String,
    /// Why the probe failed, absent when it passed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Service banner
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BannerResponse {
    pub message: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

fn alive() -> LivenessResponse {
    LivenessResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
    }
}

/// Liveness check endpoint
///
/// Always 200 while the process serves requests.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = LivenessResponse),
    )
)]
#[get("/health")]
pub async fn health() -> impl Responder {
    ::tracing::debug!("Liveness check: healthy");
    Json(alive())
}

/// Liveness probe (alias for /health)
#[utoipa::path(
    get,
    path = "/live",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = LivenessResponse),
    )
)]
#[get("/live")]
pub async fn live() -> impl Responder {
    ::tracing::debug!("Liveness check (via /live): healthy");
    Json(alive())
}

/// Readiness probe
///
/// Not ready while the database circuit breaker is open. No connection is
/// taken, so probing readiness never competes with clients for the pool.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "Circuit breaker is open", body = ReadinessResponse),
    )
)]
#[get("/ready")]
pub async fn ready(pool: Data<DatabasePool>) -> impl Responder {
    let state = pool.circuit_state();
    let is_ready = state != CircuitState::Open;

    let response = ReadinessResponse {
        status: if is_ready { "ready" } else { "not_ready" }.to_string(),
        timestamp: Utc::now(),
        circuit_breaker: state.as_str().to_string(),
    };

    ::tracing::debug!(status = %response.status, circuit_breaker = state.as_str(), "Readiness check performed");

    if is_ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Database connectivity probe
///
/// Takes a pooled connection and runs `SELECT 1`.
#[utoipa::path(
    get,
    path = "/api/ping",
    tag = "Health",
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Database reachable", body = PingResponse),
        (status = 503, description = "Database unavailable", body = PingResponse),
    )
)]
#[get("/api/ping")]
pub async fn ping(pool: Data<DatabasePool>) -> impl Responder {
    let result = pool.ping().await;
    let passed = result.is_ok();

    let error = result.err().map(|err| {
        ::tracing::warn!(error = %err, "Database ping failed");
        err
    });

    let retry_after = error.as_ref().and_then(|err| err.retry_after());

    let response = PingResponse {
        status: if passed { "healthy" } else { "unhealthy" }.to_string(),
        database: if passed { "connected" } else { "disconnected" }.to_string(),
        connection_test: if passed { "passed" } else { "failed" }.to_string(),
        circuit_breaker: pool.circuit_state().as_str().to_string(),
        error: error.map(|err| err.to_string()),
        timestamp: Utc::now(),
    };

    if passed {
        return HttpResponse::Ok().json(response);
    }

    let mut unavailable = HttpResponse::ServiceUnavailable();
    if let Some(retry_after) = retry_after {
        unavailable.insert_header((
            actix_web::http::header::RETRY_AFTER,
            crate::errors::retry_after_secs(retry_after),
        ));
    }
    unavailable.json(response)
}

/// Service banner
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Service banner", body = BannerResponse),
    )
)]
#[get("/")]
pub async fn index(app: Data<AppMetadata>) -> Result<Json<BannerResponse>, ApiError> {
    Ok(Json(BannerResponse {
        message: "Pastel Bridge API".to_string(),
        version: app.version.clone(),
        timestamp: Utc::now(),
    }))
}
