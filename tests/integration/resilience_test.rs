//! Database outages as seen by HTTP clients

use std::time::Duration;

use actix_web::http::header::RETRY_AFTER;
use actix_web::http::StatusCode;
use actix_web::test::{call_service, read_body, read_body_json};
use pastel_bridge::resilience::CircuitState;
use pastel_bridge::testing::{self, fixtures};
use serde_json::Value;

#[actix_web::test]
async fn test_connection_failure_is_service_unavailable_without_credentials() {
    let connector = fixtures::connector().with_secret("hunter2");
    connector.set_unavailable(true);

    let (service, _connector, _state) = pastel_bridge::service!(connector);

    let resp = call_service(&service, testing::get("/api/customers").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = read_body(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("service_unavailable"));
    assert!(!text.contains("hunter2"));
}

#[actix_web::test]
async fn test_breaker_opens_and_fails_fast() {
    let connector = fixtures::connector();
    connector.set_unavailable(true);

    let mut config = testing::config();
    config.resilience.circuit_breaker.failure_threshold = 2;
    config.resilience.circuit_breaker.recovery_timeout = 30;

    let (service, connector, state) = pastel_bridge::service!(connector, config);

    for _ in 0..2 {
        let resp = call_service(&service, testing::get("/api/inventory").to_request()).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
    assert_eq!(state.pool.circuit_state(), CircuitState::Open);

    let resp = call_service(&service, testing::get("/api/inventory").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let retry_after: u64 = resp
        .headers()
        .get(RETRY_AFTER)
        .unwrap()
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!((1..=30).contains(&retry_after));

    let body: Value = read_body_json(resp).await;
    assert!(body["detail"].as_str().unwrap().contains("circuit breaker"));

    // Rejected before any connection attempt
    assert_eq!(connector.connect_attempts(), 2);

    let ready = call_service(&service, testing::get("/ready").to_request()).await;
    assert_eq!(ready.status(), StatusCode::SERVICE_UNAVAILABLE);

    let live = call_service(&service, testing::get("/health").to_request()).await;
    assert_eq!(live.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_breaker_recovers_after_successful_probe() {
    let connector = fixtures::connector();
    connector.fail_next_connects(1);

    let mut config = testing::config();
    config.resilience.circuit_breaker.failure_threshold = 1;
    config.resilience.circuit_breaker.recovery_timeout = 1;

    let (service, _connector, state) = pastel_bridge::service!(connector, config);

    let resp = call_service(&service, testing::get("/api/customers").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(state.pool.circuit_state(), CircuitState::Open);

    tokio::time::sleep(Duration::from_millis(1100)).await;

    let resp = call_service(&service, testing::get("/api/customers").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(state.pool.circuit_state(), CircuitState::Closed);
}

#[actix_web::test]
async fn test_pool_exhaustion_asks_client_to_retry() {
    let connector = fixtures::connector();
    connector.set_query_delay(Duration::from_millis(400));

    let mut config = testing::config();
    config.database.max_connections = 1;
    config.database.connection_acquire_timeout = 0.1;

    let (service, connector, _state) = pastel_bridge::service!(connector, config);

    let (first, second) = futures_util::join!(
        call_service(&service, testing::get("/api/customers").to_request()),
        call_service(&service, testing::get("/api/inventory").to_request()),
    );

    let mut statuses = vec![first.status(), second.status()];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::SERVICE_UNAVAILABLE]);

    let rejected = if first.status() == StatusCode::OK { second } else { first };
    assert_eq!(rejected.headers().get(RETRY_AFTER).unwrap(), "1");

    let body: Value = read_body_json(rejected).await;
    assert!(body["detail"].as_str().unwrap().contains("exhausted"));

    assert_eq!(connector.peak_open_connections(), 1);
    assert_eq!(connector.open_connections(), 0);
}

#[actix_web::test]
async fn test_query_failure_is_internal_error() {
    let connector = fixtures::connector();
    connector.fail_queries_with(Some("[S1000] record locked"));

    let (service, connector, state) = pastel_bridge::service!(connector);

    let resp = call_service(&service, testing::get("/api/customers").to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // A failing statement says nothing about reachability
    assert_eq!(state.pool.circuit_state(), CircuitState::Closed);
    assert_eq!(connector.open_connections(), 0);
}
