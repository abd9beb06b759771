//! Health, readiness and database probe endpoints through the full stack

use actix_web::http::StatusCode;
use actix_web::test::{call_service, read_body_json, TestRequest};
use pastel_bridge::testing::{self, fixtures};
use serde_json::Value;

#[actix_web::test]
async fn test_liveness_needs_no_key_and_no_database() {
    let connector = fixtures::connector();
    connector.set_unavailable(true);

    let (service, connector, _state) = pastel_bridge::service!(connector);

    for uri in ["/health", "/live", "/ready", "/"] {
        let resp = call_service(&service, TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
    }

    assert_eq!(connector.connect_attempts(), 0);
}

#[actix_web::test]
async fn test_liveness_response_shape() {
    let (service, _connector, _state) = pastel_bridge::service!();

    let resp = call_service(&service, TestRequest::get().uri("/health").to_request()).await;
    let body: Value = read_body_json(resp).await;

    assert_eq!(body["status"], "healthy");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[actix_web::test]
async fn test_ping_requires_key() {
    let (service, connector, _state) = pastel_bridge::service!();

    let resp = call_service(&service, TestRequest::get().uri("/api/ping").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(connector.connect_attempts(), 0);

    let resp = call_service(&service, testing::get("/api/ping").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["connection_test"], "passed");
    assert_eq!(body["circuit_breaker"], "closed");
    assert_eq!(connector.open_connections(), 0);
}

#[actix_web::test]
async fn test_ping_reports_outage() {
    let connector = fixtures::connector();
    connector.set_unavailable(true);

    let (service, _connector, _state) = pastel_bridge::service!(connector);

    let resp = call_service(&service, testing::get("/api/ping").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = read_body_json(resp).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["database"], "disconnected");
    assert_eq!(body["connection_test"], "failed");
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn test_banner() {
    let (service, _connector, _state) = pastel_bridge::service!();

    let resp = call_service(&service, TestRequest::get().uri("/").to_request()).await;
    let body: Value = read_body_json(resp).await;

    assert_eq!(body["message"], "Pastel Bridge API");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
