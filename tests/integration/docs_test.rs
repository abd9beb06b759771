//! Documentation, metrics and cross-cutting response headers

use actix_web::http::StatusCode;
use actix_web::test::{call_service, read_body, read_body_json, TestRequest};
use pastel_bridge::testing;
use serde_json::Value;

#[actix_web::test]
async fn test_openapi_document_is_public() {
    let (service, _connector, _state) = pastel_bridge::service!();

    let resp = call_service(&service, TestRequest::get().uri("/api.json").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let document: Value = read_body_json(resp).await;
    assert_eq!(document["info"]["title"], "Pastel Bridge API");
    assert!(document["paths"]["/api/ledger-transactions"].is_object());
}

#[actix_web::test]
async fn test_docs_redirect_and_ui() {
    let (service, _connector, _state) = pastel_bridge::service!();

    let resp = call_service(&service, TestRequest::get().uri("/docs").to_request()).await;
    assert!(resp.status().is_redirection());

    let resp = call_service(&service, TestRequest::get().uri("/docs/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_docs_can_be_disabled() {
    let mut config = testing::config();
    config.api.swagger_enabled = false;

    let (service, _connector, _state) =
        pastel_bridge::service!(pastel_bridge::testing::fixtures::connector(), config);

    let resp = call_service(&service, TestRequest::get().uri("/api.json").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_metrics_are_public_and_record_traffic() {
    let (service, _connector, _state) = pastel_bridge::service!();

    let resp = call_service(&service, testing::get("/api/customers").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = call_service(&service, TestRequest::get().uri("/metrics").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = read_body(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("http_requests_total"));
    assert!(text.contains("db_queries_total"));
    assert!(text.contains("db_pool_acquire_total"));
}

#[actix_web::test]
async fn test_every_response_carries_process_time() {
    let (service, _connector, _state) = pastel_bridge::service!();

    for request in [
        TestRequest::get().uri("/health").to_request(),
        testing::get("/api/customers").to_request(),
        TestRequest::get().uri("/api/customers").to_request(),
    ] {
        let resp = call_service(&service, request).await;
        assert!(resp.headers().contains_key("x-process-time"));
    }
}

#[actix_web::test]
async fn test_cors_preflight() {
    let (service, _connector, _state) = pastel_bridge::service!();

    let req = TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/api/customers")
        .insert_header(("Origin", "https://reports.example.com"))
        .insert_header(("Access-Control-Request-Method", "GET"))
        .to_request();

    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("access-control-allow-origin"));
}
