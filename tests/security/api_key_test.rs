use actix_web::http::StatusCode;
use actix_web::test::{call_service, read_body, read_body_json, TestRequest};
use pastel_bridge::testing::{self, TEST_API_KEY};
use serde_json::Value;

const PROTECTED: [&str; 9] = [
    "/api/customers",
    "/api/customers/ACME01",
    "/api/invoices",
    "/api/history-lines",
    "/api/inventory",
    "/api/inventory-categories",
    "/api/inventory-groups",
    "/api/ledger-transactions",
    "/api/delivery-addresses",
];

#[actix_web::test]
async fn test_missing_key_is_unauthorized_everywhere() {
    let (service, connector, _state) = pastel_bridge::service!();

    for uri in PROTECTED {
        let resp = call_service(&service, TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{uri}");

        let body: Value = read_body_json(resp).await;
        assert_eq!(body["status"], 401);
        assert_eq!(body["error"], "unauthorized");
        assert_eq!(body["detail"], "Invalid API key");
    }

    assert_eq!(connector.connect_attempts(), 0);
}

#[actix_web::test]
async fn test_wrong_key_is_unauthorized() {
    let (service, _connector, _state) = pastel_bridge::service!();

    for key in ["", "wrong", "test-api-ke", "test-api-key2", "TEST-API-KEY"] {
        let req = TestRequest::get()
            .uri("/api/customers")
            .insert_header(("X-API-Key", key))
            .to_request();
        let resp = call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "key {key:?}");
    }
}

#[actix_web::test]
async fn test_key_never_echoed() {
    let (service, _connector, _state) = pastel_bridge::service!();

    let req = TestRequest::get()
        .uri("/api/customers")
        .insert_header(("X-API-Key", "guess-that-is-wrong"))
        .to_request();
    let resp = call_service(&service, req).await;

    let body = read_body(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(!text.contains("guess-that-is-wrong"));
    assert!(!text.contains(TEST_API_KEY));
}

#[actix_web::test]
async fn test_correct_key_passes() {
    let (service, _connector, _state) = pastel_bridge::service!();

    for uri in PROTECTED {
        let resp = call_service(&service, testing::get(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
    }
}

#[actix_web::test]
async fn test_exempt_paths_need_no_key() {
    let (service, _connector, _state) = pastel_bridge::service!();

    for uri in ["/", "/health", "/live", "/ready", "/metrics", "/api.json", "/docs/"] {
        let resp = call_service(&service, TestRequest::get().uri(uri).to_request()).await;
        assert_ne!(resp.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}
