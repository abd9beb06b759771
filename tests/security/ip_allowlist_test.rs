use actix_web::http::StatusCode;
use actix_web::test::{call_service, read_body_json};
use pastel_bridge::testing::{self, fixtures};
use serde_json::Value;

fn allowlisted(addresses: &[&str]) -> pastel_bridge::config::AppConfig {
    let mut config = testing::config();
    config.security.allowed_ips = addresses.iter().map(|a| a.to_string()).collect();
    config
}

#[actix_web::test]
async fn test_listed_peer_is_served() {
    let (service, _connector, _state) =
        pastel_bridge::service!(fixtures::connector(), allowlisted(&["10.1.1.10", "10.1.1.11"]));

    let req = testing::get("/api/customers")
        .peer_addr("10.1.1.11:52000".parse().unwrap())
        .to_request();
    assert_eq!(call_service(&service, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_unlisted_peer_is_forbidden_even_with_key() {
    let (service, connector, _state) =
        pastel_bridge::service!(fixtures::connector(), allowlisted(&["10.1.1.10"]));

    let req = testing::get("/api/customers")
        .peer_addr("192.0.2.44:52000".parse().unwrap())
        .to_request();
    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body: Value = read_body_json(resp).await;
    assert_eq!(body["status"], 403);
    assert_eq!(body["detail"], "Access forbidden");
    assert_eq!(connector.connect_attempts(), 0);
}

#[actix_web::test]
async fn test_allowlist_checked_before_api_key() {
    let (service, _connector, _state) =
        pastel_bridge::service!(fixtures::connector(), allowlisted(&["10.1.1.10"]));

    let req = actix_web::test::TestRequest::get()
        .uri("/api/customers")
        .peer_addr("192.0.2.44:52000".parse().unwrap())
        .to_request();
    assert_eq!(call_service(&service, req).await.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_forwarded_for_used_without_peer_address() {
    let (service, _connector, _state) =
        pastel_bridge::service!(fixtures::connector(), allowlisted(&["10.1.1.10"]));

    let req = testing::get("/api/customers")
        .insert_header(("X-Forwarded-For", "10.1.1.10, 172.16.0.1"))
        .to_request();
    assert_eq!(call_service(&service, req).await.status(), StatusCode::OK);
}

#[test]
fn test_invalid_allowlist_entry_rejected() {
    let config = allowlisted(&["10.1.1.10", "not-an-ip"]);
    assert!(config.security.allowed_ips().is_err());
}
