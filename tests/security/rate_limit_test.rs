use std::time::{Duration, Instant};

use actix_web::http::header::RETRY_AFTER;
use actix_web::http::StatusCode;
use actix_web::test::{call_service, read_body_json};
use pastel_bridge::config::RateLimitConfig;
use pastel_bridge::testing::{self, fixtures};
use serde_json::Value;

fn limited(requests_per_minute: u32, burst: Option<u32>, min_request_interval_ms: u64) -> pastel_bridge::config::AppConfig {
    let mut config = testing::config();
    config.security.rate_limit = RateLimitConfig {
        enabled: true,
        requests_per_minute,
        burst,
        min_request_interval_ms,
    };
    config
}

#[actix_web::test]
async fn test_burst_exhaustion_returns_429() {
    let (service, connector, _state) = pastel_bridge::service!(fixtures::connector(), limited(60, Some(3), 0));

    for _ in 0..3 {
        let resp = call_service(&service, testing::get("/api/inventory").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = call_service(&service, testing::get("/api/inventory").to_request()).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(resp.headers().contains_key(RETRY_AFTER));

    let body: Value = read_body_json(resp).await;
    assert_eq!(body["status"], 429);
    assert_eq!(body["error"], "too_many_requests");

    // The rejected request never reached the pool
    assert_eq!(connector.connect_attempts(), 3);
}

#[actix_web::test]
async fn test_limits_are_per_client() {
    let (service, _connector, _state) = pastel_bridge::service!(fixtures::connector(), limited(60, Some(1), 0));

    let first = testing::get("/api/inventory").peer_addr("10.0.0.1:1000".parse().unwrap());
    assert_eq!(call_service(&service, first.to_request()).await.status(), StatusCode::OK);

    let again = testing::get("/api/inventory").peer_addr("10.0.0.1:1001".parse().unwrap());
    assert_eq!(
        call_service(&service, again.to_request()).await.status(),
        StatusCode::TOO_MANY_REQUESTS
    );

    let other = testing::get("/api/inventory").peer_addr("10.0.0.2:1000".parse().unwrap());
    assert_eq!(call_service(&service, other.to_request()).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_disabled_limit_never_rejects() {
    let mut config = limited(1, Some(1), 0);
    config.security.rate_limit.enabled = false;

    let (service, _connector, _state) = pastel_bridge::service!(fixtures::connector(), config);

    for _ in 0..10 {
        let resp = call_service(&service, testing::get("/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

#[actix_web::test]
async fn test_min_interval_delays_instead_of_rejecting() {
    let (service, _connector, _state) = pastel_bridge::service!(fixtures::connector(), limited(600, None, 100));

    let started = Instant::now();
    for _ in 0..3 {
        let resp = call_service(&service, testing::get("/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    assert!(started.elapsed() >= Duration::from_millis(180));
}
