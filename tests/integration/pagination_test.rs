//! Cursor pagination through the HTTP surface

use actix_web::http::StatusCode;
use actix_web::test::{call_and_read_body_json, call_service, read_body_json};
use pastel_bridge::testing::{self, fixtures, FakeConnector};
use serde_json::Value;

fn codes(page: &Value, field: &str) -> Vec<String> {
    page["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record[field].as_str().unwrap().to_string())
        .collect()
}

#[actix_web::test]
async fn test_walk_customers_page_by_page() {
    let (service, _connector, _state) = pastel_bridge::service!();

    let first: Value = call_and_read_body_json(&service, testing::get("/api/customers?limit=2").to_request()).await;

    assert_eq!(codes(&first, "customer_code"), vec!["ACME01", "BOLT02"]);
    assert_eq!(first["metadata"]["page_size"], 2);
    assert_eq!(first["metadata"]["has_more"], true);
    assert!(first["metadata"]["total_records"].is_null());
    assert!(first["metadata"]["cursor"].is_null());

    let cursor = first["metadata"]["next_cursor"].as_str().unwrap().to_string();
    let uri = format!("/api/customers?limit=2&cursor={cursor}");
    let second: Value = call_and_read_body_json(&service, testing::get(&uri).to_request()).await;

    // The body is trimmed, "CASH   " comes back as "CASH"
    assert_eq!(codes(&second, "customer_code"), vec!["CASH"]);
    assert_eq!(second["metadata"]["has_more"], false);
    assert!(second["metadata"]["next_cursor"].is_null());
    assert_eq!(second["metadata"]["cursor"], cursor.as_str());
}

#[actix_web::test]
async fn test_composite_key_walk_visits_every_line_once() {
    let (service, _connector, _state) = pastel_bridge::service!();

    let mut seen = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let uri = match &cursor {
            Some(cursor) => format!("/api/history-lines?limit=1&cursor={cursor}"),
            None => "/api/history-lines?limit=1".to_string(),
        };
        let page: Value = call_and_read_body_json(&service, testing::get(&uri).to_request()).await;

        for record in page["data"].as_array().unwrap() {
            seen.push(format!(
                "{}/{}/{}",
                record["document_type"], record["document_number"].as_str().unwrap(), record["link_num"]
            ));
        }

        match page["metadata"]["next_cursor"].as_str() {
            Some(next) => cursor = Some(next.to_string()),
            None => break,
        }
    }

    assert_eq!(
        seen,
        vec!["3/INV0001/1", "3/INV0001/2", "3/INV0001/3", "3/INV0002/1"]
    );
}

#[actix_web::test]
async fn test_limit_defaults_and_clamps() {
    let (service, _connector, _state) = pastel_bridge::service!();

    let default: Value = call_and_read_body_json(&service, testing::get("/api/inventory").to_request()).await;
    assert_eq!(default["metadata"]["page_size"], 50);
    assert_eq!(default["data"].as_array().unwrap().len(), 4);

    let zero: Value = call_and_read_body_json(&service, testing::get("/api/inventory?limit=0").to_request()).await;
    assert_eq!(zero["metadata"]["page_size"], 50);

    let huge: Value = call_and_read_body_json(&service, testing::get("/api/inventory?limit=5000").to_request()).await;
    assert_eq!(huge["metadata"]["page_size"], 1000);
}

#[actix_web::test]
async fn test_malformed_cursor_is_bad_request_without_database_access() {
    let (service, connector, _state) = pastel_bridge::service!();

    let resp = call_service(&service, testing::get("/api/customers?cursor=not-a-cursor!").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = read_body_json(resp).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "bad_request");
    assert_eq!(connector.connect_attempts(), 0);
}

#[actix_web::test]
async fn test_non_numeric_limit_is_bad_request() {
    let (service, _connector, _state) = pastel_bridge::service!();

    let resp = call_service(&service, testing::get("/api/customers?limit=lots").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = read_body_json(resp).await;
    assert_eq!(body["error"], "bad_request");
}

#[actix_web::test]
async fn test_empty_table_returns_empty_last_page() {
    let connector = FakeConnector::new();
    fixtures::seed(&connector, &pastel_bridge::resources::INVENTORY_GROUPS, Vec::new());

    let (service, _connector, _state) = pastel_bridge::service!(connector);

    let page: Value = call_and_read_body_json(&service, testing::get("/api/inventory-groups").to_request()).await;
    assert!(page["data"].as_array().unwrap().is_empty());
    assert_eq!(page["metadata"]["has_more"], false);
    assert!(page["metadata"]["next_cursor"].is_null());
}

#[actix_web::test]
async fn test_every_connection_is_closed_after_paging() {
    let (service, connector, state) = pastel_bridge::service!();

    for uri in ["/api/customers", "/api/invoices", "/api/ledger-transactions", "/api/delivery-addresses"] {
        let resp = call_service(&service, testing::get(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
    }

    assert_eq!(connector.open_connections(), 0);
    assert_eq!(connector.closed_connections(), 4);
    assert_eq!(state.pool.available_slots(), state.pool.max_connections());
}
