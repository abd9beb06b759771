//! Caller input reaches the database only as bound parameters

use actix_web::http::StatusCode;
use actix_web::test::{call_and_read_body_json, call_service};
use pastel_bridge::database::Value as DbValue;
use pastel_bridge::pagination::cursor;
use pastel_bridge::testing;
use serde_json::Value;

const INJECTION: &str = "ACME01' OR '1'='1";
const INJECTION_ENCODED: &str = "ACME01%27%20OR%20%271%27%3D%271";

#[actix_web::test]
async fn test_filter_value_is_bound_not_inlined() {
    let (service, connector, _state) = pastel_bridge::service!();

    let uri = format!("/api/customers?customer_code={INJECTION_ENCODED}");
    let page: Value = call_and_read_body_json(&service, testing::get(&uri).to_request()).await;

    assert!(page["data"].as_array().unwrap().is_empty());

    let statement = connector.last_statement().unwrap();
    assert!(!statement.sql.contains("OR '1'"));
    assert!(statement.values.contains(&DbValue::from(INJECTION)));
}

#[actix_web::test]
async fn test_like_filter_is_bound() {
    let (service, connector, _state) = pastel_bridge::service!();

    let uri = "/api/ledger-transactions?description=%25%27%3B%20DROP%20TABLE%20LedgerTransactions%3B%20--";
    let resp = call_service(&service, testing::get(uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let statement = connector.last_statement().unwrap();
    assert!(!statement.sql.contains("DROP"));
    assert!(statement.sql.contains("Description LIKE ?"));
}

#[actix_web::test]
async fn test_path_key_is_bound() {
    let (service, connector, _state) = pastel_bridge::service!();

    let uri = format!("/api/customers/{INJECTION_ENCODED}");
    let resp = call_service(&service, testing::get(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let statement = connector.last_statement().unwrap();
    assert!(!statement.sql.contains('\''));
    assert!(statement.values.contains(&DbValue::from(INJECTION)));
}

#[actix_web::test]
async fn test_cursor_contents_are_bound() {
    let (service, connector, _state) = pastel_bridge::service!();

    let crafted = cursor::encode(&[DbValue::from("A'; DELETE FROM CustomerMaster; --")]);
    let uri = format!("/api/customers?cursor={crafted}");
    let page: Value = call_and_read_body_json(&service, testing::get(&uri).to_request()).await;

    // Every fixture code sorts after "A'..."
    assert_eq!(page["data"].as_array().unwrap().len(), 3);

    let statement = connector.last_statement().unwrap();
    assert!(!statement.sql.contains("DELETE"));
}
