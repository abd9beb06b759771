//! Resource endpoints: filters, nested lists and single record lookups

use actix_web::http::StatusCode;
use actix_web::test::{call_and_read_body_json, call_service, read_body_json};
use pastel_bridge::testing;
use serde_json::{json, Value};

fn field(page: &Value, name: &str) -> Vec<Value> {
    page["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record[name].clone())
        .collect()
}

#[actix_web::test]
async fn test_customer_filters() {
    let (service, _connector, _state) = pastel_bridge::service!();

    let page: Value = call_and_read_body_json(&service, testing::get("/api/customers?category=2").to_request()).await;
    assert_eq!(field(&page, "customer_code"), vec![json!("ACME01"), json!("BOLT02")]);

    let page: Value =
        call_and_read_body_json(&service, testing::get("/api/customers?customer_code=BOLT02").to_request()).await;
    assert_eq!(field(&page, "customer_desc"), vec![json!("Bolt & Nut Traders")]);
    assert_eq!(page["data"][0]["open_item"], false);
    assert_eq!(page["data"][0]["balance_this_01"], 310.0);
}

#[actix_web::test]
async fn test_customer_search_matches_code_or_description() {
    let (service, connector, _state) = pastel_bridge::service!();

    let page: Value = call_and_read_body_json(&service, testing::get("/api/customers?search=Hardware").to_request()).await;
    assert_eq!(field(&page, "customer_code"), vec![json!("ACME01")]);

    let page: Value = call_and_read_body_json(&service, testing::get("/api/customers?search=BOLT").to_request()).await;
    assert_eq!(field(&page, "customer_code"), vec![json!("BOLT02")]);

    let statement = connector.last_statement().unwrap();
    assert!(statement.sql.contains("(CustomerCode LIKE ?) OR (CustomerDesc LIKE ?)"));
}

#[actix_web::test]
async fn test_blank_filter_is_ignored() {
    let (service, _connector, _state) = pastel_bridge::service!();

    let page: Value =
        call_and_read_body_json(&service, testing::get("/api/customers?customer_code=").to_request()).await;
    assert_eq!(page["data"].as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn test_customer_show_and_not_found() {
    let (service, _connector, _state) = pastel_bridge::service!();

    let record: Value = call_and_read_body_json(&service, testing::get("/api/customers/ACME01").to_request()).await;
    assert_eq!(record["customer_desc"], "Acme Hardware");
    assert_eq!(record["category"], 2);

    let resp = call_service(&service, testing::get("/api/customers/NOBODY").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = read_body_json(resp).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "not_found");
    assert!(body["detail"].as_str().unwrap().contains("NOBODY"));
}

#[actix_web::test]
async fn test_customer_delivery_addresses() {
    let (service, _connector, _state) = pastel_bridge::service!();

    let page: Value = call_and_read_body_json(
        &service,
        testing::get("/api/customers/ACME01/delivery-addresses").to_request(),
    )
    .await;

    assert_eq!(field(&page, "cust_deliv_code"), vec![json!("MAIN"), json!("YARD")]);
    assert_eq!(page["data"][1]["del_address_01"], "3 Dock Road");
}

#[actix_web::test]
async fn test_invoice_date_range() {
    let (service, _connector, _state) = pastel_bridge::service!();

    let page: Value =
        call_and_read_body_json(&service, testing::get("/api/invoices?from_date=2024-02-01").to_request()).await;
    assert_eq!(field(&page, "document_number"), vec![json!("INV0002"), json!("CRN0001")]);

    let page: Value = call_and_read_body_json(
        &service,
        testing::get("/api/invoices?from=2024-02-01&to=2024-02-10").to_request(),
    )
    .await;
    assert_eq!(field(&page, "document_number"), vec![json!("INV0002")]);
    assert_eq!(page["data"][0]["document_date"], "2024-02-03");
}

#[actix_web::test]
async fn test_invalid_date_is_bad_request() {
    let (service, connector, _state) = pastel_bridge::service!();

    let resp = call_service(&service, testing::get("/api/invoices?from_date=yesterday").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(connector.connect_attempts(), 0);
}

#[actix_web::test]
async fn test_invoice_show_and_lines() {
    let (service, _connector, _state) = pastel_bridge::service!();

    let invoice: Value = call_and_read_body_json(&service, testing::get("/api/invoices/3/INV0001").to_request()).await;
    assert_eq!(invoice["customer_code"], "ACME01");

    let lines: Value =
        call_and_read_body_json(&service, testing::get("/api/invoices/3/INV0001/lines?limit=2").to_request()).await;
    assert_eq!(field(&lines, "link_num"), vec![json!(1), json!(2)]);
    assert_eq!(lines["metadata"]["has_more"], true);

    let cursor = lines["metadata"]["next_cursor"].as_str().unwrap();
    let rest: Value = call_and_read_body_json(
        &service,
        testing::get(&format!("/api/invoices/3/INV0001/lines?limit=2&cursor={cursor}")).to_request(),
    )
    .await;
    assert_eq!(field(&rest, "link_num"), vec![json!(3)]);
    assert_eq!(rest["metadata"]["has_more"], false);

    let resp = call_service(&service, testing::get("/api/invoices/4/INV0001").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_history_line_filters_and_show() {
    let (service, _connector, _state) = pastel_bridge::service!();

    let page: Value =
        call_and_read_body_json(&service, testing::get("/api/history-lines?item_code=HAMMER").to_request()).await;
    assert_eq!(field(&page, "link_num"), vec![json!(1), json!(3)]);

    let line: Value =
        call_and_read_body_json(&service, testing::get("/api/history-lines/3/INV0001/2").to_request()).await;
    assert_eq!(line["item_code"], "NAILS100");
    assert_eq!(line["description"], "Line 2 of INV0001");
}

#[actix_web::test]
async fn test_non_numeric_path_key_is_bad_request() {
    let (service, _connector, _state) = pastel_bridge::service!();

    let resp = call_service(&service, testing::get("/api/ledger-transactions/abc").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = read_body_json(resp).await;
    assert_eq!(body["error"], "bad_request");
}

#[actix_web::test]
async fn test_inventory_filters() {
    let (service, _connector, _state) = pastel_bridge::service!();

    let page: Value =
        call_and_read_body_json(&service, testing::get("/api/inventory?category=FAST").to_request()).await;
    assert_eq!(field(&page, "item_code"), vec![json!("BOLTM8"), json!("NAILS100")]);

    let page: Value = call_and_read_body_json(&service, testing::get("/api/inventory?blocked=1").to_request()).await;
    assert_eq!(field(&page, "item_code"), vec![json!("SERVICE")]);

    let item: Value = call_and_read_body_json(&service, testing::get("/api/inventory/HAMMER").to_request()).await;
    assert_eq!(item["category"], "TOOL");
}

#[actix_web::test]
async fn test_inventory_categories_and_groups() {
    let (service, _connector, _state) = pastel_bridge::service!();

    let categories: Value =
        call_and_read_body_json(&service, testing::get("/api/inventory-categories").to_request()).await;
    assert_eq!(field(&categories, "ic_code"), vec![json!("FAST"), json!("SERV"), json!("TOOL")]);

    let category: Value =
        call_and_read_body_json(&service, testing::get("/api/inventory-categories/TOOL").to_request()).await;
    assert_eq!(category["ic_desc"], "Hand tools");

    let groups: Value =
        call_and_read_body_json(&service, testing::get("/api/inventory-groups?inv_group=SV").to_request()).await;
    assert_eq!(field(&groups, "description"), vec![json!("Services")]);

    let group: Value = call_and_read_body_json(&service, testing::get("/api/inventory-groups/HW").to_request()).await;
    assert_eq!(group["sales_tax_type"], 1);
}

#[actix_web::test]
async fn test_ledger_filters() {
    let (service, _connector, _state) = pastel_bridge::service!();

    let page: Value =
        call_and_read_body_json(&service, testing::get("/api/ledger-transactions?description=Invoice").to_request())
            .await;
    assert_eq!(field(&page, "auto_number"), vec![json!(101), json!(103)]);

    let page: Value =
        call_and_read_body_json(&service, testing::get("/api/ledger-transactions?min_amount=200").to_request()).await;
    assert_eq!(field(&page, "auto_number"), vec![json!(101), json!(102)]);

    let page: Value = call_and_read_body_json(
        &service,
        testing::get("/api/ledger-transactions?gdc=D&p_period=2").to_request(),
    )
    .await;
    assert_eq!(field(&page, "auto_number"), vec![json!(103)]);
}

#[actix_web::test]
async fn test_ledger_placeholders_read_as_zero() {
    let (service, _connector, _state) = pastel_bridge::service!();

    let page: Value = call_and_read_body_json(&service, testing::get("/api/ledger-transactions").to_request()).await;
    assert_eq!(field(&page, "user_id"), vec![json!(0), json!(0), json!(4)]);

    let record: Value =
        call_and_read_body_json(&service, testing::get("/api/ledger-transactions/102").to_request()).await;
    assert_eq!(record["refrence"], "RCP0001");
    assert_eq!(record["d_date"], "2024-02-03");
}

#[actix_web::test]
async fn test_delivery_address_lookup() {
    let (service, _connector, _state) = pastel_bridge::service!();

    let page: Value = call_and_read_body_json(
        &service,
        testing::get("/api/delivery-addresses?cust_deliv_code=MAIN").to_request(),
    )
    .await;
    assert_eq!(field(&page, "customer_code"), vec![json!("ACME01"), json!("BOLT02")]);

    let address: Value =
        call_and_read_body_json(&service, testing::get("/api/delivery-addresses/BOLT02/MAIN").to_request()).await;
    assert_eq!(address["contact"], "Anna Smit");
}
