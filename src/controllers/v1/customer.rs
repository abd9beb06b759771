use actix_web::web::{Data, Json, Path, Query};

use crate::config::PaginationConfig;
use crate::database::Value;
use crate::errors::{ApiError, ErrorResponse};
use crate::pagination::Page;
use crate::query::{Filter, ResourceQueryEngine, ResourceRecord};
use crate::requests::v1::customer::CustomerQuery;
use crate::requests::v1::PageQuery;
use crate::resources::{CUSTOMERS, DELIVERY_ADDRESSES};
use crate::responses::v1::RecordPage;
use crate::services;

/// Paginate customers
///
/// Ordered by customer code.
#[utoipa::path(
    tag = "Customers",
    security(("api_key" = [])),
    params(CustomerQuery),
    responses(
        (status = 200, description = "One page of customers", body = RecordPage),
        (status = 400, description = "Malformed cursor or parameter", body = ErrorResponse),
        (status = 401, description = "Invalid API key", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    ),
)]
#[get("/api/customers")]
pub async fn paginate(
    engine: Data<ResourceQueryEngine>,
    pagination: Data<PaginationConfig>,
    Query(query): Query<CustomerQuery>,
) -> Result<Page<ResourceRecord>, ApiError> {
    services::v1::resource::paginate::paginate(&engine, &pagination, &CUSTOMERS, &query, Vec::new()).await
}

/// Find customer by code
#[utoipa::path(
    tag = "Customers",
    security(("api_key" = [])),
    params(("customer_code" = String, Path, description = "Customer code")),
    responses(
        (status = 200, description = "Customer", body = ResourceRecord),
        (status = 404, description = "Customer not found", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    ),
)]
#[get("/api/customers/{customer_code}")]
pub async fn show(
    engine: Data<ResourceQueryEngine>,
    customer_code: Path<String>,
) -> Result<Json<ResourceRecord>, ApiError> {
    let key = vec![Value::from(customer_code.into_inner())];
    services::v1::resource::show::show(&engine, &CUSTOMERS, key).await.map(Json)
}

/// Paginate the delivery addresses of one customer
#[utoipa::path(
    tag = "Customers",
    security(("api_key" = [])),
    params(("customer_code" = String, Path, description = "Customer code"), PageQuery),
    responses(
        (status = 200, description = "One page of delivery addresses", body = RecordPage),
        (status = 400, description = "Malformed cursor or parameter", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    ),
)]
#[get("/api/customers/{customer_code}/delivery-addresses")]
pub async fn delivery_addresses(
    engine: Data<ResourceQueryEngine>,
    pagination: Data<PaginationConfig>,
    customer_code: Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Page<ResourceRecord>, ApiError> {
    let scope = vec![Filter::eq("CustomerCode", customer_code.into_inner())];
    services::v1::resource::paginate::paginate(&engine, &pagination, &DELIVERY_ADDRESSES, &query, scope).await
}
