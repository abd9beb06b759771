use actix_web::web::{Data, Json, Path, Query};

use crate::config::PaginationConfig;
use crate::database::Value;
use crate::errors::{ApiError, ErrorResponse};
use crate::pagination::Page;
use crate::query::{ResourceQueryEngine, ResourceRecord};
use crate::requests::v1::delivery_address::DeliveryAddressQuery;
use crate::resources::DELIVERY_ADDRESSES;
use crate::responses::v1::RecordPage;
use crate::services;

/// Paginate delivery addresses
#[utoipa::path(
    tag = "Delivery Addresses",
    security(("api_key" = [])),
    params(DeliveryAddressQuery),
    responses(
        (status = 200, description = "One page of delivery addresses", body = RecordPage),
        (status = 400, description = "Malformed cursor or parameter", body = ErrorResponse),
        (status = 401, description = "Invalid API key", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    ),
)]
#[get("/api/delivery-addresses")]
pub async fn paginate(
    engine: Data<ResourceQueryEngine>,
    pagination: Data<PaginationConfig>,
    Query(query): Query<DeliveryAddressQuery>,
) -> Result<Page<ResourceRecord>, ApiError> {
    services::v1::resource::paginate::paginate(&engine, &pagination, &DELIVERY_ADDRESSES, &query, Vec::new())
        .await
}

/// Find one delivery address
#[utoipa::path(
    tag = "Delivery Addresses",
    security(("api_key" = [])),
    params(
        ("customer_code" = String, Path, description = "Customer code"),
        ("cust_deliv_code" = String, Path, description = "Delivery address code"),
    ),
    responses(
        (status = 200, description = "Delivery address", body = ResourceRecord),
        (status = 404, description = "Delivery address not found", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    ),
)]
#[get("/api/delivery-addresses/{customer_code}/{cust_deliv_code}")]
pub async fn show(
    engine: Data<ResourceQueryEngine>,
    path: Path<(String, String)>,
) -> Result<Json<ResourceRecord>, ApiError> {
    let (customer_code, cust_deliv_code) = path.into_inner();
    let key = vec![Value::from(customer_code), Value::from(cust_deliv_code)];

    services::v1::resource::show::show(&engine, &DELIVERY_ADDRESSES, key).await.map(Json)
}
