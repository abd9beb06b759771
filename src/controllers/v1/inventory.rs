use actix_web::web::{Data, Json, Path, Query};

use crate::config::PaginationConfig;
use crate::database::Value;
use crate::errors::{ApiError, ErrorResponse};
use crate::pagination::Page;
use crate::query::{ResourceQueryEngine, ResourceRecord};
use crate::requests::v1::inventory::InventoryQuery;
use crate::resources::INVENTORY;
use crate::responses::v1::RecordPage;
use crate::services;

/// Paginate inventory items
#[utoipa::path(
    tag = "Inventory",
    security(("api_key" = [])),
    params(InventoryQuery),
    responses(
        (status = 200, description = "One page of inventory items", body = RecordPage),
        (status = 400, description = "Malformed cursor or parameter", body = ErrorResponse),
        (status = 401, description = "Invalid API key", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    ),
)]
#[get("/api/inventory")]
pub async fn paginate(
    engine: Data<ResourceQueryEngine>,
    pagination: Data<PaginationConfig>,
    Query(query): Query<InventoryQuery>,
) -> Result<Page<ResourceRecord>, ApiError> {
    services::v1::resource::paginate::paginate(&engine, &pagination, &INVENTORY, &query, Vec::new()).await
}

/// Find inventory item by code
#[utoipa::path(
    tag = "Inventory",
    security(("api_key" = [])),
    params(("item_code" = String, Path, description = "Item code")),
    responses(
        (status = 200, description = "Inventory item", body = ResourceRecord),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    ),
)]
#[get("/api/inventory/{item_code}")]
pub async fn show(
    engine: Data<ResourceQueryEngine>,
    item_code: Path<String>,
) -> Result<Json<ResourceRecord>, ApiError> {
    let key = vec![Value::from(item_code.into_inner())];
    services::v1::resource::show::show(&engine, &INVENTORY, key).await.map(Json)
}
