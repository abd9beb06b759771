use actix_web::web::{Data, Json, Path, Query};

use crate::config::PaginationConfig;
use crate::database::Value;
use crate::errors::{ApiError, ErrorResponse};
use crate::pagination::Page;
use crate::query::{ResourceQueryEngine, ResourceRecord};
use crate::requests::v1::inventory_group::InventoryGroupQuery;
use crate::resources::INVENTORY_GROUPS;
use crate::responses::v1::RecordPage;
use crate::services;

/// Paginate inventory groups
#[utoipa::path(
    tag = "Inventory",
    security(("api_key" = [])),
    params(InventoryGroupQuery),
    responses(
        (status = 200, description = "One page of inventory groups", body = RecordPage),
        (status = 400, description = "Malformed cursor or parameter", body = ErrorResponse),
        (status = 401, description = "Invalid API key", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    ),
)]
#[get("/api/inventory-groups")]
pub async fn paginate(
    engine: Data<ResourceQueryEngine>,
    pagination: Data<PaginationConfig>,
    Query(query): Query<InventoryGroupQuery>,
) -> Result<Page<ResourceRecord>, ApiError> {
    services::v1::resource::paginate::paginate(&engine, &pagination, &INVENTORY_GROUPS, &query, Vec::new()).await
}

/// Find inventory group by code
#[utoipa::path(
    tag = "Inventory",
    security(("api_key" = [])),
    params(("inv_group" = String, Path, description = "Group code")),
    responses(
        (status = 200, description = "Inventory group", body = ResourceRecord),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    ),
)]
#[get("/api/inventory-groups/{inv_group}")]
pub async fn show(
    engine: Data<ResourceQueryEngine>,
    inv_group: Path<String>,
) -> Result<Json<ResourceRecord>, ApiError> {
    let key = vec![Value::from(inv_group.into_inner())];
    services::v1::resource::show::show(&engine, &INVENTORY_GROUPS, key).await.map(Json)
}
