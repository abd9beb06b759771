use actix_web::web::{Data, Json, Path, Query};

use crate::config::PaginationConfig;
use crate::database::Value;
use crate::errors::{ApiError, ErrorResponse};
use crate::pagination::Page;
use crate::query::{ResourceQueryEngine, ResourceRecord};
use crate::requests::v1::inventory_category::InventoryCategoryQuery;
use crate::resources::INVENTORY_CATEGORIES;
use crate::responses::v1::RecordPage;
use crate::services;

/// Paginate inventory categories
#[utoipa::path(
    tag = "Inventory",
    security(("api_key" = [])),
    params(InventoryCategoryQuery),
    responses(
        (status = 200, description = "One page of inventory categories", body = RecordPage),
        (status = 400, description = "Malformed cursor or parameter", body = ErrorResponse),
        (status = 401, description = "Invalid API key", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    ),
)]
#[get("/api/inventory-categories")]
pub async fn paginate(
    engine: Data<ResourceQueryEngine>,
    pagination: Data<PaginationConfig>,
    Query(query): Query<InventoryCategoryQuery>,
) -> Result<Page<ResourceRecord>, ApiError> {
    services::v1::resource::paginate::paginate(&engine, &pagination, &INVENTORY_CATEGORIES, &query, Vec::new())
        .await
}

/// Find inventory category by code
#[utoipa::path(
    tag = "Inventory",
    security(("api_key" = [])),
    params(("ic_code" = String, Path, description = "Category code")),
    responses(
        (status = 200, description = "Inventory category", body = ResourceRecord),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    ),
)]
#[get("/api/inventory-categories/{ic_code}")]
pub async fn show(
    engine: Data<ResourceQueryEngine>,
    ic_code: Path<String>,
) -> Result<Json<ResourceRecord>, ApiError> {
    let key = vec![Value::from(ic_code.into_inner())];
    services::v1::resource::show::show(&engine, &INVENTORY_CATEGORIES, key).await.map(Json)
}
