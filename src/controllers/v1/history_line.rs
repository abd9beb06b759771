use actix_web::web::{Data, Json, Path, Query};

use crate::config::PaginationConfig;
use crate::database::Value;
use crate::errors::{ApiError, ErrorResponse};
use crate::pagination::Page;
use crate::query::{ResourceQueryEngine, ResourceRecord};
use crate::requests::v1::history_line::HistoryLineQuery;
use crate::resources::HISTORY_LINES;
use crate::responses::v1::RecordPage;
use crate::services;

/// Paginate history lines
///
/// Ordered by document type, document number then line number.
#[utoipa::path(
    tag = "History Lines",
    security(("api_key" = [])),
    params(HistoryLineQuery),
    responses(
        (status = 200, description = "One page of history lines", body = RecordPage),
        (status = 400, description = "Malformed cursor or parameter", body = ErrorResponse),
        (status = 401, description = "Invalid API key", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    ),
)]
#[get("/api/history-lines")]
pub async fn paginate(
    engine: Data<ResourceQueryEngine>,
    pagination: Data<PaginationConfig>,
    Query(query): Query<HistoryLineQuery>,
) -> Result<Page<ResourceRecord>, ApiError> {
    services::v1::resource::paginate::paginate(&engine, &pagination, &HISTORY_LINES, &query, Vec::new()).await
}

/// Find one history line
#[utoipa::path(
    tag = "History Lines",
    security(("api_key" = [])),
    params(
        ("document_type" = i64, Path, description = "Document type"),
        ("document_number" = String, Path, description = "Document number"),
        ("link_num" = i64, Path, description = "Line number within the document"),
    ),
    responses(
        (status = 200, description = "History line", body = ResourceRecord),
        (status = 404, description = "History line not found", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    ),
)]
#[get("/api/history-lines/{document_type}/{document_number}/{link_num}")]
pub async fn show(
    engine: Data<ResourceQueryEngine>,
    path: Path<(i64, String, i64)>,
) -> Result<Json<ResourceRecord>, ApiError> {
    let (document_type, document_number, link_num) = path.into_inner();
    let key = vec![
        Value::Int(document_type),
        Value::from(document_number),
        Value::Int(link_num),
    ];

    services::v1::resource::show::show(&engine, &HISTORY_LINES, key).await.map(Json)
}
