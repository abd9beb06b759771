use actix_web::web::{Data, Json, Path, Query};

use crate::config::PaginationConfig;
use crate::database::Value;
use crate::errors::{ApiError, ErrorResponse};
use crate::pagination::Page;
use crate::query::{Filter, ResourceQueryEngine, ResourceRecord};
use crate::requests::v1::invoice::InvoiceQuery;
use crate::requests::v1::PageQuery;
use crate::resources::{HISTORY_LINES, INVOICES};
use crate::responses::v1::RecordPage;
use crate::services;

/// Paginate invoices
///
/// Ordered by document type then document number.
#[utoipa::path(
    tag = "Invoices",
    security(("api_key" = [])),
    params(InvoiceQuery),
    responses(
        (status = 200, description = "One page of invoices", body = RecordPage),
        (status = 400, description = "Malformed cursor or parameter", body = ErrorResponse),
        (status = 401, description = "Invalid API key", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    ),
)]
#[get("/api/invoices")]
pub async fn paginate(
    engine: Data<ResourceQueryEngine>,
    pagination: Data<PaginationConfig>,
    Query(query): Query<InvoiceQuery>,
) -> Result<Page<ResourceRecord>, ApiError> {
    services::v1::resource::paginate::paginate(&engine, &pagination, &INVOICES, &query, Vec::new()).await
}

/// Find invoice by document type and number
#[utoipa::path(
    tag = "Invoices",
    security(("api_key" = [])),
    params(
        ("document_type" = i64, Path, description = "Document type"),
        ("document_number" = String, Path, description = "Document number"),
    ),
    responses(
        (status = 200, description = "Invoice header", body = ResourceRecord),
        (status = 404, description = "Invoice not found", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    ),
)]
#[get("/api/invoices/{document_type}/{document_number}")]
pub async fn show(
    engine: Data<ResourceQueryEngine>,
    path: Path<(i64, String)>,
) -> Result<Json<ResourceRecord>, ApiError> {
    let (document_type, document_number) = path.into_inner();
    let key = vec![Value::Int(document_type), Value::from(document_number)];

    services::v1::resource::show::show(&engine, &INVOICES, key).await.map(Json)
}

/// Paginate the lines of one invoice
#[utoipa::path(
    tag = "Invoices",
    security(("api_key" = [])),
    params(
        ("document_type" = i64, Path, description = "Document type"),
        ("document_number" = String, Path, description = "Document number"),
        PageQuery,
    ),
    responses(
        (status = 200, description = "One page of history lines", body = RecordPage),
        (status = 400, description = "Malformed cursor or parameter", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    ),
)]
#[get("/api/invoices/{document_type}/{document_number}/lines")]
pub async fn lines(
    engine: Data<ResourceQueryEngine>,
    pagination: Data<PaginationConfig>,
    path: Path<(i64, String)>,
    Query(query): Query<PageQuery>,
) -> Result<Page<ResourceRecord>, ApiError> {
    let (document_type, document_number) = path.into_inner();
    let scope = vec![
        Filter::eq("DocumentType", document_type),
        Filter::eq("DocumentNumber", document_number),
    ];

    services::v1::resource::paginate::paginate(&engine, &pagination, &HISTORY_LINES, &query, scope).await
}
