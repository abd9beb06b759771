use actix_web::web::{Data, Json, Path, Query};

use crate::config::PaginationConfig;
use crate::database::Value;
use crate::errors::{ApiError, ErrorResponse};
use crate::pagination::Page;
use crate::query::{ResourceQueryEngine, ResourceRecord};
use crate::requests::v1::ledger_transaction::LedgerTransactionQuery;
use crate::resources::LEDGER_TRANSACTIONS;
use crate::responses::v1::RecordPage;
use crate::services;

/// Paginate ledger transactions
///
/// Ordered by auto number, which follows posting order.
#[utoipa::path(
    tag = "Ledger",
    security(("api_key" = [])),
    params(LedgerTransactionQuery),
    responses(
        (status = 200, description = "One page of ledger transactions", body = RecordPage),
        (status = 400, description = "Malformed cursor or parameter", body = ErrorResponse),
        (status = 401, description = "Invalid API key", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    ),
)]
#[get("/api/ledger-transactions")]
pub async fn paginate(
    engine: Data<ResourceQueryEngine>,
    pagination: Data<PaginationConfig>,
    Query(query): Query<LedgerTransactionQuery>,
) -> Result<Page<ResourceRecord>, ApiError> {
    services::v1::resource::paginate::paginate(&engine, &pagination, &LEDGER_TRANSACTIONS, &query, Vec::new())
        .await
}

/// Find ledger transaction by auto number
#[utoipa::path(
    tag = "Ledger",
    security(("api_key" = [])),
    params(("auto_number" = i64, Path, description = "Transaction auto number")),
    responses(
        (status = 200, description = "Ledger transaction", body = ResourceRecord),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    ),
)]
#[get("/api/ledger-transactions/{auto_number}")]
pub async fn show(
    engine: Data<ResourceQueryEngine>,
    auto_number: Path<i64>,
) -> Result<Json<ResourceRecord>, ApiError> {
    let key = vec![Value::Int(auto_number.into_inner())];
    services::v1::resource::show::show(&engine, &LEDGER_TRANSACTIONS, key).await.map(Json)
}
