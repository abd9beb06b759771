use crate::database::Value;
use crate::errors::ApiError;
use crate::query::{ResourceQueryEngine, ResourceRecord, ResourceSchema};

/// The record of `schema` whose full key is `key`
///
/// Fails with 404 when no row matches.
#[::tracing::instrument(skip_all, fields(resource = schema.label()))]
pub async fn show(
    engine: &ResourceQueryEngine,
    schema: &ResourceSchema,
    key: Vec<Value>,
) -> Result<ResourceRecord, ApiError> {
    let display = key
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("/");

    engine.find(schema, key).await?.ok_or_else(|| {
        ::tracing::info!("Record not found");
        ApiError::not_found(schema.label(), &display)
    })
}
