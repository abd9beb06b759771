use crate::config::PaginationConfig;
use crate::errors::ApiError;
use crate::pagination::Page;
use crate::query::{Filter, PageRequest, ResourceQueryEngine, ResourceRecord, ResourceSchema};
use crate::requests::v1::ListQuery;

/// One page of `schema`
///
/// `scope` holds filters fixed by the route, such as the parent keys of a
/// nested list; they are applied before the query string filters.
#[::tracing::instrument(skip_all, fields(resource = schema.label()))]
pub async fn paginate<Q: ListQuery>(
    engine: &ResourceQueryEngine,
    pagination: &PaginationConfig,
    schema: &ResourceSchema,
    query: &Q,
    scope: Vec<Filter>,
) -> Result<Page<ResourceRecord>, ApiError> {
    let limit = pagination.resolve(query.limit());

    let mut filters = scope;
    filters.extend(query.filters());

    let request = PageRequest {
        limit,
        cursor: query.cursor().map(str::to_string),
        filters,
    };

    let page = engine.paginate(schema, request).await?;

    ::tracing::info!(records = page.len(), has_more = page.has_more(), "Page served");

    Ok(page)
}
