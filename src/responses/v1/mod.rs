//! Response documentation types
//!
//! Records are built dynamically from resource schemas, so these types
//! exist for the OpenAPI document; the handlers return
//! `Page<ResourceRecord>` and `ResourceRecord` directly.

use serde::Serialize;
use utoipa::ToSchema;

use crate::pagination::PaginationMetadata;
use crate::query::ResourceRecord;

/// One page of records with snake_case field names
#[derive(Debug, Serialize, ToSchema)]
pub struct RecordPage {
    pub data: Vec<ResourceRecord>,
    pub metadata: PaginationMetadata,
}
