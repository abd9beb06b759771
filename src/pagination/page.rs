use actix_web::body::BoxBody;
use actix_web::{HttpRequest, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Paging information returned alongside every page
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PaginationMetadata {
    /// Effective page size after clamping
    #[schema(example = 50)]
    pub page_size: u64,
    /// Never computed, counting a legacy table costs a full scan
    pub total_records: Option<u64>,
    /// Cursor this page was requested with
    pub cursor: Option<String>,
    /// Cursor for the following page, present iff `has_more`
    pub next_cursor: Option<String>,
    pub has_more: bool,
    /// UTC time the page was produced
    pub timestamp: DateTime<Utc>,
}

/// One page of records
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub metadata: PaginationMetadata,
}

impl<T> Page<T> {
    pub fn new(
        data: Vec<T>,
        page_size: u64,
        cursor: Option<String>,
        next_cursor: Option<String>,
    ) -> Self {
        let has_more = next_cursor.is_some();

        Self {
            data,
            metadata: PaginationMetadata {
                page_size,
                total_records: None,
                cursor,
                next_cursor,
                has_more,
                timestamp: Utc::now(),
            },
        }
    }

    pub fn has_more(&self) -> bool {
        self.metadata.has_more
    }

    pub fn next_cursor(&self) -> Option<&str> {
        self.metadata.next_cursor.as_deref()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T: Serialize> Responder for Page<T> {
    type Body = BoxBody;

    fn respond_to(self, _: &HttpRequest) -> HttpResponse<Self::Body> {
        HttpResponse::Ok().json(self)
    }
}
