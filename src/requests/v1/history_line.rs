use serde::Deserialize;
use utoipa::IntoParams;

use super::{list_query, present, push_eq};
use crate::query::Filter;

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryLineQuery {
    /// `next_cursor` of the previous page
    pub cursor: Option<String>,
    /// Page size, defaults to the configured page size and is capped at the maximum
    #[param(minimum = 1)]
    pub limit: Option<u64>,
    pub document_type: Option<i64>,
    pub document_number: Option<String>,
    pub customer_code: Option<String>,
    pub item_code: Option<String>,
}

impl HistoryLineQuery {
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();
        push_eq(&mut filters, "DocumentType", &self.document_type);
        push_eq(&mut filters, "DocumentNumber", &present(&self.document_number));
        push_eq(&mut filters, "CustomerCode", &present(&self.customer_code));
        push_eq(&mut filters, "ItemCode", &present(&self.item_code));
        filters
    }
}

list_query!(HistoryLineQuery);
