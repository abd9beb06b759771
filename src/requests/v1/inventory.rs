use serde::Deserialize;
use utoipa::IntoParams;

use super::{list_query, present, push_eq};
use crate::query::Filter;

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryQuery {
    /// `next_cursor` of the previous page
    pub cursor: Option<String>,
    /// Page size, defaults to the configured page size and is capped at the maximum
    #[param(minimum = 1)]
    pub limit: Option<u64>,
    pub item_code: Option<String>,
    pub category: Option<String>,
    /// 1 for blocked items, 0 for active ones
    pub blocked: Option<i64>,
    /// 1 for stocked items, 0 for services
    pub physical: Option<i64>,
}

impl InventoryQuery {
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();
        push_eq(&mut filters, "ItemCode", &present(&self.item_code));
        push_eq(&mut filters, "Category", &present(&self.category));
        push_eq(&mut filters, "Blocked", &self.blocked);
        push_eq(&mut filters, "Physical", &self.physical);
        filters
    }
}

list_query!(InventoryQuery);
