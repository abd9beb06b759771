use serde::Deserialize;
use utoipa::IntoParams;

use super::{list_query, present, push_eq};
use crate::query::Filter;

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryCategoryQuery {
    /// `next_cursor` of the previous page
    pub cursor: Option<String>,
    /// Page size, defaults to the configured page size and is capped at the maximum
    #[param(minimum = 1)]
    pub limit: Option<u64>,
    pub ic_code: Option<String>,
}

impl InventoryCategoryQuery {
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();
        push_eq(&mut filters, "ICCode", &present(&self.ic_code));
        filters
    }
}

list_query!(InventoryCategoryQuery);
