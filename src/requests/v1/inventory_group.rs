use serde::Deserialize;
use utoipa::IntoParams;

use super::{list_query, present, push_eq};
use crate::query::Filter;

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryGroupQuery {
    /// `next_cursor` of the previous page
    pub cursor: Option<String>,
    /// Page size, defaults to the configured page size and is capped at the maximum
    #[param(minimum = 1)]
    pub limit: Option<u64>,
    pub inv_group: Option<String>,
}

impl InventoryGroupQuery {
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();
        push_eq(&mut filters, "InvGroup", &present(&self.inv_group));
        filters
    }
}

list_query!(InventoryGroupQuery);
