use serde::Deserialize;
use utoipa::IntoParams;

use super::{list_query, present, push_eq};
use crate::query::Filter;

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CustomerQuery {
    /// `next_cursor` of the previous page
    pub cursor: Option<String>,
    /// Page size, defaults to the configured page size and is capped at the maximum
    #[param(minimum = 1)]
    pub limit: Option<u64>,
    /// Exact customer code
    pub customer_code: Option<String>,
    /// Customer category number
    pub category: Option<i64>,
    /// Substring of the customer code or description
    pub search: Option<String>,
}

impl CustomerQuery {
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();
        push_eq(&mut filters, "CustomerCode", &present(&self.customer_code));
        push_eq(&mut filters, "Category", &self.category);

        if let Some(term) = present(&self.search) {
            filters.push(Filter::any_of(vec![
                Filter::contains("CustomerCode", &term),
                Filter::contains("CustomerDesc", &term),
            ]));
        }

        filters
    }
}

list_query!(CustomerQuery);
