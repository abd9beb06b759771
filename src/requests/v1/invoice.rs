use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use super::{list_query, present, push_eq};
use crate::query::Filter;

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InvoiceQuery {
    /// `next_cursor` of the previous page
    pub cursor: Option<String>,
    /// Page size, defaults to the configured page size and is capped at the maximum
    #[param(minimum = 1)]
    pub limit: Option<u64>,
    /// Earliest document date, inclusive (`from` is accepted too)
    #[serde(alias = "from")]
    pub from_date: Option<NaiveDate>,
    /// Latest document date, inclusive (`to` is accepted too)
    #[serde(alias = "to")]
    pub to_date: Option<NaiveDate>,
    pub customer_code: Option<String>,
    pub document_type: Option<i64>,
    pub document_number: Option<String>,
}

impl InvoiceQuery {
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();

        if let Some(from) = self.from_date {
            filters.push(Filter::gte("DocumentDate", from));
        }
        if let Some(to) = self.to_date {
            filters.push(Filter::lte("DocumentDate", to));
        }

        push_eq(&mut filters, "CustomerCode", &present(&self.customer_code));
        push_eq(&mut filters, "DocumentType", &self.document_type);
        push_eq(&mut filters, "DocumentNumber", &present(&self.document_number));
        filters
    }
}

list_query!(InvoiceQuery);
