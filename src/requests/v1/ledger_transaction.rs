use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use super::{list_query, present, push_eq};
use crate::query::Filter;

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LedgerTransactionQuery {
    /// `next_cursor` of the previous page
    pub cursor: Option<String>,
    /// Page size, defaults to the configured page size and is capped at the maximum
    #[param(minimum = 1)]
    pub limit: Option<u64>,
    /// G, D or C
    pub gdc: Option<String>,
    pub acc_number: Option<String>,
    pub p_period: Option<i64>,
    /// Earliest transaction date, inclusive
    pub from_date: Option<NaiveDate>,
    /// Latest transaction date, inclusive
    pub to_date: Option<NaiveDate>,
    pub e_type: Option<i64>,
    pub refrence: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    /// Substring of the description
    pub description: Option<String>,
    pub link_id: Option<i64>,
    pub user_id: Option<i64>,
    pub transaction_id: Option<i64>,
    pub link_acc: Option<String>,
}

impl LedgerTransactionQuery {
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();

        push_eq(&mut filters, "GDC", &present(&self.gdc));
        push_eq(&mut filters, "AccNumber", &present(&self.acc_number));
        push_eq(&mut filters, "PPeriod", &self.p_period);

        if let Some(from) = self.from_date {
            filters.push(Filter::gte("DDate", from));
        }
        if let Some(to) = self.to_date {
            filters.push(Filter::lte("DDate", to));
        }

        push_eq(&mut filters, "EType", &self.e_type);
        push_eq(&mut filters, "Refrence", &present(&self.refrence));

        if let Some(min) = self.min_amount {
            filters.push(Filter::gte("Amount", min));
        }
        if let Some(max) = self.max_amount {
            filters.push(Filter::lte("Amount", max));
        }

        if let Some(description) = present(&self.description) {
            filters.push(Filter::contains("Description", &description));
        }

        push_eq(&mut filters, "LinkID", &self.link_id);
        push_eq(&mut filters, "UserID", &self.user_id);
        push_eq(&mut filters, "TransactionID", &self.transaction_id);
        push_eq(&mut filters, "LinkAcc", &present(&self.link_acc));
        filters
    }
}

list_query!(LedgerTransactionQuery);
