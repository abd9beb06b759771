//! Query string parameters of the list endpoints
//!
//! Every list endpoint accepts `cursor` and `limit`; the resource specific
//! parameters become [`Filter`]s. A parameter that is absent applies no
//! filter.

pub mod customer;
pub mod delivery_address;
pub mod history_line;
pub mod inventory;
pub mod inventory_category;
pub mod inventory_group;
pub mod invoice;
pub mod ledger_transaction;

use serde::Deserialize;
use utoipa::IntoParams;

use crate::query::Filter;

/// What the list service needs from a query string
pub trait ListQuery {
    fn cursor(&self) -> Option<&str>;

    fn limit(&self) -> Option<u64>;

    fn filters(&self) -> Vec<Filter>;
}

/// Paging parameters alone, used by nested lists
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// `next_cursor` of the previous page
    pub cursor: Option<String>,
    /// Page size, defaults to the configured page size and is capped at the maximum
    #[param(minimum = 1)]
    pub limit: Option<u64>,
}

impl ListQuery for PageQuery {
    fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    fn limit(&self) -> Option<u64> {
        self.limit
    }

    fn filters(&self) -> Vec<Filter> {
        Vec::new()
    }
}

/// Implements the paging half of [`ListQuery`] for a struct with `cursor`
/// and `limit` fields and an inherent `filters` method
macro_rules! list_query {
    ($query:ty) => {
        impl $crate::requests::v1::ListQuery for $query {
            fn cursor(&self) -> Option<&str> {
                self.cursor.as_deref()
            }

            fn limit(&self) -> Option<u64> {
                self.limit
            }

            fn filters(&self) -> Vec<$crate::query::Filter> {
                <$query>::filters(self)
            }
        }
    };
}

pub(crate) use list_query;

/// Push an equality filter when the parameter is present
fn push_eq<T>(filters: &mut Vec<Filter>, column: &'static str, value: &Option<T>)
where
    T: Clone + Into<crate::database::Value>,
{
    if let Some(value) = value {
        filters.push(Filter::eq(column, value.clone()));
    }
}

/// Text parameters that are blank after trimming are treated as absent
fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
