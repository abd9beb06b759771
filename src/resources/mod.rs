//! Legacy tables exposed by the bridge
//!
//! Each resource is a static [`ResourceSchema`] naming its table, the
//! columns served, the kind each column is coerced as, and the paging key.

mod customers;
mod delivery_addresses;
mod history_lines;
mod inventory;
mod inventory_categories;
mod inventory_groups;
mod invoices;
mod ledger_transactions;

pub use customers::CUSTOMERS;
pub use delivery_addresses::DELIVERY_ADDRESSES;
pub use history_lines::HISTORY_LINES;
pub use inventory::INVENTORY;
pub use inventory_categories::INVENTORY_CATEGORIES;
pub use inventory_groups::INVENTORY_GROUPS;
pub use invoices::INVOICES;
pub use ledger_transactions::LEDGER_TRANSACTIONS;

use crate::query::ResourceSchema;

/// Every exposed resource, for startup logging and schema tests
pub fn all() -> Vec<&'static ResourceSchema> {
    vec![
        &CUSTOMERS,
        &INVOICES,
        &HISTORY_LINES,
        &INVENTORY,
        &INVENTORY_CATEGORIES,
        &INVENTORY_GROUPS,
        &LEDGER_TRANSACTIONS,
        &DELIVERY_ADDRESSES,
    ]
}
