pub mod customer;
pub mod delivery_address;
pub mod history_line;
pub mod inventory;
pub mod inventory_category;
pub mod inventory_group;
pub mod invoice;
pub mod ledger_transaction;
