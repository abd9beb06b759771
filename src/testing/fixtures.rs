//! Sample rows for every resource table
//!
//! Rows name only the columns they care about; every other schema column is
//! NULL, which is what the legacy tables hold for unused fields anyway.

use chrono::NaiveDate;

use crate::database::{Row, Value};
use crate::query::ResourceSchema;
use crate::resources;

use super::FakeConnector;

fn date(year: i32, month: u32, day: u32) -> Value {
    NaiveDate::from_ymd_opt(year, month, day)
        .map(Value::Date)
        .unwrap_or(Value::Null)
}

/// Load `records` into `connector` as the table behind `schema`
pub fn seed(connector: &FakeConnector, schema: &ResourceSchema, records: Vec<Vec<(&str, Value)>>) {
    let columns: Vec<&str> = schema.fields().iter().map(|field| field.column.as_str()).collect();

    let rows: Vec<Row> = records
        .into_iter()
        .map(|record| {
            let mut row = vec![Value::Null; columns.len()];
            for (column, value) in record {
                if let Some(index) = columns.iter().position(|c| *c == column) {
                    row[index] = value;
                }
            }
            row
        })
        .collect();

    connector.insert_table(schema.table(), &columns, rows);
}

pub fn customers() -> Vec<Vec<(&'static str, Value)>> {
    vec![
        vec![
            ("CustomerCode", "CASH   ".into()),
            ("Category", 1.into()),
            ("CustomerDesc", "Cash Sales".into()),
            ("BalanceThis01", 0.0.into()),
            ("OpenItem", 0.into()),
        ],
        vec![
            ("CustomerCode", "ACME01".into()),
            ("Category", 2.into()),
            ("CustomerDesc", "Acme Hardware".into()),
            ("BalanceThis01", 1250.5.into()),
            ("OpenItem", 1.into()),
        ],
        vec![
            ("CustomerCode", "BOLT02".into()),
            ("Category", 2.into()),
            ("CustomerDesc", "Bolt & Nut Traders".into()),
            ("BalanceThis01", 310.0.into()),
            ("OpenItem", 0.into()),
        ],
    ]
}

pub fn invoices() -> Vec<Vec<(&'static str, Value)>> {
    vec![
        vec![
            ("DocumentType", 3.into()),
            ("DocumentNumber", "INV0001".into()),
            ("CustomerCode", "ACME01".into()),
            ("DocumentDate", date(2024, 1, 15)),
        ],
        vec![
            ("DocumentType", 3.into()),
            ("DocumentNumber", "INV0002".into()),
            ("CustomerCode", "BOLT02".into()),
            ("DocumentDate", date(2024, 2, 3)),
        ],
        vec![
            ("DocumentType", 4.into()),
            ("DocumentNumber", "CRN0001".into()),
            ("CustomerCode", "ACME01".into()),
            ("DocumentDate", date(2024, 2, 20)),
        ],
    ]
}

pub fn history_lines() -> Vec<Vec<(&'static str, Value)>> {
    let line = |document_number: &'static str, link_num: i64, item_code: &'static str, customer: &'static str| {
        vec![
            ("DocumentType", Value::Int(3)),
            ("DocumentNumber", document_number.into()),
            ("LinkNum", link_num.into()),
            ("ItemCode", item_code.into()),
            ("CustomerCode", customer.into()),
            ("DDate", date(2024, 1, 15)),
            ("Description", format!("Line {link_num} of {document_number}").into()),
        ]
    };

    vec![
        line("INV0001", 1, "HAMMER", "ACME01"),
        line("INV0001", 2, "NAILS100", "ACME01"),
        line("INV0001", 3, "HAMMER", "ACME01"),
        line("INV0002", 1, "BOLTM8", "BOLT02"),
    ]
}

pub fn inventory() -> Vec<Vec<(&'static str, Value)>> {
    let item = |code: &'static str, category: &'static str, blocked: i64, physical: i64| {
        vec![
            ("ItemCode", Value::from(code)),
            ("Category", category.into()),
            ("Description", format!("{code} item").into()),
            ("Blocked", blocked.into()),
            ("Physical", physical.into()),
        ]
    };

    vec![
        item("BOLTM8", "FAST", 0, 1),
        item("HAMMER", "TOOL", 0, 1),
        item("NAILS100", "FAST", 0, 1),
        item("SERVICE", "SERV", 1, 0),
    ]
}

pub fn inventory_categories() -> Vec<Vec<(&'static str, Value)>> {
    vec![
        vec![("ICCode", "FAST".into()), ("ICDesc", "Fasteners".into())],
        vec![("ICCode", "SERV".into()), ("ICDesc", "Services".into())],
        vec![("ICCode", "TOOL".into()), ("ICDesc", "Hand tools".into())],
    ]
}

pub fn inventory_groups() -> Vec<Vec<(&'static str, Value)>> {
    vec![
        vec![
            ("InvGroup", "HW".into()),
            ("Description", "Hardware".into()),
            ("SalesTaxType", 1.into()),
        ],
        vec![
            ("InvGroup", "SV".into()),
            ("Description", "Services".into()),
            ("SalesTaxType", 0.into()),
        ],
    ]
}

pub fn ledger_transactions() -> Vec<Vec<(&'static str, Value)>> {
    vec![
        vec![
            ("AutoNumber", 101.into()),
            ("GDC", "D".into()),
            ("AccNumber", "ACME01".into()),
            ("PPeriod", 1.into()),
            ("DDate", date(2024, 1, 15)),
            ("EType", 3.into()),
            ("Refrence", "INV0001".into()),
            ("Amount", 1150.0.into()),
            ("Description", "Invoice INV0001".into()),
            ("UserID", "\0".into()),
        ],
        vec![
            ("AutoNumber", 102.into()),
            ("GDC", "G".into()),
            ("AccNumber", "1000000".into()),
            ("PPeriod", 2.into()),
            ("DDate", date(2024, 2, 3)),
            ("EType", 5.into()),
            ("Refrence", "RCP0001".into()),
            ("Amount", 250.0.into()),
            ("Description", "Cash receipt".into()),
            ("UserID", " ".into()),
        ],
        vec![
            ("AutoNumber", 103.into()),
            ("GDC", "D".into()),
            ("AccNumber", "BOLT02".into()),
            ("PPeriod", 2.into()),
            ("DDate", date(2024, 2, 20)),
            ("EType", 3.into()),
            ("Refrence", "INV0002".into()),
            ("Amount", 98.75.into()),
            ("Description", "Invoice INV0002".into()),
            ("UserID", 4.into()),
        ],
    ]
}

pub fn delivery_addresses() -> Vec<Vec<(&'static str, Value)>> {
    vec![
        vec![
            ("CustomerCode", "ACME01".into()),
            ("CustDelivCode", "MAIN".into()),
            ("Contact", "Jo Botha".into()),
            ("DelAddress01", "12 Long Street".into()),
        ],
        vec![
            ("CustomerCode", "ACME01".into()),
            ("CustDelivCode", "YARD".into()),
            ("Contact", "Sipho Dlamini".into()),
            ("DelAddress01", "3 Dock Road".into()),
        ],
        vec![
            ("CustomerCode", "BOLT02".into()),
            ("CustDelivCode", "MAIN".into()),
            ("Contact", "Anna Smit".into()),
            ("DelAddress01", "88 Main Road".into()),
        ],
    ]
}

/// A connector serving every fixture table
pub fn connector() -> FakeConnector {
    let connector = FakeConnector::new();

    seed(&connector, &resources::CUSTOMERS, customers());
    seed(&connector, &resources::INVOICES, invoices());
    seed(&connector, &resources::HISTORY_LINES, history_lines());
    seed(&connector, &resources::INVENTORY, inventory());
    seed(&connector, &resources::INVENTORY_CATEGORIES, inventory_categories());
    seed(&connector, &resources::INVENTORY_GROUPS, inventory_groups());
    seed(&connector, &resources::LEDGER_TRANSACTIONS, ledger_transactions());
    seed(&connector, &resources::DELIVERY_ADDRESSES, delivery_addresses());

    connector
}
