use once_cell::sync::Lazy;

use crate::database::ColumnKind;
use crate::query::ResourceSchema;

/// HistoryHeader, one row per posted document
pub static INVOICES: Lazy<ResourceSchema> = Lazy::new(|| {
    ResourceSchema::builder("invoices", "HistoryHeader")
        .integer("DocumentType")
        .text("DocumentNumber")
        .text("CustomerCode")
        .date("DocumentDate")
        .texts(&["OrderNumber", "SalesmanCode"])
        .integers(&["UserID", "ExclIncl"])
        .series("Message", 3, ColumnKind::Text)
        .series("DelAddress", 5, ColumnKind::Text)
        .integer("Terms")
        .decimal("ExtraCosts")
        .text("CostCode")
        .integer("PPeriod")
        .date("ClosingDate")
        .texts(&["Telephone", "Fax", "Contact"])
        .integer("CurrencyCode")
        .decimals(&[
            "ExchangeRate",
            "DiscountPercent",
            "Total",
            "FCurrTotal",
            "TotalTax",
            "FCurrTotalTax",
            "TotalCost",
        ])
        .texts(&["InvDeleted", "InvPrintStatus"])
        .integer("Onhold")
        .text("GRNMisc")
        .integer("Paid")
        .texts(&["Freight01", "Ship"])
        .integer("IsTMBDoc")
        .text("Spare")
        .integer("Exported")
        .text("ExportRef")
        .integer("ExportNum")
        .text("Emailed")
        .key(&["DocumentType", "DocumentNumber"])
        .build()
});
