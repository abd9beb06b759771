use once_cell::sync::Lazy;

use crate::query::ResourceSchema;

/// General ledger postings, paged by their auto number
///
/// Several integer columns hold blank or NUL placeholders on older rows;
/// declaring them as integers coerces those to 0.
pub static LEDGER_TRANSACTIONS: Lazy<ResourceSchema> = Lazy::new(|| {
    ResourceSchema::builder("ledger-transactions", "LedgerTransactions")
        .integer("AutoNumber")
        .texts(&["GDC", "AccNumber", "DiscFlag"])
        .integer("CurrCode")
        .text("Spare")
        .integer("PPeriod")
        .date("DDate")
        .integer("EType")
        .texts(&["Refrence", "JobCode"])
        .decimals(&[
            "Amount",
            "TaxAmt",
            "ThisCurrTaxAmount",
            "BankTaxAmount",
            "CurrAmt",
            "BankCurrAmount",
        ])
        .integer("ReconFlag")
        .text("Description")
        .integer("TaxType")
        .texts(&["Country", "Generated", "PayBased"])
        .integer("UserID")
        .texts(&["WhichUserRef", "LinkAcc"])
        .integers(&["UpdateReconFlag", "ChequeFlag", "LinkID", "InInv"])
        .date("TaxReportDate")
        .integers(&["TaxReportPeriod", "BatchID", "TransactionID", "Exported"])
        .text("ExportRef")
        .integer("ExportNum")
        .text("CostSyncDone")
        .key(&["AutoNumber"])
        .build()
});
