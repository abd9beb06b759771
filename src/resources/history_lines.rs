use once_cell::sync::Lazy;

use crate::query::ResourceSchema;

/// HistoryLines, the line items of posted documents
pub static HISTORY_LINES: Lazy<ResourceSchema> = Lazy::new(|| {
    ResourceSchema::builder("history-lines", "HistoryLines")
        .integers(&["UserId", "DocumentType"])
        .texts(&["DocumentNumber", "ItemCode", "CustomerCode", "SalesmanCode"])
        .integers(&["SearchType", "PPeriod"])
        .date("DDate")
        .text("UnitUsed")
        .integers(&["TaxType", "DiscountType"])
        .decimal("DiscountPercentage")
        .text("Description")
        .decimals(&[
            "CostPrice",
            "Qty",
            "UnitPrice",
            "InclusivePrice",
            "FCurrUnitPrice",
            "FCurrInclPrice",
            "TaxAmt",
            "FCurrTaxAmount",
            "DiscountAmount",
            "FCDiscountAmount",
        ])
        .rename("FCDiscountAmount", "f_c_discount_amount")
        .text("CostCode")
        .datetime("DateTime")
        .integers(&["Physical", "Fixed", "ShowQty", "LinkNum", "LinkedNum"])
        .decimal("GRNQty")
        .integer("LinkID")
        .text("MultiStore")
        .integers(&["IsTMBLine", "LinkDocumentType"])
        .text("LinkDocumentNumber")
        .integer("Exported")
        .text("ExportRef")
        .integer("ExportNum")
        .decimal("QtyLeft")
        .text("CaseLotCode")
        .decimals(&["CaseLotQty", "CaseLotRatio"])
        .text("CostSyncDone")
        .key(&["DocumentType", "DocumentNumber", "LinkNum"])
        .build()
});
