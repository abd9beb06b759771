use once_cell::sync::Lazy;

use crate::query::ResourceSchema;

pub static INVENTORY_GROUPS: Lazy<ResourceSchema> = Lazy::new(|| {
    ResourceSchema::builder("inventory-groups", "InventoryGroups")
        .texts(&[
            "InvGroup",
            "Description",
            "SalesAcc",
            "PurchAcc",
            "COSAcc",
            "Adjustment",
            "StockCtl",
            "Variance",
            "PurchVariance",
        ])
        .integers(&["SalesTaxType", "PurchTaxType"])
        .key(&["InvGroup"])
        .build()
});
