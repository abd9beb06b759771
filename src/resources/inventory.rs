use once_cell::sync::Lazy;

use crate::database::ColumnKind;
use crate::query::ResourceSchema;

/// Inventory items, paged by item code
pub static INVENTORY: Lazy<ResourceSchema> = Lazy::new(|| {
    ResourceSchema::builder("inventory", "Inventory")
        .texts(&["Category", "ItemCode", "Description", "Barcode"])
        .integers(&["DiscountType", "Blocked", "Fixed", "ShowQty", "Physical"])
        .text("UnitSize")
        .integers(&["SalesTaxType", "PurchTaxType"])
        .text("GLCode")
        .integer("AllowTax")
        .text("LinkWeb")
        .integers(&["SalesCommision", "SerialItem"])
        .text("Picture")
        .series("UserDefText", 3, ColumnKind::Text)
        .series("UserDefNum", 3, ColumnKind::Decimal)
        .text("CommodityCode")
        .decimal("NettMass")
        .datetime("UpdatedOn")
        .text("GUID")
        .key(&["ItemCode"])
        .build()
});
