use once_cell::sync::Lazy;

use crate::query::ResourceSchema;

pub static INVENTORY_CATEGORIES: Lazy<ResourceSchema> = Lazy::new(|| {
    ResourceSchema::builder("inventory-categories", "InventoryCategory")
        .texts(&["ICCode", "ICDesc"])
        .key(&["ICCode"])
        .build()
});
