use once_cell::sync::Lazy;

use crate::database::ColumnKind;
use crate::query::ResourceSchema;

/// Customer delivery addresses, keyed by customer then delivery code
pub static DELIVERY_ADDRESSES: Lazy<ResourceSchema> = Lazy::new(|| {
    ResourceSchema::builder("delivery-addresses", "DeliveryAddresses")
        .texts(&[
            "CustomerCode",
            "CustDelivCode",
            "SalesmanCode",
            "Contact",
            "Telephone",
            "Cell",
            "Fax",
        ])
        .series("DelAddress", 5, ColumnKind::Text)
        .texts(&[
            "Email",
            "ContactDocs",
            "EmailDocs",
            "ContactStatement",
            "EmailStatement",
        ])
        .key(&["CustomerCode", "CustDelivCode"])
        .build()
});
