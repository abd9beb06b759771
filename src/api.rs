use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::security::api_key::API_KEY_HEADER;
use crate::{controllers, errors, pagination, query, responses};

/// Shared key sent in the `X-API-Key` header
struct ApiKeyAddon;

impl Modify for ApiKeyAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                API_KEY_HEADER,
                "Shared API key configured as security.api_key",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pastel Bridge API",
        description = "Read-only REST access to the accounting database",
    ),
    tags(
        (name = "Customers"),
        (name = "Invoices"),
        (name = "History Lines"),
        (name = "Inventory"),
        (name = "Ledger"),
        (name = "Delivery Addresses"),
        (name = "Health"),
    ),
    modifiers(&ApiKeyAddon),
    paths(
        controllers::v1::customer::paginate,
        controllers::v1::customer::show,
        controllers::v1::customer::delivery_addresses,

        controllers::v1::invoice::paginate,
        controllers::v1::invoice::show,
        controllers::v1::invoice::lines,

        controllers::v1::history_line::paginate,
        controllers::v1::history_line::show,

        controllers::v1::inventory::paginate,
        controllers::v1::inventory::show,

        controllers::v1::inventory_category::paginate,
        controllers::v1::inventory_category::show,

        controllers::v1::inventory_group::paginate,
        controllers::v1::inventory_group::show,

        controllers::v1::ledger_transaction::paginate,
        controllers::v1::ledger_transaction::show,

        controllers::v1::delivery_address::paginate,
        controllers::v1::delivery_address::show,

        controllers::health::index,
        controllers::health::health,
        controllers::health::live,
        controllers::health::ready,
        controllers::health::ping,
    ),
    components(schemas(
        errors::ErrorResponse,
        responses::v1::RecordPage,
        pagination::PaginationMetadata,
        query::ResourceRecord,

        controllers::health::LivenessResponse,
        controllers::health::ReadinessResponse,
        controllers::health::PingResponse,
        controllers::health::BannerResponse,
    )),
)]
pub struct Definition;
