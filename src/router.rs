use actix_web::web::{self, ServiceConfig};
use utoipa::OpenApi;
use utoipa_swagger_ui::{SwaggerUi, Url};

use crate::api::Definition;
use crate::controllers;
use crate::errors::ApiError;

/// Register every endpoint
pub fn route(app: &mut ServiceConfig) {
    app.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(err.to_string()).into()
    }));
    app.app_data(web::PathConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(err.to_string()).into()
    }));

    app.service(controllers::health::index);
    // Customers
    app.service(controllers::v1::customer::paginate);
    app.service(controllers::v1::customer::delivery_addresses);
    app.service(controllers::v1::customer::show);
    // Invoices
    app.service(controllers::v1::invoice::paginate);
    app.service(controllers::v1::invoice::lines);
    app.service(controllers::v1::invoice::show);
    // History lines
    app.service(controllers::v1::history_line::paginate);
    app.service(controllers::v1::history_line::show);
    // Inventory
    app.service(controllers::v1::inventory::paginate);
    app.service(controllers::v1::inventory::show);
    app.service(controllers::v1::inventory_category::paginate);
    app.service(controllers::v1::inventory_category::show);
    app.service(controllers::v1::inventory_group::paginate);
    app.service(controllers::v1::inventory_group::show);
    // Ledger
    app.service(controllers::v1::ledger_transaction::paginate);
    app.service(controllers::v1::ledger_transaction::show);
    // Delivery addresses
    app.service(controllers::v1::delivery_address::paginate);
    app.service(controllers::v1::delivery_address::show);

    // Health check endpoints
    app.service(controllers::health::health);
    app.service(controllers::health::live);
    app.service(controllers::health::ready);
    app.service(controllers::health::ping);

    // Metrics endpoint
    app.service(controllers::metrics::metrics);
}

/// Swagger UI at `/docs` and the OpenAPI document at `/api.json`
pub fn docs(app: &mut ServiceConfig) {
    app.service(web::redirect("/docs", "/docs/"));
    app.service(SwaggerUi::new("/docs/{_:.*}").urls(vec![(
        Url::new("Pastel Bridge", "/api.json"),
        Definition::openapi(),
    )]));
}
