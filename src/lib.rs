#[macro_use(get)]
extern crate actix_web;

pub mod api;
pub mod config;
pub mod controllers;
pub mod database;
pub mod errors;
pub mod metrics;
pub mod middlewares;
pub mod pagination;
pub mod query;
pub mod requests;
pub mod resilience;
pub mod resources;
pub mod responses;
pub mod router;
pub mod security;
pub mod server;
pub mod services;
pub mod telemetry;

// Testing utilities (always available for integration tests)
pub mod testing;

pub use database::DatabasePool;
pub use errors::ApiError;
pub use metrics::{AppMetrics, MetricsMiddleware};
pub use query::{ResourceQueryEngine, ResourceRecord};
pub use security::{ApiKeyMiddleware, IpAllowlistMiddleware, RateLimitMiddleware};
pub use server::AppState;
