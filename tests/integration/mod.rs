//! Integration tests for the pastel-bridge service

pub mod docs_test;
pub mod health_test;
pub mod pagination_test;
pub mod resilience_test;
pub mod resources_test;
pub mod sqlite_connector_test;
