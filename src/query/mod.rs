//! Generic paginated reads over declared legacy tables

pub mod builder;
pub mod engine;
pub mod mapping;
pub mod naming;
pub mod schema;

pub use builder::Filter;
pub use engine::{PageRequest, QueryEngineError, ResourceQueryEngine};
pub use mapping::{map_row, ResourceRecord};
pub use schema::{FieldSpec, ResourceSchema};
