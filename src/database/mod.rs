//! Database access
//!
//! A bounded pool of short-lived connections opened through a [`Connector`],
//! guarded by a circuit breaker. Rows and parameters cross the seam as
//! [`Value`]s, reads are described as [`Select`]s and rendered per dialect.

mod connector;
mod orm;
mod pool;
mod statement;
mod value;

pub use connector::{redact, Connection, Connector, DriverError};
pub use orm::SeaOrmConnector;
pub use pool::{DatabaseError, DatabasePool, PoolConfiguration, PooledConnection};
pub use statement::{CompareOp, Predicate, Select, SqlDialect, Statement};
pub use value::{ColumnKind, Row, Value};
