//! Driver seam
//!
//! The pool never talks to a driver directly. It asks a [`Connector`] for a
//! fresh physical [`Connection`] per acquisition and closes it on release.

use async_trait::async_trait;
use thiserror::Error;

use super::statement::{SqlDialect, Statement};
use super::value::Row;

/// Failure reported by a driver
///
/// The message is the driver's own text and may contain connection details;
/// callers redact it before it leaves the database layer.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct DriverError {
    message: String,
}

impl DriverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// One open physical connection
#[async_trait]
pub trait Connection: Send {
    /// Execute a read statement and return its rows in select-list order
    async fn query(&mut self, statement: &Statement) -> Result<Vec<Row>, DriverError>;

    /// Close the physical connection; the connection is unusable afterwards
    async fn close(&mut self) -> Result<(), DriverError>;
}

/// Factory for physical connections
#[async_trait]
pub trait Connector: Send + Sync {
    fn dialect(&self) -> SqlDialect;

    /// Open a new physical connection
    async fn connect(&self) -> Result<Box<dyn Connection>, DriverError>;

    /// Strings that must be scrubbed from any error text this connector produces
    fn secrets(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Replace every occurrence of a secret in `message`
pub fn redact(message: &str, secrets: &[String]) -> String {
    let mut redacted = message.to_string();

    // Longest first, so a full URL is scrubbed before the password inside it.
    let mut ordered: Vec<&String> = secrets.iter().filter(|s| !s.is_empty()).collect();
    ordered.sort_by_key(|s| std::cmp::Reverse(s.len()));

    for secret in ordered {
        redacted = redacted.replace(secret.as_str(), "***");
    }

    redacted
}
