//! Opaque keyset cursors
//!
//! A cursor is the ordering key of the last record of a page: the key values
//! rendered as text, joined with `:` and base64 encoded (URL safe alphabet,
//! no padding). Decoding splits into at most as many parts as the key has
//! columns, so only the last column may itself contain `:`.
//!
//! Key values are encoded exactly as stored. A `CHAR` key keeps its padding,
//! otherwise `key > cursor` would match the padded row again on backends that
//! compare trailing spaces.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::database::{ColumnKind, Value};

pub const DELIMITER: char = ':';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("Invalid cursor: {0}")]
    Malformed(String),
}

/// Encode the key values of the last record of a page
pub fn encode(key: &[Value]) -> String {
    let parts: Vec<String> = key.iter().map(ToString::to_string).collect();
    URL_SAFE_NO_PAD.encode(parts.join(&DELIMITER.to_string()))
}

/// Split a cursor into `arity` textual parts
pub fn decode_parts(cursor: &str, arity: usize) -> Result<Vec<String>, CursorError> {
    let cursor = cursor.trim();
    if cursor.is_empty() {
        return Err(CursorError::Malformed("cursor is empty".to_string()));
    }

    // Standard alphabet with padding is accepted as well
    let bytes = URL_SAFE_NO_PAD
        .decode(cursor)
        .or_else(|_| STANDARD.decode(cursor))
        .map_err(|_| CursorError::Malformed("cursor is not valid base64".to_string()))?;

    let text = String::from_utf8(bytes)
        .map_err(|_| CursorError::Malformed("cursor is not valid UTF-8".to_string()))?;

    let parts: Vec<String> = text.splitn(arity, DELIMITER).map(str::to_string).collect();

    if parts.len() != arity {
        return Err(CursorError::Malformed(format!(
            "expected {arity} key parts, found {}",
            parts.len()
        )));
    }

    Ok(parts)
}

/// Decode a cursor into typed key values, one per entry of `kinds`
pub fn decode(cursor: &str, kinds: &[ColumnKind]) -> Result<Vec<Value>, CursorError> {
    let parts = decode_parts(cursor, kinds.len())?;

    parts
        .iter()
        .zip(kinds)
        .map(|(part, kind)| parse_part(part, *kind))
        .collect()
}

fn parse_part(part: &str, kind: ColumnKind) -> Result<Value, CursorError> {
    let invalid = || CursorError::Malformed(format!("key part is not a valid {}", kind.as_str()));

    match kind {
        ColumnKind::Text => Ok(Value::Text(part.to_string())),
        ColumnKind::Integer => part.parse::<i64>().map(Value::Int).map_err(|_| invalid()),
        ColumnKind::Decimal => part.parse::<f64>().map(Value::Float).map_err(|_| invalid()),
        ColumnKind::Boolean => match part {
            "1" | "true" => Ok(Value::Bool(true)),
            "0" | "false" => Ok(Value::Bool(false)),
            _ => Err(invalid()),
        },
        ColumnKind::Date => NaiveDate::parse_from_str(part, "%Y-%m-%d")
            .map(Value::Date)
            .map_err(|_| invalid()),
        ColumnKind::DateTime => NaiveDateTime::parse_from_str(part, "%Y-%m-%dT%H:%M:%S%.f")
            .map(Value::DateTime)
            .map_err(|_| invalid()),
    }
}
