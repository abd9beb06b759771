//! Row to record mapping
//!
//! Raw driver values are coerced according to the declared column kind:
//! text is trimmed, legacy integer placeholders become zero, and dates stored
//! as text in either ISO or `dd/mm/yyyy` form are parsed. Anything that
//! cannot be coerced becomes `null` instead of failing the page.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value as Json};
use utoipa::ToSchema;

use crate::database::{ColumnKind, Row, Value};

use super::schema::ResourceSchema;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// A mapped record, fields in schema declaration order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct ResourceRecord(Map<String, Json>);

impl ResourceRecord {
    pub fn get(&self, field: &str) -> Option<&Json> {
        self.0.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Json> {
        self.0
    }
}

/// Build the record for `row`, whose values are in schema field order
pub fn map_row(schema: &ResourceSchema, row: Row) -> ResourceRecord {
    let mut record = Map::with_capacity(schema.fields().len());
    let mut values = row.into_iter();

    for field in schema.fields() {
        let value = values.next().unwrap_or(Value::Null);
        record.insert(field.name.clone(), coerce(value, field.kind));
    }

    ResourceRecord(record)
}

/// Coerce one raw value into its JSON representation
pub fn coerce(value: Value, kind: ColumnKind) -> Json {
    match kind {
        ColumnKind::Text => coerce_text(value),
        ColumnKind::Integer => coerce_integer(value),
        ColumnKind::Decimal => coerce_decimal(value),
        ColumnKind::Boolean => coerce_boolean(value),
        ColumnKind::Date => coerce_date(value),
        ColumnKind::DateTime => coerce_datetime(value),
    }
}

fn coerce_text(value: Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Text(text) => Json::String(text.trim().to_string()),
        other => Json::String(other.to_string()),
    }
}

fn coerce_integer(value: Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Int(value) => Json::from(value),
        Value::Bool(value) => Json::from(i64::from(value)),
        Value::Float(value) if value.fract() == 0.0 && value.is_finite() => Json::from(value as i64),
        Value::Text(text) => {
            // Legacy rows store blank or NUL placeholders in integer columns
            let trimmed = text.trim_matches(|c: char| c.is_whitespace() || c == '\0');
            if trimmed.is_empty() {
                return Json::from(0);
            }
            trimmed.parse::<i64>().map(Json::from).unwrap_or(Json::Null)
        }
        _ => Json::Null,
    }
}

fn coerce_decimal(value: Value) -> Json {
    let number = match value {
        Value::Float(value) => Number::from_f64(value),
        Value::Int(value) => Some(Number::from(value)),
        Value::Text(text) => text.trim().parse::<f64>().ok().and_then(Number::from_f64),
        _ => None,
    };

    number.map(Json::Number).unwrap_or(Json::Null)
}

fn coerce_boolean(value: Value) -> Json {
    match value {
        Value::Bool(value) => Json::Bool(value),
        Value::Int(value) => Json::Bool(value != 0),
        Value::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "y" | "yes" | "t" => Json::Bool(true),
            "0" | "false" | "n" | "no" | "f" => Json::Bool(false),
            _ => Json::Null,
        },
        _ => Json::Null,
    }
}

fn coerce_date(value: Value) -> Json {
    let date = match value {
        Value::Date(date) => Some(date),
        Value::DateTime(datetime) => Some(datetime.date()),
        Value::Text(text) => parse_date(&text),
        _ => None,
    };

    date.map(|date| Json::String(date.format("%Y-%m-%d").to_string()))
        .unwrap_or(Json::Null)
}

fn coerce_datetime(value: Value) -> Json {
    let datetime = match value {
        Value::DateTime(datetime) => Some(datetime),
        Value::Date(date) => Some(date.and_time(chrono::NaiveTime::MIN)),
        Value::Text(text) => parse_datetime(&text),
        _ => None,
    };

    datetime
        .map(|datetime| Json::String(datetime.format("%Y-%m-%dT%H:%M:%S%.f").to_string()))
        .unwrap_or(Json::Null)
}

/// Parse a textual date, ISO first then `dd/mm/yyyy`
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| parse_datetime(text).map(|datetime| datetime.date()))
}

/// Parse a textual timestamp, ISO first then `dd/mm/yyyy HH:MM:SS`
///
/// A bare date is accepted as midnight.
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .map(|date| date.and_time(chrono::NaiveTime::MIN))
        })
}
