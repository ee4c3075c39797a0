// src/domain/entity/value.rs
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value as Json;
use std::{fmt, str::FromStr};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Storage type of a column. Each kind maps onto exactly one Postgres type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastKind {
    /// `BIGINT`
    Integer,
    /// `NUMERIC`
    Decimal,
    /// `TEXT` / `VARCHAR`
    Text,
    /// `BOOLEAN`
    Boolean,
    /// `DATE`
    Date,
    /// `TIMESTAMPTZ`
    DateTime,
    /// `JSONB`
    Json,
}

impl CastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CastKind::Integer => "integer",
            CastKind::Decimal => "decimal",
            CastKind::Text => "string",
            CastKind::Boolean => "boolean",
            CastKind::Date => "date",
            CastKind::DateTime => "datetime",
            CastKind::Json => "json",
        }
    }

    /// Convert an already-typed value into this kind. `Null` passes through.
    pub fn coerce(&self, column: &str, value: Value) -> DomainResult<Value> {
        let invalid = |v: &Value| {
            DomainError::Validation(format!(
                "column '{column}' expects {}, got {}",
                self.as_str(),
                v.kind_name()
            ))
        };

        match (self, value) {
            (_, Value::Null) => Ok(Value::Null),

            (CastKind::Integer, v @ Value::Integer(_)) => Ok(v),
            (CastKind::Integer, Value::Text(s)) => s
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| invalid(&Value::Text(s))),
            (CastKind::Integer, Value::Boolean(b)) => Ok(Value::Integer(i64::from(b))),

            (CastKind::Decimal, v @ Value::Decimal(_)) => Ok(v),
            (CastKind::Decimal, Value::Integer(i)) => Ok(Value::Decimal(Decimal::from(i))),
            (CastKind::Decimal, Value::Text(s)) => Decimal::from_str(s.trim())
                .map(Value::Decimal)
                .map_err(|_| invalid(&Value::Text(s))),

            (CastKind::Text, v @ Value::Text(_)) => Ok(v),
            (CastKind::Text, Value::Integer(i)) => Ok(Value::Text(i.to_string())),
            (CastKind::Text, Value::Decimal(d)) => Ok(Value::Text(d.to_string())),

            (CastKind::Boolean, v @ Value::Boolean(_)) => Ok(v),
            (CastKind::Boolean, Value::Integer(i)) => Ok(Value::Boolean(i != 0)),
            (CastKind::Boolean, Value::Text(s)) => {
                let lowered = s.trim().to_ascii_lowercase();
                match lowered.as_str() {
                    "1" | "true" => Ok(Value::Boolean(true)),
                    "0" | "false" => Ok(Value::Boolean(false)),
                    _ => Err(invalid(&Value::Text(s))),
                }
            }

            (CastKind::Date, v @ Value::Date(_)) => Ok(v),
            (CastKind::Date, Value::DateTime(dt)) => Ok(Value::Date(dt.date_naive())),
            (CastKind::Date, Value::Text(s)) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
                .map(Value::Date)
                .map_err(|_| invalid(&Value::Text(s))),

            (CastKind::DateTime, v @ Value::DateTime(_)) => Ok(v),
            (CastKind::DateTime, Value::Text(s)) => {
                parse_datetime(s.trim()).map(Value::DateTime).ok_or_else(|| invalid(&Value::Text(s)))
            }

            (CastKind::Json, v @ Value::Json(_)) => Ok(v),
            (CastKind::Json, other) => Ok(Value::Json(other.to_json())),

            (_, other) => Err(invalid(&other)),
        }
    }

    /// Cast a raw JSON input value (request body, condition operand) into this kind.
    pub fn cast_json(&self, column: &str, raw: &Json) -> DomainResult<Value> {
        if let CastKind::Json = self {
            return Ok(if raw.is_null() { Value::Null } else { Value::Json(raw.clone()) });
        }

        let value = match raw {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Boolean(*b),
            Json::String(s) => Value::Text(s.clone()),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else {
                    Decimal::from_str(&n.to_string())
                        .map(Value::Decimal)
                        .map_err(|_| {
                            DomainError::Validation(format!("column '{column}' has an invalid number"))
                        })?
                }
            }
            Json::Array(_) | Json::Object(_) => {
                return Err(DomainError::Validation(format!(
                    "column '{column}' expects {}, got a JSON structure",
                    self.as_str()
                )));
            }
        };

        self.coerce(column, value)
    }
}

impl fmt::Display for CastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// A single attribute value of a row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Decimal(Decimal),
    Text(String),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Json(Json),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::Text(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::Json(_) => "json",
        }
    }

    /// JSON form used for snapshots and API responses.
    pub fn to_json(&self) -> Json {
        match self {
            Value::Null => Json::Null,
            Value::Integer(i) => Json::from(*i),
            Value::Decimal(d) => Json::String(d.normalize().to_string()),
            Value::Text(s) => Json::String(s.clone()),
            Value::Boolean(b) => Json::Bool(*b),
            Value::Date(d) => Json::String(d.format(DATE_FORMAT).to_string()),
            Value::DateTime(dt) => Json::String(dt.to_rfc3339()),
            Value::Json(j) => j.clone(),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl From<Json> for Value {
    fn from(value: Json) -> Self {
        Value::Json(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}
