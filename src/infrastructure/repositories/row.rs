use super::map_sqlx;
use crate::domain::entity::{CastKind, Column, Entity, Record, Value};
use crate::domain::errors::DomainResult;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::Value as Json;
use sqlx::{Row, postgres::PgRow};

pub(super) fn decode_record<E: Entity>(row: &PgRow) -> DomainResult<Record<E>> {
    let attributes = E::COLUMNS
        .iter()
        .map(|column| Ok((column.name.to_string(), decode_column(row, column)?)))
        .collect::<DomainResult<Vec<_>>>()?;
    Ok(Record::from_attributes(attributes))
}

fn decode_column(row: &PgRow, column: &Column) -> DomainResult<Value> {
    let name = column.name;
    let value = match column.cast {
        CastKind::Integer => Value::from(row.try_get::<Option<i64>, _>(name).map_err(map_sqlx)?),
        CastKind::Decimal => {
            Value::from(row.try_get::<Option<Decimal>, _>(name).map_err(map_sqlx)?)
        }
        CastKind::Text => Value::from(row.try_get::<Option<String>, _>(name).map_err(map_sqlx)?),
        CastKind::Boolean => Value::from(row.try_get::<Option<bool>, _>(name).map_err(map_sqlx)?),
        CastKind::Date => {
            Value::from(row.try_get::<Option<NaiveDate>, _>(name).map_err(map_sqlx)?)
        }
        CastKind::DateTime => {
            Value::from(row.try_get::<Option<DateTime<Utc>>, _>(name).map_err(map_sqlx)?)
        }
        CastKind::Json => Value::from(row.try_get::<Option<Json>, _>(name).map_err(map_sqlx)?),
    };
    Ok(value)
}
