// src/infrastructure/repositories/sql.rs
//! Query fragments shared by the generic repository. Identifiers always come
//! from the entity descriptor and operator text from `Operator::as_sql`;
//! every value is bound.
use crate::domain::entity::{CastKind, Column, Entity, Value};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::query::{Conditions, OrderBy, Operand, Operator};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::Value as Json;
use sqlx::{Postgres, QueryBuilder};

pub(super) fn column_list<E: Entity>() -> String {
    E::COLUMNS
        .iter()
        .map(|c| c.name)
        .collect::<Vec<_>>()
        .join(", ")
}

pub(super) fn select_from<E: Entity>() -> QueryBuilder<'static, Postgres> {
    QueryBuilder::new(format!("SELECT {} FROM {}", column_list::<E>(), E::TABLE))
}

/// Coerce `value` to the column's kind and bind it; NULL is bound with the
/// column's type so Postgres can infer the parameter.
pub(super) fn push_value(
    builder: &mut QueryBuilder<'_, Postgres>,
    column: &Column,
    value: Value,
) -> DomainResult<()> {
    match column.cast.coerce(column.name, value)? {
        Value::Null => push_null(builder, column.cast),
        Value::Integer(v) => {
            builder.push_bind(v);
        }
        Value::Decimal(v) => {
            builder.push_bind(v);
        }
        Value::Text(v) => {
            builder.push_bind(v);
        }
        Value::Boolean(v) => {
            builder.push_bind(v);
        }
        Value::Date(v) => {
            builder.push_bind(v);
        }
        Value::DateTime(v) => {
            builder.push_bind(v);
        }
        Value::Json(v) => {
            builder.push_bind(v);
        }
    }
    Ok(())
}

fn push_null(builder: &mut QueryBuilder<'_, Postgres>, cast: CastKind) {
    match cast {
        CastKind::Integer => builder.push_bind(None::<i64>),
        CastKind::Decimal => builder.push_bind(None::<Decimal>),
        CastKind::Text => builder.push_bind(None::<String>),
        CastKind::Boolean => builder.push_bind(None::<bool>),
        CastKind::Date => builder.push_bind(None::<NaiveDate>),
        CastKind::DateTime => builder.push_bind(None::<DateTime<Utc>>),
        CastKind::Json => builder.push_bind(None::<Json>),
    };
}

pub(super) fn push_where<E: Entity>(
    builder: &mut QueryBuilder<'_, Postgres>,
    conditions: &Conditions,
) -> DomainResult<()> {
    for (index, condition) in conditions.iter().enumerate() {
        let column = E::require_column(condition.column())?;
        builder.push(if index == 0 { " WHERE " } else { " AND " });
        builder.push(column.name);

        let operator = condition.operator();
        match (operator, condition.operand()) {
            (Operator::IsNull | Operator::IsNotNull, _) => {
                builder.push(" ");
                builder.push(operator.as_sql());
            }
            (Operator::Like, Operand::Single(Value::Text(pattern))) => {
                if column.cast != CastKind::Text {
                    return Err(DomainError::Validation(format!(
                        "LIKE is only supported on string columns, '{}' is {}",
                        column.name, column.cast
                    )));
                }
                builder.push(" LIKE ");
                builder.push_bind(pattern.clone());
            }
            (Operator::In, Operand::List(items)) => {
                builder.push(" IN (");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        builder.push(", ");
                    }
                    push_value(builder, column, item.clone())?;
                }
                builder.push(")");
            }
            (Operator::Between, Operand::Range(low, high)) => {
                builder.push(" BETWEEN ");
                push_value(builder, column, low.clone())?;
                builder.push(" AND ");
                push_value(builder, column, high.clone())?;
            }
            (op, Operand::Single(value)) if op.is_comparison() => {
                builder.push(" ");
                builder.push(op.as_sql());
                builder.push(" ");
                push_value(builder, column, value.clone())?;
            }
            (op, _) => {
                return Err(DomainError::Validation(format!(
                    "malformed {op} condition on '{}'",
                    column.name
                )));
            }
        }
    }
    Ok(())
}

/// `ORDER BY` from `order_by`, or the primary key when empty so pages are stable.
pub(super) fn push_order<E: Entity>(
    builder: &mut QueryBuilder<'_, Postgres>,
    order_by: &OrderBy,
) -> DomainResult<()> {
    builder.push(" ORDER BY ");
    if order_by.is_empty() {
        builder.push(E::PRIMARY_KEY);
        builder.push(" ASC");
        return Ok(());
    }
    for (i, (name, direction)) in order_by.iter().enumerate() {
        let column = E::require_column(name)?;
        if i > 0 {
            builder.push(", ");
        }
        builder.push(column.name);
        builder.push(" ");
        builder.push(direction.as_sql());
    }
    Ok(())
}

pub(super) fn push_limit(
    builder: &mut QueryBuilder<'_, Postgres>,
    limit: Option<u32>,
    offset: Option<u64>,
) -> DomainResult<()> {
    if let Some(limit) = limit {
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(limit));
    }
    if let Some(offset) = offset {
        let offset = i64::try_from(offset)
            .map_err(|_| DomainError::Validation("offset is out of range".into()))?;
        builder.push(" OFFSET ");
        builder.push_bind(offset);
    }
    Ok(())
}
