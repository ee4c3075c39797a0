// src/infrastructure/repositories/postgres_record.rs
use super::{
    map_sqlx,
    row::decode_record,
    sql::{column_list, push_limit, push_order, push_value, push_where, select_from},
};
use crate::application::ports::time::Clock;
use crate::domain::entity::{
    CREATED_AT, Changeset, Entity, Record, RecordRepository, UPDATED_AT, Value,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::query::{Conditions, OrderBy};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use std::{marker::PhantomData, sync::Arc};
use tracing::debug;

/// [`RecordRepository`] for any entity descriptor, backed by Postgres.
pub struct PostgresRecordRepository<E: Entity> {
    pool: PgPool,
    clock: Arc<dyn Clock>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> PostgresRecordRepository<E> {
    pub fn new(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self {
            pool,
            clock,
            _entity: PhantomData,
        }
    }

    fn returning(builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push(" RETURNING ");
        builder.push(column_list::<E>());
    }
}

impl<E: Entity> Clone for PostgresRecordRepository<E> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            clock: Arc::clone(&self.clock),
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: Entity> RecordRepository<E> for PostgresRecordRepository<E> {
    async fn find(&self, id: i64) -> DomainResult<Option<Record<E>>> {
        debug!(table = E::TABLE, op = "find", id);
        let mut builder = select_from::<E>();
        builder.push(" WHERE ");
        builder.push(E::PRIMARY_KEY);
        builder.push(" = ");
        builder.push_bind(id);

        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        row.as_ref().map(decode_record::<E>).transpose()
    }

    async fn find_first(&self, conditions: &Conditions) -> DomainResult<Option<Record<E>>> {
        debug!(table = E::TABLE, op = "find_first", conditions = conditions.len());
        let mut builder = select_from::<E>();
        push_where::<E>(&mut builder, conditions)?;
        push_order::<E>(&mut builder, &OrderBy::new())?;
        builder.push(" LIMIT 1");

        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        row.as_ref().map(decode_record::<E>).transpose()
    }

    async fn list(
        &self,
        conditions: &Conditions,
        order_by: &OrderBy,
        limit: Option<u32>,
        offset: Option<u64>,
    ) -> DomainResult<Vec<Record<E>>> {
        debug!(table = E::TABLE, op = "list", conditions = conditions.len(), ?limit, ?offset);
        let mut builder = select_from::<E>();
        push_where::<E>(&mut builder, conditions)?;
        push_order::<E>(&mut builder, order_by)?;
        push_limit(&mut builder, limit, offset)?;

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        rows.iter().map(decode_record::<E>).collect()
    }

    async fn count(&self, conditions: &Conditions) -> DomainResult<u64> {
        debug!(table = E::TABLE, op = "count", conditions = conditions.len());
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", E::TABLE));
        push_where::<E>(&mut builder, conditions)?;

        let row = builder
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        let total: i64 = row.try_get(0).map_err(map_sqlx)?;
        u64::try_from(total).map_err(|_| DomainError::Persistence("negative row count".into()))
    }

    async fn create(&self, data: Changeset<E>) -> DomainResult<Record<E>> {
        debug!(table = E::TABLE, op = "create", columns = data.len());
        let now = self.clock.now();
        let mut values: Vec<(&'static str, Value)> = data.into_values().into_iter().collect();
        values.push((CREATED_AT, Value::DateTime(now)));
        values.push((UPDATED_AT, Value::DateTime(now)));

        let names = values.iter().map(|(name, _)| *name).collect::<Vec<_>>().join(", ");
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("INSERT INTO {} ({names}) VALUES (", E::TABLE));
        for (i, (name, value)) in values.into_iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            push_value(&mut builder, E::require_column(name)?, value)?;
        }
        builder.push(")");
        Self::returning(&mut builder);

        let row = builder
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        decode_record::<E>(&row)
    }

    async fn update(&self, id: i64, data: Changeset<E>) -> DomainResult<Option<Record<E>>> {
        debug!(table = E::TABLE, op = "update", id, columns = data.len());
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("UPDATE {} SET {UPDATED_AT} = ", E::TABLE));
        builder.push_bind(self.clock.now());

        for (name, value) in data.into_values() {
            builder.push(", ");
            builder.push(name);
            builder.push(" = ");
            push_value(&mut builder, E::require_column(name)?, value)?;
        }

        builder.push(" WHERE ");
        builder.push(E::PRIMARY_KEY);
        builder.push(" = ");
        builder.push_bind(id);
        Self::returning(&mut builder);

        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        row.as_ref().map(decode_record::<E>).transpose()
    }

    async fn delete(&self, id: i64) -> DomainResult<bool> {
        debug!(table = E::TABLE, op = "delete", id);
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("DELETE FROM {} WHERE {} = ", E::TABLE, E::PRIMARY_KEY));
        builder.push_bind(id);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }
}
