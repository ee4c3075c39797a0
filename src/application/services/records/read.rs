// src/application/services/records/read.rs
use super::ScopedRecordService;
use crate::{
    application::{
        context::RequestContext,
        error::ApplicationResult,
        scope::{load_in_scope, scoped_conditions},
    },
    domain::{
        entity::{Entity, Record, Value},
        query::{Conditions, OrderBy, Page, PageRequest},
    },
};

impl<E: Entity> ScopedRecordService<E> {
    pub async fn list(
        &self,
        ctx: &RequestContext,
        conditions: Conditions,
        order_by: &OrderBy,
        limit: Option<u32>,
        offset: Option<u64>,
    ) -> ApplicationResult<Vec<Record<E>>> {
        let conditions = scoped_conditions::<E>(ctx, conditions);
        Ok(self.repo.list(&conditions, order_by, limit, offset).await?)
    }

    pub async fn count(&self, ctx: &RequestContext, conditions: Conditions) -> ApplicationResult<u64> {
        let conditions = scoped_conditions::<E>(ctx, conditions);
        Ok(self.repo.count(&conditions).await?)
    }

    pub async fn paginate(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
        conditions: Conditions,
        order_by: &OrderBy,
    ) -> ApplicationResult<Page<Record<E>>> {
        let conditions = scoped_conditions::<E>(ctx, conditions);
        Ok(self.repo.paginate(page, &conditions, order_by).await?)
    }

    /// First in-scope row whose `column` equals `value`.
    pub async fn find_by(
        &self,
        ctx: &RequestContext,
        column: &str,
        value: Value,
    ) -> ApplicationResult<Option<Record<E>>> {
        let conditions = scoped_conditions::<E>(ctx, Conditions::new().eq(column, value));
        Ok(self.repo.find_first(&conditions).await?)
    }

    /// `NotFound` when no row has this id, `Forbidden` when it belongs to
    /// another tenant.
    pub async fn get(&self, ctx: &RequestContext, id: i64) -> ApplicationResult<Record<E>> {
        load_in_scope(self.repo.as_ref(), ctx, id).await
    }
}
