// src/application/services/records/create.rs
use super::ScopedRecordService;
use crate::{
    application::{
        context::RequestContext,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        entity::{Changeset, Entity, Record, Value},
        tenant::{TenantScope, UNRESOLVED_TENANT_ID},
    },
};
use tracing::info;

impl<E: Entity> ScopedRecordService<E> {
    pub async fn create(
        &self,
        ctx: &RequestContext,
        mut data: Changeset<E>,
    ) -> ApplicationResult<Record<E>> {
        if let Some(column) = E::TENANT_COLUMN {
            assign_tenant(ctx, column, &mut data)?;
        }

        let record = self.repo.create(data).await?;
        let id = record.id().ok_or_else(|| {
            ApplicationError::infrastructure(format!("{} row stored without an id", E::TABLE))
        })?;

        self.recorder
            .record_create(ctx, E::TABLE, id, record.snapshot())
            .await;
        info!(table = E::TABLE, record_id = id, actor_id = ctx.actor_id(), "record created");
        Ok(record)
    }
}

/// Restricted callers always write into their own tenant; an unrestricted
/// caller has to name the tenant explicitly.
fn assign_tenant<E: Entity>(
    ctx: &RequestContext,
    column: &'static str,
    data: &mut Changeset<E>,
) -> ApplicationResult<()> {
    match ctx.scope() {
        TenantScope::Tenant(UNRESOLVED_TENANT_ID) => Err(ApplicationError::forbidden(
            "actor is not assigned to a plantel",
        )),
        TenantScope::Tenant(tenant) => {
            data.insert(column, Value::Integer(tenant))?;
            Ok(())
        }
        TenantScope::Unrestricted => match data.get(column) {
            Some(value) if !value.is_null() => Ok(()),
            _ => Err(ApplicationError::validation(format!("{column} is required"))),
        },
    }
}
