// src/application/scope.rs
use crate::application::{
    context::RequestContext,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::entity::{Entity, Record, RecordRepository};
use crate::domain::query::Conditions;
use tracing::warn;

/// AND the request's tenant predicate into `conditions` for tenant-owned tables.
pub fn scoped_conditions<E: Entity>(ctx: &RequestContext, conditions: Conditions) -> Conditions {
    match E::TENANT_COLUMN {
        Some(column) => ctx.scope().apply(column, conditions),
        None => conditions,
    }
}

/// Reject a fetched record that lies outside the request's tenant scope.
pub fn ensure_in_scope<E: Entity>(ctx: &RequestContext, record: &Record<E>) -> ApplicationResult<()> {
    if E::TENANT_COLUMN.is_none() || ctx.scope().permits(record.tenant_id()) {
        return Ok(());
    }
    warn!(
        table = E::TABLE,
        record_id = ?record.id(),
        actor_id = ctx.actor_id(),
        "cross-tenant access denied"
    );
    Err(ApplicationError::forbidden(format!(
        "record is outside the tenant scope of {}",
        E::TABLE
    )))
}

/// `find(id)` followed by the scope re-check.
pub async fn load_in_scope<E: Entity>(
    repo: &dyn RecordRepository<E>,
    ctx: &RequestContext,
    id: i64,
) -> ApplicationResult<Record<E>> {
    let record = repo
        .find(id)
        .await?
        .ok_or_else(|| ApplicationError::not_found(format!("{} {id} not found", E::TABLE)))?;
    ensure_in_scope(ctx, &record)?;
    Ok(record)
}
