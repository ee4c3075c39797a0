// src/application/services/records/update.rs
use super::ScopedRecordService;
use crate::{
    application::{
        context::RequestContext,
        error::{ApplicationError, ApplicationResult},
        scope::load_in_scope,
    },
    domain::entity::{Changeset, Entity, Record},
};
use tracing::{info, warn};

impl<E: Entity> ScopedRecordService<E> {
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        data: Changeset<E>,
    ) -> ApplicationResult<Record<E>> {
        let current = load_in_scope(self.repo.as_ref(), ctx, id).await?;
        if let Some(column) = E::TENANT_COLUMN {
            ensure_tenant_kept(ctx, column, &data)?;
        }

        let before = current.snapshot();
        let updated = self
            .repo
            .update(id, data)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("{} {id} not found", E::TABLE)))?;

        self.recorder
            .record_update(ctx, E::TABLE, id, &before, &updated.snapshot())
            .await;
        info!(table = E::TABLE, record_id = id, actor_id = ctx.actor_id(), "record updated");
        Ok(updated)
    }
}

fn ensure_tenant_kept<E: Entity>(
    ctx: &RequestContext,
    column: &str,
    data: &Changeset<E>,
) -> ApplicationResult<()> {
    let Some(target) = data.get(column) else {
        return Ok(());
    };
    if ctx.scope().permits(target.as_i64()) {
        return Ok(());
    }
    warn!(
        table = E::TABLE,
        actor_id = ctx.actor_id(),
        "attempt to move record out of tenant scope"
    );
    Err(ApplicationError::forbidden(format!(
        "{column} cannot be changed to another plantel"
    )))
}
