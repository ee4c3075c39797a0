// src/application/services/records/remove.rs
use super::ScopedRecordService;
use crate::{
    application::{
        context::RequestContext,
        error::{ApplicationError, ApplicationResult},
        scope::load_in_scope,
    },
    domain::entity::Entity,
};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteMode {
    /// Mark the row `status = inactive`.
    #[default]
    Soft,
    Hard,
}

impl<E: Entity> ScopedRecordService<E> {
    pub async fn remove(
        &self,
        ctx: &RequestContext,
        id: i64,
        mode: DeleteMode,
    ) -> ApplicationResult<()> {
        let current = load_in_scope(self.repo.as_ref(), ctx, id).await?;

        let removed = match mode {
            DeleteMode::Soft => self.repo.soft_delete(id).await?,
            DeleteMode::Hard => self.repo.delete(id).await?,
        };
        if !removed {
            return Err(ApplicationError::not_found(format!("{} {id} not found", E::TABLE)));
        }

        self.recorder
            .record_delete(ctx, E::TABLE, id, current.snapshot())
            .await;
        info!(table = E::TABLE, record_id = id, actor_id = ctx.actor_id(), ?mode, "record removed");
        Ok(())
    }
}
