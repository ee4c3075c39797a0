// src/application/services/records/mod.rs
mod create;
mod read;
mod remove;
mod update;

use std::sync::Arc;

use crate::{
    application::services::audit_recorder::AuditRecorder,
    domain::entity::{Entity, RecordRepository},
};

pub use remove::DeleteMode;

/// Tenant-scoped CRUD over one entity, with every mutation audited.
///
/// Reads AND the request's tenant predicate into their conditions and
/// re-check rows fetched by id. Writes pin the tenant column to the
/// request's tenant and hand before/after snapshots to the [`AuditRecorder`].
pub struct ScopedRecordService<E: Entity> {
    repo: Arc<dyn RecordRepository<E>>,
    recorder: Arc<AuditRecorder>,
}

impl<E: Entity> ScopedRecordService<E> {
    pub fn new(repo: Arc<dyn RecordRepository<E>>, recorder: Arc<AuditRecorder>) -> Self {
        Self { repo, recorder }
    }

    /// Unscoped access for checks that span tenants, such as global uniqueness.
    pub(crate) fn repository(&self) -> &dyn RecordRepository<E> {
        self.repo.as_ref()
    }
}
