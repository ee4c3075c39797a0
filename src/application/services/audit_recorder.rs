// src/application/services/audit_recorder.rs
use std::sync::Arc;

use tracing::{debug, error};

use crate::{
    application::{context::RequestContext, ports::time::Clock},
    domain::{
        audit::{AuditAction, AuditLog, AuditLogRepository, NewAuditLog, diff, redact},
        entity::Snapshot,
    },
};

/// What happened to an audit write. Callers never fail because of it.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditOutcome {
    Recorded(AuditLog),
    /// Update with no field changes; nothing was written.
    Unchanged,
    /// The entry could not be stored; the failure has been logged.
    Failed,
}

impl AuditOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, AuditOutcome::Recorded(_))
    }
}

pub struct AuditRecorder {
    repo: Arc<dyn AuditLogRepository>,
    clock: Arc<dyn Clock>,
}

impl AuditRecorder {
    pub fn new(repo: Arc<dyn AuditLogRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub async fn record_create(
        &self,
        ctx: &RequestContext,
        table: &str,
        record_id: i64,
        new_values: Snapshot,
    ) -> AuditOutcome {
        self.write(ctx, table, record_id, AuditAction::Create, None, Some(new_values))
            .await
    }

    /// Stores only the fields that changed between `old_values` and `new_values`.
    pub async fn record_update(
        &self,
        ctx: &RequestContext,
        table: &str,
        record_id: i64,
        old_values: &Snapshot,
        new_values: &Snapshot,
    ) -> AuditOutcome {
        let Some(changes) = diff(old_values, new_values) else {
            debug!(table, record_id, "no field changes; audit entry skipped");
            return AuditOutcome::Unchanged;
        };
        self.write(
            ctx,
            table,
            record_id,
            AuditAction::Update,
            Some(changes.old),
            Some(changes.new),
        )
        .await
    }

    pub async fn record_delete(
        &self,
        ctx: &RequestContext,
        table: &str,
        record_id: i64,
        old_values: Snapshot,
    ) -> AuditOutcome {
        self.write(ctx, table, record_id, AuditAction::Delete, Some(old_values), None)
            .await
    }

    async fn write(
        &self,
        ctx: &RequestContext,
        table: &str,
        record_id: i64,
        action: AuditAction,
        old_values: Option<Snapshot>,
        new_values: Option<Snapshot>,
    ) -> AuditOutcome {
        let client = ctx.client();
        let entry = NewAuditLog {
            table_name: table.to_string(),
            record_id,
            action,
            old_values: old_values.map(redact),
            new_values: new_values.map(redact),
            actor_id: Some(ctx.actor_id()),
            tenant_id: ctx.audit_tenant_id(),
            client_ip: client.ip.clone(),
            client_agent: client.user_agent.clone(),
            created_at: self.clock.now(),
        };

        match self.repo.insert(entry).await {
            Ok(log) => AuditOutcome::Recorded(log),
            Err(err) => {
                error!(
                    table,
                    record_id,
                    action = action.as_str(),
                    error = %err,
                    "failed to persist audit entry"
                );
                AuditOutcome::Failed
            }
        }
    }
}
