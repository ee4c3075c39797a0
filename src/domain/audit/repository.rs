use crate::domain::audit::entity::{AuditLog, NewAuditLog, RecentActivity};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn insert(&self, log: NewAuditLog) -> DomainResult<AuditLog>;

    /// Entries for one record, oldest first.
    async fn history_for_record(&self, table_name: &str, record_id: i64)
    -> DomainResult<Vec<AuditLog>>;

    /// Entries for a table, optionally narrowed to one record, newest first.
    async fn history_for_table(
        &self,
        table_name: &str,
        record_id: Option<i64>,
    ) -> DomainResult<Vec<AuditLog>>;

    /// Most recent entries, newest first; `tenant_id = None` spans all tenants.
    async fn recent_activity(
        &self,
        tenant_id: Option<i64>,
        limit: u32,
    ) -> DomainResult<Vec<RecentActivity>>;
}
