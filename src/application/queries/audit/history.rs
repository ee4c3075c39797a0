use super::{AuditQueryService, common};
use crate::application::{
    context::RequestContext, dto::AuditLogDto, error::ApplicationResult,
};

impl AuditQueryService {
    /// Full change history of one record, oldest first.
    pub async fn record_history(
        &self,
        ctx: &RequestContext,
        table: &str,
        record_id: i64,
    ) -> ApplicationResult<Vec<AuditLogDto>> {
        common::ensure_audit_access(ctx)?;
        common::ensure_table_name(table)?;
        let mut entries = self.repo.history_for_record(table, record_id).await?;
        common::retain_visible(ctx, &mut entries);
        Ok(entries.into_iter().map(Into::into).collect())
    }

    /// Entries for a table, optionally narrowed to one record, newest first.
    pub async fn table_history(
        &self,
        ctx: &RequestContext,
        table: &str,
        record_id: Option<i64>,
    ) -> ApplicationResult<Vec<AuditLogDto>> {
        common::ensure_audit_access(ctx)?;
        common::ensure_table_name(table)?;
        let mut entries = self.repo.history_for_table(table, record_id).await?;
        common::retain_visible(ctx, &mut entries);
        Ok(entries.into_iter().map(Into::into).collect())
    }
}
