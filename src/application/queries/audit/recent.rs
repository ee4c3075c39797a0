use super::{AuditQueryService, common};
use crate::application::{
    context::RequestContext, dto::RecentActivityDto, error::ApplicationResult,
};

impl AuditQueryService {
    /// Latest entries across the caller's scope, newest first. `limit`
    /// defaults to 50 and is capped at 100.
    pub async fn recent_activity(
        &self,
        ctx: &RequestContext,
        limit: Option<u32>,
    ) -> ApplicationResult<Vec<RecentActivityDto>> {
        common::ensure_audit_access(ctx)?;
        let limit = common::normalize_limit(limit);
        let tenant = ctx.scope().tenant_id();
        let items = self.repo.recent_activity(tenant, limit).await?;
        Ok(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::common::normalize_limit;

    #[test]
    fn limit_defaults_and_caps() {
        assert_eq!(normalize_limit(None), 50);
        assert_eq!(normalize_limit(Some(0)), 50);
        assert_eq!(normalize_limit(Some(10)), 10);
        assert_eq!(normalize_limit(Some(500)), 100);
    }
}
