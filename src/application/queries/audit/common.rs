use crate::{
    application::{
        context::RequestContext,
        error::{ApplicationError, ApplicationResult},
    },
    domain::audit::AuditLog,
};

pub const DEFAULT_RECENT_LIMIT: u32 = 50;
pub const MAX_RECENT_LIMIT: u32 = 100;

pub(super) fn normalize_limit(limit: Option<u32>) -> u32 {
    match limit {
        None | Some(0) => DEFAULT_RECENT_LIMIT,
        Some(limit) => limit.min(MAX_RECENT_LIMIT),
    }
}

/// Audit trails are only exposed to administrators.
pub(super) fn ensure_audit_access(ctx: &RequestContext) -> ApplicationResult<()> {
    if ctx.actor().is_privileged() {
        Ok(())
    } else {
        Err(ApplicationError::forbidden("audit trail requires the admin role"))
    }
}

pub(super) fn ensure_table_name(table: &str) -> ApplicationResult<()> {
    let valid = !table.is_empty()
        && table
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ApplicationError::validation(format!("invalid table name '{table}'")))
    }
}

/// Restricted callers only see entries stamped with their own tenant.
pub(super) fn retain_visible(ctx: &RequestContext, entries: &mut Vec<AuditLog>) {
    let scope = ctx.scope();
    entries.retain(|entry| scope.permits(entry.tenant_id));
}
