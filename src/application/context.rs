// src/application/context.rs
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::tenant::{Actor, Role, TenantContext, TenantScope};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Per-request state: who is calling, which tenant they are scoped to and
/// where the request came from. Built once after authentication and passed
/// explicitly to every service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    actor: Actor,
    tenant: TenantContext,
    client: ClientInfo,
}

impl RequestContext {
    pub fn new(actor: Actor, tenant_override: Option<i64>, client: ClientInfo) -> Self {
        let tenant = TenantContext::resolve(&actor, tenant_override);
        Self {
            actor,
            tenant,
            client,
        }
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn tenant(&self) -> &TenantContext {
        &self.tenant
    }

    pub fn scope(&self) -> TenantScope {
        self.tenant.scope()
    }

    pub fn client(&self) -> &ClientInfo {
        &self.client
    }

    pub fn actor_id(&self) -> i64 {
        self.actor.id.into()
    }

    /// Admins pass every role gate; other actors must hold one of `allowed`.
    pub fn require_role(&self, allowed: &[Role]) -> ApplicationResult<()> {
        if self.actor.is_privileged() || allowed.contains(&self.actor.role) {
            Ok(())
        } else {
            Err(ApplicationError::forbidden(format!(
                "role {} may not perform this action",
                self.actor.role
            )))
        }
    }

    /// Tenant stamped on audit entries: the effective tenant, falling back
    /// to the actor's own tenant for unrestricted privileged callers.
    pub fn audit_tenant_id(&self) -> Option<i64> {
        self.tenant
            .effective_tenant_id()
            .or_else(|| self.actor.tenant_id.map(i64::from))
    }
}
