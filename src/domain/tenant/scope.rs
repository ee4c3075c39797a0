// src/domain/tenant/scope.rs
use super::value_objects::{Actor, ActorId};
use crate::domain::query::{Condition, Conditions};

/// Tenant id compared against when a restricted actor has no tenant of its
/// own. Surrogate ids start at 1, so the resulting predicate matches no row.
pub const UNRESOLVED_TENANT_ID: i64 = 0;

/// Effective tenant restriction for one request.
///
/// Built once per request from the authenticated actor. A non-privileged
/// actor is always pinned to its own tenant; only a privileged actor may
/// pick a tenant (or none) through the override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    actor_id: ActorId,
    privileged: bool,
    effective_tenant_id: Option<i64>,
}

impl TenantContext {
    pub fn resolve(actor: &Actor, requested_override: Option<i64>) -> Self {
        let privileged = actor.is_privileged();
        let effective_tenant_id = if privileged {
            requested_override
        } else {
            actor.tenant_id.map(i64::from)
        };

        Self {
            actor_id: actor.id,
            privileged,
            effective_tenant_id,
        }
    }

    pub fn actor_id(&self) -> ActorId {
        self.actor_id
    }

    pub fn is_privileged(&self) -> bool {
        self.privileged
    }

    pub fn effective_tenant_id(&self) -> Option<i64> {
        self.effective_tenant_id
    }

    pub fn scope(&self) -> TenantScope {
        match (self.privileged, self.effective_tenant_id) {
            (true, None) => TenantScope::Unrestricted,
            (_, Some(id)) => TenantScope::Tenant(id),
            (false, None) => TenantScope::Tenant(UNRESOLVED_TENANT_ID),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantScope {
    /// Privileged actor without an override: every tenant is visible.
    Unrestricted,
    Tenant(i64),
}

impl TenantScope {
    /// Row filter on `column`; `None` is the unconditional predicate.
    pub fn predicate(&self, column: &str) -> Option<Condition> {
        match self {
            TenantScope::Unrestricted => None,
            TenantScope::Tenant(id) => Some(Condition::eq(column, *id)),
        }
    }

    /// AND the scope predicate into `conditions`.
    pub fn apply(&self, column: &str, conditions: Conditions) -> Conditions {
        match self.predicate(column) {
            Some(predicate) => conditions.and(predicate),
            None => conditions,
        }
    }

    /// Whether a row owned by `tenant` is inside the scope.
    pub fn permits(&self, tenant: Option<i64>) -> bool {
        match self {
            TenantScope::Unrestricted => true,
            TenantScope::Tenant(id) => tenant == Some(*id),
        }
    }

    pub fn tenant_id(&self) -> Option<i64> {
        match self {
            TenantScope::Unrestricted => None,
            TenantScope::Tenant(id) => Some(*id),
        }
    }
}
