// src/domain/tenant/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(i64);

impl TenantId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("tenant id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<TenantId> for i64 {
    fn from(value: TenantId) -> Self {
        value.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(i64);

impl ActorId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("actor id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<ActorId> for i64 {
    fn from(value: ActorId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Contador,
    #[default]
    Consulta,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Contador => "contador",
            Role::Consulta => "consulta",
        }
    }

    /// Privileged roles are not pinned to a single tenant.
    pub fn is_privileged(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "contador" => Ok(Role::Contador),
            "consulta" => Ok(Role::Consulta),
            other => Err(DomainError::Validation(format!("unknown role '{other}'"))),
        }
    }
}

/// The authenticated caller, as established by the authentication pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: ActorId,
    pub role: Role,
    pub tenant_id: Option<TenantId>,
}

impl Actor {
    pub fn new(id: ActorId, role: Role, tenant_id: Option<TenantId>) -> Self {
        Self { id, role, tenant_id }
    }

    pub fn is_privileged(&self) -> bool {
        self.role.is_privileged()
    }
}
