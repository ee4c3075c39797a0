// src/domain/audit/entity.rs
use crate::domain::entity::Snapshot;
use crate::domain::errors::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(AuditAction::Create),
            "update" => Ok(AuditAction::Update),
            "delete" => Ok(AuditAction::Delete),
            other => Err(DomainError::Validation(format!("unknown audit action '{other}'"))),
        }
    }
}

/// An entry about to be appended to the audit table.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditLog {
    pub table_name: String,
    pub record_id: i64,
    pub action: AuditAction,
    pub old_values: Option<Snapshot>,
    pub new_values: Option<Snapshot>,
    pub actor_id: Option<i64>,
    pub tenant_id: Option<i64>,
    pub client_ip: Option<String>,
    pub client_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A persisted audit entry. Entries are append-only.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditLog {
    pub id: i64,
    pub table_name: String,
    pub record_id: i64,
    pub action: AuditAction,
    pub old_values: Option<Snapshot>,
    pub new_values: Option<Snapshot>,
    pub actor_id: Option<i64>,
    pub tenant_id: Option<i64>,
    pub client_ip: Option<String>,
    pub client_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChange {
    pub old: Value,
    pub new: Value,
}

impl AuditLog {
    pub fn from_new(id: i64, entry: NewAuditLog) -> Self {
        Self {
            id,
            table_name: entry.table_name,
            record_id: entry.record_id,
            action: entry.action,
            old_values: entry.old_values,
            new_values: entry.new_values,
            actor_id: entry.actor_id,
            tenant_id: entry.tenant_id,
            client_ip: entry.client_ip,
            client_agent: entry.client_agent,
            created_at: entry.created_at,
        }
    }

    /// Per-field old/new pairs for update entries; empty for other actions.
    pub fn changes(&self) -> Vec<(String, FieldChange)> {
        if self.action != AuditAction::Update {
            return Vec::new();
        }
        let Some(new_values) = self.new_values.as_ref() else {
            return Vec::new();
        };
        new_values
            .iter()
            .map(|(key, new)| {
                let old = self
                    .old_values
                    .as_ref()
                    .and_then(|old| old.get(key))
                    .cloned()
                    .unwrap_or(Value::Null);
                (
                    key.clone(),
                    FieldChange {
                        old,
                        new: new.clone(),
                    },
                )
            })
            .collect()
    }
}

/// An audit entry joined with the display details of its actor.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentActivity {
    pub entry: AuditLog,
    pub actor_name: Option<String>,
    pub actor_email: Option<String>,
}
