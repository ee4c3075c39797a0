use crate::domain::audit::entity::{AuditLog, RecentActivity};
use crate::domain::entity::Snapshot;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChangeDto {
    pub old: Value,
    pub new: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditLogDto {
    pub id: i64,
    pub table_name: String,
    pub record_id: i64,
    pub action: String,
    pub old_values: Option<Snapshot>,
    pub new_values: Option<Snapshot>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub changes: BTreeMap<String, FieldChangeDto>,
    pub user_id: Option<i64>,
    pub plantel_id: Option<i64>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<AuditLog> for AuditLogDto {
    fn from(a: AuditLog) -> Self {
        let changes = a
            .changes()
            .into_iter()
            .map(|(key, change)| {
                (
                    key,
                    FieldChangeDto {
                        old: change.old,
                        new: change.new,
                    },
                )
            })
            .collect();
        Self {
            id: a.id,
            table_name: a.table_name,
            record_id: a.record_id,
            action: a.action.as_str().to_string(),
            old_values: a.old_values,
            new_values: a.new_values,
            changes,
            user_id: a.actor_id,
            plantel_id: a.tenant_id,
            ip_address: a.client_ip,
            user_agent: a.client_agent,
            created_at: a.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentActivityDto {
    #[serde(flatten)]
    pub entry: AuditLogDto,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

impl From<RecentActivity> for RecentActivityDto {
    fn from(a: RecentActivity) -> Self {
        Self {
            entry: a.entry.into(),
            user_name: a.actor_name,
            user_email: a.actor_email,
        }
    }
}
