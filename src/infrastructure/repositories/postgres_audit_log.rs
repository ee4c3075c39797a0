use super::map_sqlx;
use crate::domain::audit::entity::{AuditAction, AuditLog, NewAuditLog, RecentActivity};
use crate::domain::audit::repository::AuditLogRepository;
use crate::domain::entity::Snapshot;
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::debug;

const AUDIT_COLUMNS: &str = "a.id, a.table_name, a.record_id, a.action, a.old_values, a.new_values, \
     a.user_id, a.plantel_id, a.ip_address, a.user_agent, a.created_at";

#[derive(Clone)]
pub struct PostgresAuditLogRepository {
    pool: PgPool,
}

impl PostgresAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuditRow {
    id: i64,
    table_name: String,
    record_id: i64,
    action: String,
    old_values: Option<Value>,
    new_values: Option<Value>,
    user_id: Option<i64>,
    plantel_id: Option<i64>,
    ip_address: Option<String>,
    user_agent: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct RecentRow {
    #[sqlx(flatten)]
    entry: AuditRow,
    user_name: Option<String>,
    user_email: Option<String>,
}

fn into_snapshot(value: Option<Value>) -> Option<Snapshot> {
    match value {
        Some(Value::Object(map)) => Some(map),
        _ => None,
    }
}

impl TryFrom<AuditRow> for AuditLog {
    type Error = DomainError;

    fn try_from(row: AuditRow) -> Result<Self, Self::Error> {
        Ok(AuditLog {
            id: row.id,
            table_name: row.table_name,
            record_id: row.record_id,
            action: row.action.parse::<AuditAction>()?,
            old_values: into_snapshot(row.old_values),
            new_values: into_snapshot(row.new_values),
            actor_id: row.user_id,
            tenant_id: row.plantel_id,
            client_ip: row.ip_address,
            client_agent: row.user_agent,
            created_at: row.created_at,
        })
    }
}

fn collect(rows: Vec<AuditRow>) -> DomainResult<Vec<AuditLog>> {
    rows.into_iter().map(AuditLog::try_from).collect()
}

#[async_trait]
impl AuditLogRepository for PostgresAuditLogRepository {
    async fn insert(&self, log: NewAuditLog) -> DomainResult<AuditLog> {
        debug!(table = %log.table_name, record_id = log.record_id, action = log.action.as_str(), "writing audit entry");
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO audit_logs (table_name, record_id, action, old_values, new_values, user_id, plantel_id, ip_address, user_agent, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(log.table_name.as_str())
        .bind(log.record_id)
        .bind(log.action.as_str())
        .bind(log.old_values.clone().map(Value::Object))
        .bind(log.new_values.clone().map(Value::Object))
        .bind(log.actor_id)
        .bind(log.tenant_id)
        .bind(log.client_ip.as_deref())
        .bind(log.client_agent.as_deref())
        .bind(log.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(AuditLog::from_new(id, log))
    }

    async fn history_for_record(
        &self,
        table_name: &str,
        record_id: i64,
    ) -> DomainResult<Vec<AuditLog>> {
        let rows = sqlx::query_as::<_, AuditRow>(&format!(
            "SELECT {AUDIT_COLUMNS} FROM audit_logs a
             WHERE a.table_name = $1 AND a.record_id = $2
             ORDER BY a.created_at ASC, a.id ASC"
        ))
        .bind(table_name)
        .bind(record_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        collect(rows)
    }

    async fn history_for_table(
        &self,
        table_name: &str,
        record_id: Option<i64>,
    ) -> DomainResult<Vec<AuditLog>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {AUDIT_COLUMNS} FROM audit_logs a WHERE a.table_name = "
        ));
        builder.push_bind(table_name.to_string());
        if let Some(record_id) = record_id {
            builder.push(" AND a.record_id = ");
            builder.push_bind(record_id);
        }
        builder.push(" ORDER BY a.created_at DESC, a.id DESC");

        let rows = builder
            .build_query_as::<AuditRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        collect(rows)
    }

    async fn recent_activity(
        &self,
        tenant_id: Option<i64>,
        limit: u32,
    ) -> DomainResult<Vec<RecentActivity>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {AUDIT_COLUMNS}, u.name AS user_name, u.email AS user_email
             FROM audit_logs a LEFT JOIN users u ON u.id = a.user_id"
        ));
        if let Some(tenant_id) = tenant_id {
            builder.push(" WHERE a.plantel_id = ");
            builder.push_bind(tenant_id);
        }
        builder.push(" ORDER BY a.created_at DESC, a.id DESC LIMIT ");
        builder.push_bind(i64::from(limit));

        let rows = builder
            .build_query_as::<RecentRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter()
            .map(|row| {
                Ok(RecentActivity {
                    entry: AuditLog::try_from(row.entry)?,
                    actor_name: row.user_name,
                    actor_email: row.user_email,
                })
            })
            .collect()
    }
}
