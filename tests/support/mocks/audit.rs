// tests/support/mocks/audit.rs
use async_trait::async_trait;
use campus_core::domain::audit::{AuditLog, AuditLogRepository, NewAuditLog, RecentActivity};
use campus_core::domain::errors::{DomainError, DomainResult};
use std::collections::HashMap;
use std::sync::Mutex;

/// Audit store kept in a vector, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryAuditRepo {
    entries: Mutex<Vec<AuditLog>>,
    users: HashMap<i64, (String, String)>,
}

impl MemoryAuditRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display name and email joined into recent activity.
    pub fn with_user(mut self, id: i64, name: &str, email: &str) -> Self {
        self.users.insert(id, (name.to_string(), email.to_string()));
        self
    }

    pub fn entries(&self) -> Vec<AuditLog> {
        self.entries.lock().expect("audit mutex poisoned").clone()
    }

    /// Store an entry as-is, as history written by an earlier request.
    pub fn seed(&self, entry: NewAuditLog) -> AuditLog {
        let mut entries = self.entries.lock().expect("audit mutex poisoned");
        let log = AuditLog::from_new(entries.len() as i64 + 1, entry);
        entries.push(log.clone());
        log
    }
}

#[async_trait]
impl AuditLogRepository for MemoryAuditRepo {
    async fn insert(&self, log: NewAuditLog) -> DomainResult<AuditLog> {
        Ok(self.seed(log))
    }

    async fn history_for_record(
        &self,
        table_name: &str,
        record_id: i64,
    ) -> DomainResult<Vec<AuditLog>> {
        let mut items: Vec<AuditLog> = self
            .entries()
            .into_iter()
            .filter(|e| e.table_name == table_name && e.record_id == record_id)
            .collect();
        items.sort_by_key(|e| (e.created_at, e.id));
        Ok(items)
    }

    async fn history_for_table(
        &self,
        table_name: &str,
        record_id: Option<i64>,
    ) -> DomainResult<Vec<AuditLog>> {
        let mut items: Vec<AuditLog> = self
            .entries()
            .into_iter()
            .filter(|e| e.table_name == table_name)
            .filter(|e| record_id.is_none_or(|id| e.record_id == id))
            .collect();
        items.sort_by_key(|e| std::cmp::Reverse((e.created_at, e.id)));
        Ok(items)
    }

    async fn recent_activity(
        &self,
        tenant_id: Option<i64>,
        limit: u32,
    ) -> DomainResult<Vec<RecentActivity>> {
        let mut items: Vec<AuditLog> = self
            .entries()
            .into_iter()
            .filter(|e| tenant_id.is_none() || e.tenant_id == tenant_id)
            .collect();
        items.sort_by_key(|e| std::cmp::Reverse((e.created_at, e.id)));
        Ok(items
            .into_iter()
            .take(limit as usize)
            .map(|entry| {
                let user = entry.actor_id.and_then(|id| self.users.get(&id));
                RecentActivity {
                    actor_name: user.map(|(name, _)| name.clone()),
                    actor_email: user.map(|(_, email)| email.clone()),
                    entry,
                }
            })
            .collect())
    }
}

/// Audit store that is always down.
#[derive(Debug, Default)]
pub struct FailingAuditRepo;

fn offline() -> DomainError {
    DomainError::Persistence("audit store offline".into())
}

#[async_trait]
impl AuditLogRepository for FailingAuditRepo {
    async fn insert(&self, _log: NewAuditLog) -> DomainResult<AuditLog> {
        Err(offline())
    }

    async fn history_for_record(&self, _: &str, _: i64) -> DomainResult<Vec<AuditLog>> {
        Err(offline())
    }

    async fn history_for_table(&self, _: &str, _: Option<i64>) -> DomainResult<Vec<AuditLog>> {
        Err(offline())
    }

    async fn recent_activity(&self, _: Option<i64>, _: u32) -> DomainResult<Vec<RecentActivity>> {
        Err(offline())
    }
}
