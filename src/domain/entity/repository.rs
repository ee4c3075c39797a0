// src/domain/entity/repository.rs
use super::record::{Changeset, Record};
use super::schema::{Entity, STATUS};
use super::value::Value;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::query::{Condition, Conditions, OrderBy, Page, PageRequest};
use async_trait::async_trait;

pub const STATUS_INACTIVE: &str = "inactive";

/// Generic CRUD over one entity table.
///
/// Lookups that find nothing return `Ok(None)`; errors are reserved for
/// malformed input and storage failures. Callers working on tenant-owned
/// tables are expected to AND the tenant predicate into `conditions`.
#[async_trait]
pub trait RecordRepository<E: Entity>: Send + Sync {
    async fn find(&self, id: i64) -> DomainResult<Option<Record<E>>>;

    async fn find_first(&self, conditions: &Conditions) -> DomainResult<Option<Record<E>>>;

    async fn list(
        &self,
        conditions: &Conditions,
        order_by: &OrderBy,
        limit: Option<u32>,
        offset: Option<u64>,
    ) -> DomainResult<Vec<Record<E>>>;

    async fn count(&self, conditions: &Conditions) -> DomainResult<u64>;

    /// Stamps `created_at`/`updated_at` and returns the stored row.
    async fn create(&self, data: Changeset<E>) -> DomainResult<Record<E>>;

    /// Stamps `updated_at`; `None` when no row has this id.
    async fn update(&self, id: i64, data: Changeset<E>) -> DomainResult<Option<Record<E>>>;

    /// Hard delete; reports whether a row was removed.
    async fn delete(&self, id: i64) -> DomainResult<bool>;

    async fn find_by(&self, column: &str, value: Value) -> DomainResult<Option<Record<E>>> {
        self.find_first(&Conditions::new().and(Condition::eq(column, value)))
            .await
    }

    async fn exists(&self, id: i64) -> DomainResult<bool> {
        Ok(self.find(id).await?.is_some())
    }

    async fn soft_delete(&self, id: i64) -> DomainResult<bool> {
        if E::column(STATUS).is_none() {
            return Err(DomainError::Validation(format!(
                "{} has no status column to soft delete with",
                E::TABLE
            )));
        }
        let data = Changeset::new().set(STATUS, STATUS_INACTIVE)?;
        Ok(self.update(id, data).await?.is_some())
    }

    async fn paginate(
        &self,
        page: PageRequest,
        conditions: &Conditions,
        order_by: &OrderBy,
    ) -> DomainResult<Page<Record<E>>> {
        let total = self.count(conditions).await?;
        let items = self
            .list(conditions, order_by, Some(page.per_page()), Some(page.offset()))
            .await?;
        Ok(Page::new(items, page, total))
    }
}
