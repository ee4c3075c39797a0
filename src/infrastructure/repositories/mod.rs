// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_audit_log;
mod postgres_record;
mod row;
mod sql;

pub use error::map_sqlx;
pub use postgres_audit_log::PostgresAuditLogRepository;
pub use postgres_record::PostgresRecordRepository;
