pub mod diff;
pub mod entity;
pub mod repository;

pub use diff::{AuditDiff, REDACTED, SENSITIVE_FIELDS, diff, redact};
pub use entity::{AuditAction, AuditLog, FieldChange, NewAuditLog, RecentActivity};
pub use repository::AuditLogRepository;
