pub mod audit;

pub use audit::{AuditLogDto, FieldChangeDto, RecentActivityDto};
