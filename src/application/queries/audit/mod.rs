mod common;
mod history;
mod recent;
mod service;

pub use common::{DEFAULT_RECENT_LIMIT, MAX_RECENT_LIMIT};
pub use service::AuditQueryService;
