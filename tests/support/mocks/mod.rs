// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod audit;
pub mod records;
pub mod security;
pub mod time;

pub use audit::{FailingAuditRepo, MemoryAuditRepo};
pub use records::MemoryRecordRepository;
pub use security::{
    ADMIN_TOKEN, CONSULTA_TOKEN, CONTADOR_TOKEN, EXPIRED_TOKEN, OTHER_PLANTEL_TOKEN,
    PLANTEL_A, PLANTEL_B, StaticAuthenticator, UNASSIGNED_TOKEN,
};
pub use time::{TestClock, fixed_now};
