// src/application/services/mod.rs
pub mod audit_recorder;
pub mod payments;
pub mod records;

use std::sync::Arc;

use crate::{
    application::{
        ports::{security::Authenticator, time::Clock},
        queries::audit::AuditQueryService,
    },
    domain::{
        audit::AuditLogRepository,
        entity::{Entity, RecordRepository},
        school::{Payment, Student},
    },
};

pub use audit_recorder::{AuditOutcome, AuditRecorder};
pub use payments::PaymentCommandService;
pub use records::{DeleteMode, ScopedRecordService};

pub struct ApplicationServices {
    pub students: Arc<ScopedRecordService<Student>>,
    pub payments: Arc<ScopedRecordService<Payment>>,
    pub payment_commands: Arc<PaymentCommandService>,
    pub audit_queries: Arc<AuditQueryService>,
    pub audit_recorder: Arc<AuditRecorder>,
    authenticator: Arc<dyn Authenticator>,
}

impl ApplicationServices {
    pub fn new(
        student_repo: Arc<dyn RecordRepository<Student>>,
        payment_repo: Arc<dyn RecordRepository<Payment>>,
        audit_log_repo: Arc<dyn AuditLogRepository>,
        authenticator: Arc<dyn Authenticator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let audit_recorder = Arc::new(AuditRecorder::new(
            Arc::clone(&audit_log_repo),
            Arc::clone(&clock),
        ));

        let students = Arc::new(ScopedRecordService::new(
            student_repo,
            Arc::clone(&audit_recorder),
        ));
        let payments = Arc::new(ScopedRecordService::new(
            payment_repo,
            Arc::clone(&audit_recorder),
        ));
        let payment_commands = Arc::new(PaymentCommandService::new(
            Arc::clone(&payments),
            Arc::clone(&students),
            Arc::clone(&clock),
        ));
        let audit_queries = Arc::new(AuditQueryService::new(audit_log_repo));

        Self {
            students,
            payments,
            payment_commands,
            audit_queries,
            audit_recorder,
            authenticator,
        }
    }

    pub fn authenticator(&self) -> Arc<dyn Authenticator> {
        Arc::clone(&self.authenticator)
    }
}

/// Lookup of the scoped service for an entity, used by generic handlers.
pub trait RecordServices<E: Entity> {
    fn records(&self) -> &Arc<ScopedRecordService<E>>;
}

impl RecordServices<Student> for ApplicationServices {
    fn records(&self) -> &Arc<ScopedRecordService<Student>> {
        &self.students
    }
}

impl RecordServices<Payment> for ApplicationServices {
    fn records(&self) -> &Arc<ScopedRecordService<Payment>> {
        &self.payments
    }
}
