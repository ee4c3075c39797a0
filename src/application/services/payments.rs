// src/application/services/payments.rs
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use super::records::ScopedRecordService;
use crate::{
    application::{
        context::RequestContext,
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        entity::{Changeset, Record, Value},
        school::{Payment, Student},
    },
};

pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_CANCELLED: &str = "cancelled";
pub const STATUS_REFUNDED: &str = "refunded";
pub const PAYMENT_STATUSES: &[&str] = &[
    STATUS_COMPLETED,
    STATUS_PENDING,
    STATUS_CANCELLED,
    STATUS_REFUNDED,
];

/// Columns that stay editable once a payment is completed.
pub const COMPLETED_EDITABLE: &[&str] = &["notes", "status"];

const DEFAULT_CANCEL_REASON: &str = "no reason given";
const REFERENCE_ATTEMPTS: usize = 5;
const AMOUNT_COLUMNS: &[&str] = &["amount", "discount", "late_fee"];

/// Payment workflows layered on the scoped record services.
pub struct PaymentCommandService {
    payments: Arc<ScopedRecordService<Payment>>,
    students: Arc<ScopedRecordService<Student>>,
    clock: Arc<dyn Clock>,
}

impl PaymentCommandService {
    pub fn new(
        payments: Arc<ScopedRecordService<Payment>>,
        students: Arc<ScopedRecordService<Student>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            payments,
            students,
            clock,
        }
    }

    /// Register a payment for an in-scope student.
    ///
    /// The cashier is the calling actor, the plantel is the student's,
    /// `total = amount - discount + late_fee` and the status is always
    /// `completed`. A `PAY-YYYYMMDD-XXXXXX` reference is generated.
    pub async fn record(
        &self,
        ctx: &RequestContext,
        mut data: Changeset<Payment>,
    ) -> ApplicationResult<Record<Payment>> {
        let student_id = data
            .get("student_id")
            .and_then(Value::as_i64)
            .ok_or_else(|| ApplicationError::validation("student_id is required"))?;
        let student = self.student_in_scope(ctx, student_id).await?;

        if let Some(plantel_id) = student.tenant_id() {
            match data.get("plantel_id").and_then(Value::as_i64) {
                Some(requested) if requested != plantel_id => {
                    return Err(ApplicationError::validation(
                        "student belongs to another plantel",
                    ));
                }
                _ => data.insert("plantel_id", Value::Integer(plantel_id))?,
            }
        }

        data.insert("user_id", Value::Integer(ctx.actor_id()))?;
        fill_amounts(&mut data)?;
        data.insert("status", Value::from(STATUS_COMPLETED))?;
        let reference = self.next_reference().await?;
        data.insert("reference_number", Value::from(reference))?;

        let payment = self.payments.create(ctx, data).await?;
        info!(payment_id = ?payment.id(), student_id, "payment recorded");
        Ok(payment)
    }

    /// Edit a payment. Completed payments only accept `notes` and `status`;
    /// otherwise a new student must be in scope and in the payment's plantel,
    /// and money changes re-derive the total.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        mut data: Changeset<Payment>,
    ) -> ApplicationResult<Record<Payment>> {
        let payment = self.payments.get(ctx, id).await?;

        for column in ["user_id", "reference_number", "total", "plantel_id"] {
            data.remove(column);
        }
        if payment.get("status").as_str() == Some(STATUS_COMPLETED) {
            data.retain(COMPLETED_EDITABLE);
        }

        if let Some(status) = data.get("status") {
            if !status.as_str().is_some_and(|s| PAYMENT_STATUSES.contains(&s)) {
                return Err(ApplicationError::validation(format!(
                    "status must be one of {}",
                    PAYMENT_STATUSES.join(", ")
                )));
            }
        }

        if let Some(raw) = data.get("student_id") {
            let student_id = raw
                .as_i64()
                .ok_or_else(|| ApplicationError::validation("student_id must be an integer"))?;
            let student = self.student_in_scope(ctx, student_id).await?;
            if student.tenant_id() != payment.tenant_id() {
                warn!(
                    payment_id = id,
                    student_id,
                    actor_id = ctx.actor_id(),
                    "payment re-pointed at a student of another plantel"
                );
                return Err(ApplicationError::validation(
                    "student belongs to another plantel",
                ));
            }
        }

        if AMOUNT_COLUMNS.iter().any(|column| data.contains(column)) {
            for column in AMOUNT_COLUMNS {
                if !data.contains(column) {
                    data.insert(column, payment.get(column).clone())?;
                }
            }
            fill_amounts(&mut data)?;
        }

        self.payments.update(ctx, id, data).await
    }

    pub async fn cancel(
        &self,
        ctx: &RequestContext,
        id: i64,
        reason: Option<&str>,
    ) -> ApplicationResult<Record<Payment>> {
        let payment = self.payments.get(ctx, id).await?;
        if payment.get("status").as_str() == Some(STATUS_CANCELLED) {
            return Err(ApplicationError::validation("payment is already cancelled"));
        }

        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_CANCEL_REASON);
        let notes = match payment.get("notes").as_str() {
            Some(existing) if !existing.is_empty() => format!("{existing}\n[CANCELLED] {reason}"),
            _ => format!("[CANCELLED] {reason}"),
        };

        let data = Changeset::new()
            .set("status", STATUS_CANCELLED)?
            .set("notes", notes)?;
        self.payments.update(ctx, id, data).await
    }

    /// A missing student is a validation error; a foreign one stays `Forbidden`.
    async fn student_in_scope(
        &self,
        ctx: &RequestContext,
        student_id: i64,
    ) -> ApplicationResult<Record<Student>> {
        self.students.get(ctx, student_id).await.map_err(|err| {
            if err.is_not_found() {
                ApplicationError::validation(format!("student {student_id} does not exist"))
            } else {
                err
            }
        })
    }

    /// References are unique across planteles, so the lookup is unscoped.
    async fn next_reference(&self) -> ApplicationResult<String> {
        for _ in 0..REFERENCE_ATTEMPTS {
            let reference = reference_number(self.clock.now(), Uuid::new_v4());
            let taken = self
                .payments
                .repository()
                .find_by("reference_number", Value::from(reference.as_str()))
                .await?;
            if taken.is_none() {
                return Ok(reference);
            }
        }
        Err(ApplicationError::conflict(
            "could not allocate a unique payment reference",
        ))
    }
}

fn reference_number(now: DateTime<Utc>, seed: Uuid) -> String {
    let hex = seed.simple().to_string();
    format!("PAY-{}-{}", now.format("%Y%m%d"), hex[..6].to_ascii_uppercase())
}

fn decimal(data: &Changeset<Payment>, column: &str) -> Option<Decimal> {
    match data.get(column) {
        Some(Value::Decimal(d)) => Some(*d),
        _ => None,
    }
}

fn fill_amounts(data: &mut Changeset<Payment>) -> ApplicationResult<()> {
    let amount = decimal(data, "amount")
        .ok_or_else(|| ApplicationError::validation("amount is required"))?;
    if amount.is_sign_negative() {
        return Err(ApplicationError::validation("amount cannot be negative"));
    }
    let discount = decimal(data, "discount").unwrap_or(Decimal::ZERO);
    let late_fee = decimal(data, "late_fee").unwrap_or(Decimal::ZERO);

    data.insert("discount", Value::Decimal(discount))?;
    data.insert("late_fee", Value::Decimal(late_fee))?;
    data.insert("total", Value::Decimal(amount - discount + late_fee))?;
    Ok(())
}
