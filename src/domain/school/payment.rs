use crate::domain::entity::{CastKind::*, Column, Entity};

/// A received payment. Money columns are exact decimals.
///
/// `user_id`, `total` and `reference_number` are filled by the payment
/// workflow and never taken from input.
pub struct Payment;

impl Entity for Payment {
    const TABLE: &'static str = "payments";
    const COLUMNS: &'static [Column] = &[
        Column::new("id", Integer),
        Column::new("plantel_id", Integer),
        Column::new("student_id", Integer),
        Column::new("cycle_id", Integer),
        Column::new("user_id", Integer),
        Column::new("concept_type", Text),
        Column::new("concept_id", Integer),
        Column::new("concept_description", Text),
        Column::new("amount", Decimal),
        Column::new("discount", Decimal),
        Column::new("late_fee", Decimal),
        Column::new("total", Decimal),
        Column::new("payment_method", Text),
        Column::new("reference_number", Text),
        Column::new("receipt_number", Text),
        Column::new("payment_date", Date),
        Column::new("period_month", Integer),
        Column::new("period_year", Integer),
        Column::new("status", Text),
        Column::new("notes", Text),
        Column::new("metadata", Json),
        Column::new("created_at", DateTime),
        Column::new("updated_at", DateTime),
    ];
    const ASSIGNABLE: &'static [&'static str] = &[
        "plantel_id",
        "student_id",
        "cycle_id",
        "concept_type",
        "concept_id",
        "concept_description",
        "amount",
        "discount",
        "late_fee",
        "payment_method",
        "receipt_number",
        "payment_date",
        "period_month",
        "period_year",
        "status",
        "notes",
        "metadata",
    ];
    const TENANT_COLUMN: Option<&'static str> = Some("plantel_id");
}
