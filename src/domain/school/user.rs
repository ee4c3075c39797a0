use crate::domain::entity::{CastKind::*, Column, Entity};

/// Back-office account. `plantel_id` is null for global administrators.
pub struct User;

impl Entity for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [Column] = &[
        Column::new("id", Integer),
        Column::new("plantel_id", Integer),
        Column::new("email", Text),
        Column::new("password", Text),
        Column::new("name", Text),
        Column::new("role", Text),
        Column::new("phone", Text),
        Column::new("status", Text),
        Column::new("last_login", DateTime),
        Column::new("created_at", DateTime),
        Column::new("updated_at", DateTime),
    ];
    const ASSIGNABLE: &'static [&'static str] = &[
        "plantel_id",
        "email",
        "password",
        "name",
        "role",
        "phone",
        "status",
        "last_login",
    ];
    const HIDDEN: &'static [&'static str] = &["password"];
    const TENANT_COLUMN: Option<&'static str> = Some("plantel_id");
}
