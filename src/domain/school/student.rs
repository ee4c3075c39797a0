use crate::domain::entity::{CastKind::*, Column, Entity};

pub struct Student;

impl Entity for Student {
    const TABLE: &'static str = "students";
    const COLUMNS: &'static [Column] = &[
        Column::new("id", Integer),
        Column::new("plantel_id", Integer),
        Column::new("student_id", Text),
        Column::new("first_name", Text),
        Column::new("last_name", Text),
        Column::new("email", Text),
        Column::new("phone", Text),
        Column::new("curp", Text),
        Column::new("gender", Text),
        Column::new("birth_date", Date),
        Column::new("status", Text),
        Column::new("enrollment_date", Date),
        Column::new("photo_url", Text),
        Column::new("notes", Text),
        Column::new("created_at", DateTime),
        Column::new("updated_at", DateTime),
    ];
    const ASSIGNABLE: &'static [&'static str] = &[
        "plantel_id",
        "student_id",
        "first_name",
        "last_name",
        "email",
        "phone",
        "curp",
        "gender",
        "birth_date",
        "status",
        "enrollment_date",
        "photo_url",
        "notes",
    ];
    const TENANT_COLUMN: Option<&'static str> = Some("plantel_id");
}
