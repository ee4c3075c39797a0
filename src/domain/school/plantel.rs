use crate::domain::entity::{CastKind::*, Column, Entity};

/// A campus. Planteles are the tenants themselves and are not tenant-owned.
pub struct Plantel;

impl Entity for Plantel {
    const TABLE: &'static str = "planteles";
    const COLUMNS: &'static [Column] = &[
        Column::new("id", Integer),
        Column::new("name", Text),
        Column::new("code", Text),
        Column::new("address", Text),
        Column::new("phone", Text),
        Column::new("email", Text),
        Column::new("director_name", Text),
        Column::new("status", Text),
        Column::new("created_at", DateTime),
        Column::new("updated_at", DateTime),
    ];
    const ASSIGNABLE: &'static [&'static str] = &[
        "name",
        "code",
        "address",
        "phone",
        "email",
        "director_name",
        "status",
    ];
}
