// src/domain/entity/schema.rs
use super::value::CastKind;
use crate::domain::errors::{DomainError, DomainResult};
use std::collections::HashSet;

pub const CREATED_AT: &str = "created_at";
pub const UPDATED_AT: &str = "updated_at";
pub const STATUS: &str = "status";

/// Bookkeeping columns the repository stamps itself.
pub const TIMESTAMP_COLUMNS: &[&str] = &[CREATED_AT, UPDATED_AT];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub cast: CastKind,
}

impl Column {
    pub const fn new(name: &'static str, cast: CastKind) -> Self {
        Self { name, cast }
    }
}

/// Static descriptor of a table-backed entity.
///
/// Implementors are zero-sized marker types; the repository, changesets and
/// records are all generic over them. Descriptors are checked once at startup
/// with [`validate_schema`].
pub trait Entity: Send + Sync + 'static {
    const TABLE: &'static str;
    const PRIMARY_KEY: &'static str = "id";
    const COLUMNS: &'static [Column];
    /// Columns that may be filled from external input.
    const ASSIGNABLE: &'static [&'static str];
    /// Columns never included in snapshots or API responses.
    const HIDDEN: &'static [&'static str] = &[];
    /// Column holding the owning tenant id, for tenant-owned tables.
    const TENANT_COLUMN: Option<&'static str> = None;

    fn column(name: &str) -> Option<&'static Column> {
        Self::COLUMNS.iter().find(|c| c.name == name)
    }

    fn require_column(name: &str) -> DomainResult<&'static Column> {
        Self::column(name).ok_or_else(|| {
            DomainError::Validation(format!("unknown column '{name}' on {}", Self::TABLE))
        })
    }

    fn is_assignable(name: &str) -> bool {
        Self::ASSIGNABLE.contains(&name)
    }

    fn is_hidden(name: &str) -> bool {
        Self::HIDDEN.contains(&name)
    }
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn invalid<E: Entity>(msg: impl std::fmt::Display) -> DomainError {
    DomainError::Validation(format!("invalid schema for '{}': {msg}", E::TABLE))
}

pub fn validate_schema<E: Entity>() -> DomainResult<()> {
    if !is_identifier(E::TABLE) {
        return Err(invalid::<E>("table name is not a plain identifier"));
    }

    let mut seen = HashSet::new();
    for column in E::COLUMNS {
        if !is_identifier(column.name) {
            return Err(invalid::<E>(format!(
                "column '{}' is not a plain identifier",
                column.name
            )));
        }
        if !seen.insert(column.name) {
            return Err(invalid::<E>(format!("duplicate column '{}'", column.name)));
        }
    }

    match E::column(E::PRIMARY_KEY) {
        Some(pk) if pk.cast == CastKind::Integer => {}
        Some(_) => return Err(invalid::<E>("primary key must be an integer column")),
        None => return Err(invalid::<E>("primary key column is not declared")),
    }

    for stamp in TIMESTAMP_COLUMNS {
        match E::column(stamp) {
            Some(c) if c.cast == CastKind::DateTime => {}
            _ => {
                return Err(invalid::<E>(format!(
                    "'{stamp}' must be declared as a datetime column"
                )));
            }
        }
    }

    for name in E::ASSIGNABLE {
        if E::column(name).is_none() {
            return Err(invalid::<E>(format!("assignable column '{name}' is not declared")));
        }
        if *name == E::PRIMARY_KEY || TIMESTAMP_COLUMNS.contains(name) {
            return Err(invalid::<E>(format!("column '{name}' cannot be assignable")));
        }
    }

    for name in E::HIDDEN {
        if E::column(name).is_none() {
            return Err(invalid::<E>(format!("hidden column '{name}' is not declared")));
        }
    }

    if let Some(tenant) = E::TENANT_COLUMN {
        match E::column(tenant) {
            Some(c) if c.cast == CastKind::Integer => {}
            Some(_) => return Err(invalid::<E>("tenant column must be an integer column")),
            None => return Err(invalid::<E>(format!("tenant column '{tenant}' is not declared"))),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Valid;
    impl Entity for Valid {
        const TABLE: &'static str = "widgets";
        const COLUMNS: &'static [Column] = &[
            Column::new("id", CastKind::Integer),
            Column::new("plantel_id", CastKind::Integer),
            Column::new("name", CastKind::Text),
            Column::new("created_at", CastKind::DateTime),
            Column::new("updated_at", CastKind::DateTime),
        ];
        const ASSIGNABLE: &'static [&'static str] = &["plantel_id", "name"];
        const TENANT_COLUMN: Option<&'static str> = Some("plantel_id");
    }

    struct AssignsTimestamp;
    impl Entity for AssignsTimestamp {
        const TABLE: &'static str = "widgets";
        const COLUMNS: &'static [Column] = Valid::COLUMNS;
        const ASSIGNABLE: &'static [&'static str] = &["name", "updated_at"];
    }

    struct TextTenant;
    impl Entity for TextTenant {
        const TABLE: &'static str = "widgets";
        const COLUMNS: &'static [Column] = &[
            Column::new("id", CastKind::Integer),
            Column::new("tenant", CastKind::Text),
            Column::new("created_at", CastKind::DateTime),
            Column::new("updated_at", CastKind::DateTime),
        ];
        const ASSIGNABLE: &'static [&'static str] = &[];
        const TENANT_COLUMN: Option<&'static str> = Some("tenant");
    }

    struct BadTable;
    impl Entity for BadTable {
        const TABLE: &'static str = "widgets; DROP TABLE users";
        const COLUMNS: &'static [Column] = Valid::COLUMNS;
        const ASSIGNABLE: &'static [&'static str] = &[];
    }

    struct NoTimestamps;
    impl Entity for NoTimestamps {
        const TABLE: &'static str = "widgets";
        const COLUMNS: &'static [Column] = &[Column::new("id", CastKind::Integer)];
        const ASSIGNABLE: &'static [&'static str] = &[];
    }

    #[test]
    fn accepts_well_formed_descriptor() {
        validate_schema::<Valid>().expect("valid schema");
    }

    #[test]
    fn rejects_malformed_descriptors() {
        assert!(validate_schema::<AssignsTimestamp>().is_err());
        assert!(validate_schema::<TextTenant>().is_err());
        assert!(validate_schema::<BadTable>().is_err());
        assert!(validate_schema::<NoTimestamps>().is_err());
    }

    #[test]
    fn require_column_reports_table() {
        let err = Valid::require_column("nope").unwrap_err();
        assert!(err.to_string().contains("widgets"));
    }
}
