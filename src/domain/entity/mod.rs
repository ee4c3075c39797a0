mod record;
mod repository;
mod schema;
mod value;

pub use record::{Changeset, Record, Snapshot};
pub use repository::{RecordRepository, STATUS_INACTIVE};
pub use schema::{
    CREATED_AT, Column, Entity, STATUS, TIMESTAMP_COLUMNS, UPDATED_AT, validate_schema,
};
pub use value::{CastKind, Value};
