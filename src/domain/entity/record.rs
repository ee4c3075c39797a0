// src/domain/entity/record.rs
use super::schema::{Entity, TIMESTAMP_COLUMNS};
use super::value::Value;
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value as Json};
use std::{collections::BTreeMap, fmt, marker::PhantomData};

/// JSON map of attribute name to value, as stored in audit entries.
pub type Snapshot = Map<String, Json>;

/// One row of `E`, decoded according to its declared columns.
pub struct Record<E: Entity> {
    attributes: BTreeMap<&'static str, Value>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Record<E> {
    /// Build a record from decoded attributes; columns not declared on `E` are dropped.
    pub fn from_attributes<I>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let attributes = attributes
            .into_iter()
            .filter_map(|(name, value)| E::column(&name).map(|c| (c.name, value)))
            .collect();
        Self {
            attributes,
            _entity: PhantomData,
        }
    }

    pub fn get(&self, column: &str) -> &Value {
        self.attributes.get(column).unwrap_or(&Value::Null)
    }

    pub fn id(&self) -> Option<i64> {
        self.get(E::PRIMARY_KEY).as_i64()
    }

    /// Owning tenant, or `None` for tables that are not tenant-owned.
    pub fn tenant_id(&self) -> Option<i64> {
        E::TENANT_COLUMN.and_then(|column| self.get(column).as_i64())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.attributes.iter().map(|(k, v)| (*k, v))
    }

    /// Externally visible attributes; hidden columns are left out.
    pub fn snapshot(&self) -> Snapshot {
        self.attributes
            .iter()
            .filter(|(name, _)| !E::is_hidden(name))
            .map(|(name, value)| ((*name).to_string(), value.to_json()))
            .collect()
    }
}

impl<E: Entity> Clone for Record<E> {
    fn clone(&self) -> Self {
        Self {
            attributes: self.attributes.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> fmt::Debug for Record<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("table", &E::TABLE)
            .field("id", &self.id())
            .finish_non_exhaustive()
    }
}

impl<E: Entity> Serialize for Record<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.snapshot().serialize(serializer)
    }
}

/// Validated set of column writes for create/update.
pub struct Changeset<E: Entity> {
    values: BTreeMap<&'static str, Value>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Changeset<E> {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
            _entity: PhantomData,
        }
    }

    /// Mass-assign from external input. Keys outside `E::ASSIGNABLE` are ignored.
    pub fn from_input(input: &Map<String, Json>) -> DomainResult<Self> {
        let mut changeset = Self::new();
        for (key, raw) in input {
            if !E::is_assignable(key) {
                continue;
            }
            let column = E::require_column(key)?;
            let value = column.cast.cast_json(column.name, raw)?;
            changeset.values.insert(column.name, value);
        }
        Ok(changeset)
    }

    /// Trusted server-side write of any declared, non-bookkeeping column.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> DomainResult<Self> {
        self.insert(column, value.into())?;
        Ok(self)
    }

    pub fn insert(&mut self, column: &str, value: Value) -> DomainResult<()> {
        let column = E::require_column(column)?;
        if column.name == E::PRIMARY_KEY || TIMESTAMP_COLUMNS.contains(&column.name) {
            return Err(DomainError::Validation(format!(
                "column '{}' is managed by the repository",
                column.name
            )));
        }
        let value = column.cast.coerce(column.name, value)?;
        self.values.insert(column.name, value);
        Ok(())
    }

    pub fn remove(&mut self, column: &str) -> Option<Value> {
        self.values.remove(column)
    }

    /// Drop every write outside `columns`.
    pub fn retain(&mut self, columns: &[&str]) {
        self.values.retain(|column, _| columns.contains(column));
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    pub fn into_values(self) -> BTreeMap<&'static str, Value> {
        self.values
    }
}

impl<E: Entity> Default for Changeset<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Clone for Changeset<E> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> fmt::Debug for Changeset<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Changeset")
            .field("table", &E::TABLE)
            .field("columns", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}
