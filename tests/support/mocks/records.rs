// tests/support/mocks/records.rs
use async_trait::async_trait;
use campus_core::application::ports::time::Clock;
use campus_core::domain::entity::{
    CREATED_AT, Changeset, Entity, Record, RecordRepository, UPDATED_AT, Value,
};
use campus_core::domain::errors::DomainResult;
use campus_core::domain::query::{Condition, Conditions, Direction, Operand, Operator, OrderBy};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

type Row = BTreeMap<String, Value>;

/// In-memory table that evaluates conditions, ordering and paging the way
/// the Postgres repository renders them.
pub struct MemoryRecordRepository<E: Entity> {
    rows: Mutex<BTreeMap<i64, Row>>,
    clock: Arc<dyn Clock>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> MemoryRecordRepository<E> {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            clock,
            _entity: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().expect("rows mutex poisoned").len()
    }

    /// Raw stored value, bypassing every scope check.
    pub fn stored(&self, id: i64, column: &str) -> Option<Value> {
        let rows = self.rows.lock().expect("rows mutex poisoned");
        rows.get(&id).and_then(|row| row.get(column).cloned())
    }

    fn record(row: &Row) -> Record<E> {
        Record::from_attributes(row.iter().map(|(k, v)| (k.clone(), v.clone())))
    }

    fn select(&self, conditions: &Conditions, order_by: &OrderBy) -> DomainResult<Vec<Row>> {
        for condition in conditions.iter() {
            E::require_column(condition.column())?;
        }
        for (column, _) in order_by.iter() {
            E::require_column(column)?;
        }

        let rows = self.rows.lock().expect("rows mutex poisoned");
        let mut selected: Vec<Row> = rows
            .values()
            .filter(|row| conditions.iter().all(|c| row_matches::<E>(row, c)))
            .cloned()
            .collect();

        if !order_by.is_empty() {
            selected.sort_by(|a, b| {
                for (column, direction) in order_by.iter() {
                    let ord = compare(
                        a.get(column).unwrap_or(&Value::Null),
                        b.get(column).unwrap_or(&Value::Null),
                    )
                    .unwrap_or(Ordering::Equal);
                    let ord = match direction {
                        Direction::Asc => ord,
                        Direction::Desc => ord.reverse(),
                    };
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                Ordering::Equal
            });
        }
        Ok(selected)
    }
}

#[async_trait]
impl<E: Entity> RecordRepository<E> for MemoryRecordRepository<E> {
    async fn find(&self, id: i64) -> DomainResult<Option<Record<E>>> {
        let rows = self.rows.lock().expect("rows mutex poisoned");
        Ok(rows.get(&id).map(Self::record))
    }

    async fn find_first(&self, conditions: &Conditions) -> DomainResult<Option<Record<E>>> {
        let rows = self.select(conditions, &OrderBy::new())?;
        Ok(rows.first().map(Self::record))
    }

    async fn list(
        &self,
        conditions: &Conditions,
        order_by: &OrderBy,
        limit: Option<u32>,
        offset: Option<u64>,
    ) -> DomainResult<Vec<Record<E>>> {
        let rows = self.select(conditions, order_by)?;
        let skip = usize::try_from(offset.unwrap_or(0)).unwrap_or(usize::MAX);
        let take = limit.map_or(usize::MAX, |l| l as usize);
        Ok(rows.iter().skip(skip).take(take).map(Self::record).collect())
    }

    async fn count(&self, conditions: &Conditions) -> DomainResult<u64> {
        Ok(self.select(conditions, &OrderBy::new())?.len() as u64)
    }

    async fn create(&self, data: Changeset<E>) -> DomainResult<Record<E>> {
        let now = Value::DateTime(self.clock.now());
        let mut rows = self.rows.lock().expect("rows mutex poisoned");
        let id = rows.keys().next_back().copied().unwrap_or(0) + 1;

        let mut row: Row = E::COLUMNS
            .iter()
            .map(|c| (c.name.to_string(), Value::Null))
            .collect();
        for (name, value) in data.into_values() {
            row.insert(name.to_string(), value);
        }
        row.insert(E::PRIMARY_KEY.to_string(), Value::Integer(id));
        row.insert(CREATED_AT.to_string(), now.clone());
        row.insert(UPDATED_AT.to_string(), now);

        let record = Self::record(&row);
        rows.insert(id, row);
        Ok(record)
    }

    async fn update(&self, id: i64, data: Changeset<E>) -> DomainResult<Option<Record<E>>> {
        let now = Value::DateTime(self.clock.now());
        let mut rows = self.rows.lock().expect("rows mutex poisoned");
        let Some(row) = rows.get_mut(&id) else {
            return Ok(None);
        };
        for (name, value) in data.into_values() {
            row.insert(name.to_string(), value);
        }
        row.insert(UPDATED_AT.to_string(), now);
        Ok(Some(Self::record(row)))
    }

    async fn delete(&self, id: i64) -> DomainResult<bool> {
        let mut rows = self.rows.lock().expect("rows mutex poisoned");
        Ok(rows.remove(&id).is_some())
    }
}

fn row_matches<E: Entity>(row: &Row, condition: &Condition) -> bool {
    let column = condition.column();
    let cell = row.get(column).unwrap_or(&Value::Null);
    let cast = |value: &Value| {
        E::column(column)
            .and_then(|c| c.cast.coerce(column, value.clone()).ok())
            .unwrap_or_else(|| value.clone())
    };

    match (condition.operator(), condition.operand()) {
        (Operator::IsNull, _) => cell.is_null(),
        (Operator::IsNotNull, _) => !cell.is_null(),
        (Operator::In, Operand::List(items)) => items.iter().any(|v| &cast(v) == cell),
        (Operator::Between, Operand::Range(low, high)) => {
            matches!(compare(cell, &cast(low)), Some(Ordering::Greater | Ordering::Equal))
                && matches!(compare(cell, &cast(high)), Some(Ordering::Less | Ordering::Equal))
        }
        (Operator::Like, Operand::Single(Value::Text(pattern))) => {
            cell.as_str().is_some_and(|text| like(text, pattern))
        }
        (operator, Operand::Single(value)) => {
            let ord = compare(cell, &cast(value));
            match operator {
                Operator::Eq => ord == Some(Ordering::Equal),
                Operator::NotEq => ord.is_some_and(|o| o != Ordering::Equal),
                Operator::Lt => ord == Some(Ordering::Less),
                Operator::Lte => matches!(ord, Some(Ordering::Less | Ordering::Equal)),
                Operator::Gt => ord == Some(Ordering::Greater),
                Operator::Gte => matches!(ord, Some(Ordering::Greater | Ordering::Equal)),
                _ => false,
            }
        }
        _ => false,
    }
}

/// SQL-style comparison: anything involving NULL, or mismatched kinds, is unknown.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => Some(x.cmp(y)),
        (Value::Decimal(x), Value::Decimal(y)) => Some(x.cmp(y)),
        (Value::Text(x), Value::Text(y)) => Some(x.cmp(y)),
        (Value::Boolean(x), Value::Boolean(y)) => Some(x.cmp(y)),
        (Value::Date(x), Value::Date(y)) => Some(x.cmp(y)),
        (Value::DateTime(x), Value::DateTime(y)) => Some(x.cmp(y)),
        (Value::Json(x), Value::Json(y)) if x == y => Some(Ordering::Equal),
        _ => None,
    }
}

fn like(text: &str, pattern: &str) -> bool {
    fn go(text: &[char], pattern: &[char]) -> bool {
        match pattern.split_first() {
            None => text.is_empty(),
            Some(('%', rest)) => (0..=text.len()).any(|i| go(&text[i..], rest)),
            Some(('_', rest)) => !text.is_empty() && go(&text[1..], rest),
            Some((c, rest)) => text.first() == Some(c) && go(&text[1..], rest),
        }
    }
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    go(&text, &pattern)
}
