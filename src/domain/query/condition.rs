// src/domain/query/condition.rs
use crate::domain::entity::{Entity, Value};
use crate::domain::errors::{DomainError, DomainResult};
use serde_json::{Map, Value as Json};
use std::{fmt, str::FromStr};

/// The complete set of operators a condition may use. The SQL text of each
/// operator comes from [`Operator::as_sql`] and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
    In,
    Between,
    IsNull,
    IsNotNull,
}

impl Operator {
    pub const fn as_sql(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "<>",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Like => "LIKE",
            Operator::In => "IN",
            Operator::Between => "BETWEEN",
            Operator::IsNull => "IS NULL",
            Operator::IsNotNull => "IS NOT NULL",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Operator::Eq
                | Operator::NotEq
                | Operator::Lt
                | Operator::Lte
                | Operator::Gt
                | Operator::Gte
        )
    }
}

impl FromStr for Operator {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.to_ascii_uppercase().as_str() {
            "=" => Ok(Operator::Eq),
            "!=" | "<>" => Ok(Operator::NotEq),
            "<" => Ok(Operator::Lt),
            "<=" => Ok(Operator::Lte),
            ">" => Ok(Operator::Gt),
            ">=" => Ok(Operator::Gte),
            "LIKE" => Ok(Operator::Like),
            "IN" => Ok(Operator::In),
            "BETWEEN" => Ok(Operator::Between),
            "IS NULL" => Ok(Operator::IsNull),
            "IS NOT NULL" => Ok(Operator::IsNotNull),
            _ => Err(DomainError::Validation(format!("unsupported operator '{s}'"))),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    None,
    Single(Value),
    List(Vec<Value>),
    Range(Value, Value),
}

/// One `column <operator> operand` term. Terms in a [`Conditions`] set are ANDed.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    column: String,
    operator: Operator,
    operand: Operand,
}

impl Condition {
    /// Validates that the operand has the shape the operator requires.
    pub fn new(column: impl Into<String>, operator: Operator, operand: Operand) -> DomainResult<Self> {
        let column = column.into();
        let malformed = |what: &str| {
            DomainError::Validation(format!("condition on '{column}': {operator} {what}"))
        };

        match (&operator, &operand) {
            (Operator::IsNull | Operator::IsNotNull, Operand::None) => {}
            (Operator::IsNull | Operator::IsNotNull, _) => {
                return Err(malformed("takes no operand"));
            }
            (Operator::In, Operand::List(items)) if !items.is_empty() => {
                if items.iter().any(Value::is_null) {
                    return Err(malformed("list cannot contain null"));
                }
            }
            (Operator::In, _) => return Err(malformed("requires a non-empty list")),
            (Operator::Between, Operand::Range(lo, hi)) if !lo.is_null() && !hi.is_null() => {}
            (Operator::Between, _) => return Err(malformed("requires two non-null bounds")),
            (Operator::Like, Operand::Single(Value::Text(_))) => {}
            (Operator::Like, _) => return Err(malformed("requires a string pattern")),
            (op, Operand::Single(v)) if op.is_comparison() && !v.is_null() => {}
            (_, _) => return Err(malformed("requires a single non-null value")),
        }

        Ok(Self {
            column,
            operator,
            operand,
        })
    }

    /// Equality, or `IS NULL` when the value is null.
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        match value.into() {
            Value::Null => Self {
                column: column.into(),
                operator: Operator::IsNull,
                operand: Operand::None,
            },
            value => Self {
                column: column.into(),
                operator: Operator::Eq,
                operand: Operand::Single(value),
            },
        }
    }

    pub fn compare(
        column: impl Into<String>,
        operator: Operator,
        value: impl Into<Value>,
    ) -> DomainResult<Self> {
        Self::new(column, operator, Operand::Single(value.into()))
    }

    pub fn in_list<I, V>(column: impl Into<String>, values: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let items = values.into_iter().map(Into::into).collect();
        Self::new(column, Operator::In, Operand::List(items))
    }

    pub fn between(
        column: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> DomainResult<Self> {
        Self::new(column, Operator::Between, Operand::Range(low.into(), high.into()))
    }

    pub fn like(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            operator: Operator::Like,
            operand: Operand::Single(Value::Text(pattern.into())),
        }
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            operator: Operator::IsNull,
            operand: Operand::None,
        }
    }

    pub fn is_not_null(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            operator: Operator::IsNotNull,
            operand: Operand::None,
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn operand(&self) -> &Operand {
        &self.operand
    }
}

/// An AND-ed set of conditions, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conditions(Vec<Condition>);

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, condition: Condition) -> Self {
        self.0.push(condition);
        self
    }

    pub fn push(&mut self, condition: Condition) {
        self.0.push(condition);
    }

    pub fn eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.and(Condition::eq(column, value))
    }

    pub fn extend(mut self, other: Conditions) -> Self {
        self.0.extend(other.0);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Condition> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Parse `{column: literal | {operator: operand, ...}}`.
    ///
    /// Operators are resolved through [`Operator::from_str`], so anything
    /// outside the allow-list is rejected here rather than reaching SQL.
    pub fn from_json<E: Entity>(map: &Map<String, Json>) -> DomainResult<Self> {
        let mut conditions = Self::new();
        for (key, raw) in map {
            let column = E::require_column(key)?;
            match raw {
                Json::Object(ops) => {
                    if ops.is_empty() {
                        return Err(DomainError::Validation(format!(
                            "condition on '{key}' has no operator"
                        )));
                    }
                    for (op, operand) in ops {
                        let operator: Operator = op.parse()?;
                        let operand = parse_operand(column.name, column.cast, operator, operand)?;
                        conditions.push(Condition::new(column.name, operator, operand)?);
                    }
                }
                literal => {
                    let value = column.cast.cast_json(column.name, literal)?;
                    conditions.push(Condition::eq(column.name, value));
                }
            }
        }
        Ok(conditions)
    }
}

impl From<Condition> for Conditions {
    fn from(condition: Condition) -> Self {
        Self(vec![condition])
    }
}

impl IntoIterator for Conditions {
    type Item = Condition;
    type IntoIter = std::vec::IntoIter<Condition>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

fn parse_operand(
    column: &str,
    cast: crate::domain::entity::CastKind,
    operator: Operator,
    raw: &Json,
) -> DomainResult<Operand> {
    match operator {
        Operator::IsNull | Operator::IsNotNull => Ok(Operand::None),
        Operator::In => match raw {
            Json::Array(items) => items
                .iter()
                .map(|item| cast.cast_json(column, item))
                .collect::<DomainResult<Vec<_>>>()
                .map(Operand::List),
            _ => Err(DomainError::Validation(format!(
                "condition on '{column}': IN requires an array"
            ))),
        },
        Operator::Between => match raw {
            Json::Array(items) if items.len() == 2 => Ok(Operand::Range(
                cast.cast_json(column, &items[0])?,
                cast.cast_json(column, &items[1])?,
            )),
            _ => Err(DomainError::Validation(format!(
                "condition on '{column}': BETWEEN requires a two-element array"
            ))),
        },
        // The pattern is matched as text whatever the column kind.
        Operator::Like => match raw {
            Json::String(s) => Ok(Operand::Single(Value::Text(s.clone()))),
            _ => Err(DomainError::Validation(format!(
                "condition on '{column}': LIKE requires a string"
            ))),
        },
        _ => Ok(Operand::Single(cast.cast_json(column, raw)?)),
    }
}
