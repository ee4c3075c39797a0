// src/domain/query/order.rs
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub const fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl FromStr for Direction {
    type Err = std::convert::Infallible;

    /// Anything other than `desc` sorts ascending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("desc") {
            Ok(Direction::Desc)
        } else {
            Ok(Direction::Asc)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBy(Vec<(String, Direction)>);

impl OrderBy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn asc(mut self, column: impl Into<String>) -> Self {
        self.0.push((column.into(), Direction::Asc));
        self
    }

    pub fn desc(mut self, column: impl Into<String>) -> Self {
        self.0.push((column.into(), Direction::Desc));
        self
    }

    /// Parse a `column[:direction],...` list, e.g. `last_name,first_name:desc`.
    pub fn parse(input: &str) -> Self {
        let terms = input
            .split(',')
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(|term| match term.split_once(':') {
                Some((column, dir)) => (
                    column.trim().to_string(),
                    dir.parse().unwrap_or_default(),
                ),
                None => (term.to_string(), Direction::Asc),
            })
            .collect();
        Self(terms)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Direction)> {
        self.0.iter().map(|(column, dir)| (column.as_str(), *dir))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_column_list() {
        let order = OrderBy::parse("last_name, first_name:DESC ,created_at:sideways,");
        let terms: Vec<_> = order.iter().collect();
        assert_eq!(
            terms,
            vec![
                ("last_name", Direction::Asc),
                ("first_name", Direction::Desc),
                ("created_at", Direction::Asc),
            ]
        );
    }
}
