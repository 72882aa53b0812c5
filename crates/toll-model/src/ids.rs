//! Identifier keys for matrices, routes and groups.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque key read from an identifier column.
///
/// Source tables carry identifiers either as integers (`1001400`) or as
/// free text (`"A-12"`). Integers order numerically and sort before all
/// text keys, which order lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Int(i64),
    Text(String),
}

impl Identifier {
    /// Parse a raw cell value, returning `None` for blank input.
    ///
    /// # Examples
    ///
    /// ```
    /// use toll_model::Identifier;
    ///
    /// assert_eq!(Identifier::parse(" 42 "), Some(Identifier::Int(42)));
    /// assert_eq!(Identifier::parse("A-1"), Some(Identifier::Text("A-1".into())));
    /// assert_eq!(Identifier::parse("   "), None);
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim().trim_matches('\u{feff}');
        if trimmed.is_empty() {
            return None;
        }
        Some(match trimmed.parse::<i64>() {
            Ok(value) => Self::Int(value),
            Err(_) => Self::Text(trimmed.to_string()),
        })
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_sort_before_text() {
        let mut ids = vec![
            Identifier::from("b"),
            Identifier::Int(10),
            Identifier::from("a"),
            Identifier::Int(2),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![
                Identifier::Int(2),
                Identifier::Int(10),
                Identifier::from("a"),
                Identifier::from("b"),
            ]
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for id in [Identifier::Int(-7), Identifier::from("route-9")] {
            assert_eq!(Identifier::parse(&id.to_string()), Some(id));
        }
    }
}
