//! Case-insensitive column resolution.

use std::collections::HashMap;

use polars::prelude::DataFrame;
use toll_model::SchemaError;

/// Maps normalized column names to the names actually present in a frame.
///
/// Header cells exported by spreadsheets often carry a BOM, stray spaces or
/// different capitalisation; all of those resolve to the same column.
#[derive(Debug, Clone)]
pub struct ColumnLookup {
    table: String,
    map: HashMap<String, String>,
}

impl ColumnLookup {
    pub fn new<I, S>(table: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for name in names {
            let name = name.as_ref();
            map.entry(normalize_key(name))
                .or_insert_with(|| name.to_string());
        }
        Self {
            table: table.into(),
            map,
        }
    }

    pub fn for_frame(table: impl Into<String>, df: &DataFrame) -> Self {
        Self::new(
            table,
            df.get_columns().iter().map(|column| column.name().as_str()),
        )
    }

    /// Actual column name for `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(&normalize_key(name)).map(String::as_str)
    }

    /// Actual column name for `name`, or a [`SchemaError::MissingColumn`].
    pub fn require(&self, name: &str) -> Result<&str, SchemaError> {
        self.get(name)
            .ok_or_else(|| SchemaError::missing_column(name, &self.table))
    }
}

fn normalize_key(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut key = String::with_capacity(trimmed.len());
    for (idx, part) in trimmed.split_whitespace().enumerate() {
        if idx > 0 {
            key.push(' ');
        }
        key.push_str(&part.to_ascii_uppercase());
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_case_and_whitespace_variants() {
        let lookup = ColumnLookup::new("coverage", ["\u{feff}startDay", " id_2 "]);
        assert_eq!(lookup.get("STARTDAY"), Some("\u{feff}startDay"));
        assert_eq!(lookup.get("id_2"), Some(" id_2 "));
        assert_eq!(lookup.get("StartDay"), Some("\u{feff}startDay"));
        assert_eq!(lookup.get("endDay"), None);
    }

    #[test]
    fn first_spelling_wins() {
        let lookup = ColumnLookup::new("t", ["car", "CAR"]);
        assert_eq!(lookup.get("Car"), Some("car"));
    }

    #[test]
    fn missing_column_names_table() {
        let lookup = ColumnLookup::new("distance", ["id_start"]);
        let err = lookup.require("distance").unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingColumn {
                column: "distance".to_string(),
                table: "distance".to_string(),
            }
        );
    }
}
