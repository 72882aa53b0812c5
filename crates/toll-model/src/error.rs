use thiserror::Error;

/// Input table does not match the schema an operation expects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A required column is absent.
    #[error("required column '{column}' not found in {table} table")]
    MissingColumn { column: String, table: String },

    /// A cell could not be read as the declared semantic type.
    #[error("invalid value '{value}' in column '{column}' at row {row}: expected {expected}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
        expected: &'static str,
    },
}

impl SchemaError {
    pub fn missing_column(column: impl Into<String>, table: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
            table: table.into(),
        }
    }

    pub fn invalid_value(
        column: impl Into<String>,
        row: usize,
        value: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        Self::InvalidValue {
            column: column.into(),
            row,
            value: value.into(),
            expected,
        }
    }
}

/// Configuration could not be parsed or holds unusable values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
