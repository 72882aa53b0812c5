//! Error types for transformation operations.

use polars::prelude::PolarsError;
use thiserror::Error;
use toll_ingest::IngestError;
use toll_model::{ConfigError, Identifier, SchemaError};

#[derive(Debug, Error)]
pub enum TransformError {
    /// Input table is missing a column or holds an unreadable cell.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A requested identifier does not occur in the input.
    #[error("identifier {id} not found in {table} table")]
    NotFound { id: Identifier, table: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("DataFrame operation failed: {0}")]
    Polars(#[from] PolarsError),
}

impl From<IngestError> for TransformError {
    fn from(error: IngestError) -> Self {
        match error {
            IngestError::Schema(schema) => Self::Schema(schema),
            IngestError::Polars(polars) => Self::Polars(polars),
        }
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;
