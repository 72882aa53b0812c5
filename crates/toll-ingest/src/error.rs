//! Error types for table ingestion.

use polars::prelude::PolarsError;
use thiserror::Error;
use toll_model::SchemaError;

/// Errors that can occur while reading a table into records.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Missing column or unreadable cell.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Underlying DataFrame access failed.
    #[error("DataFrame operation failed: {0}")]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
