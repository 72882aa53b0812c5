//! Typed cell readers.
//!
//! Each reader takes the column, its name (for error messages) and the
//! row position, and either returns the typed value or a
//! [`SchemaError::InvalidValue`] naming the offending cell.

use polars::prelude::{AnyValue, Column};
use toll_common::{any_to_f64, any_to_i64, any_to_string};
use toll_model::{Identifier, SchemaError};

use crate::error::Result;

/// Read an identifier cell. Null or blank cells are invalid.
pub fn identifier_at(column: &Column, name: &str, row: usize) -> Result<Identifier> {
    let value = column.get(row)?;
    if let Some(int) = any_to_i64(value.clone()) {
        return Ok(Identifier::Int(int));
    }
    let text = any_to_string(value);
    Identifier::parse(&text)
        .ok_or_else(|| SchemaError::invalid_value(name, row, text, "an identifier").into())
}

/// Read a numeric cell that must be present.
pub fn required_f64_at(column: &Column, name: &str, row: usize) -> Result<f64> {
    let value = column.get(row)?;
    match any_to_f64(value.clone()) {
        Some(number) => Ok(number),
        None => Err(SchemaError::invalid_value(name, row, describe(value), "a number").into()),
    }
}

/// Read a numeric cell, mapping null to `None`.
///
/// Non-null cells that are not numeric are still an error.
pub fn optional_f64_at(column: &Column, name: &str, row: usize) -> Result<Option<f64>> {
    let value = column.get(row)?;
    if matches!(value, AnyValue::Null) {
        return Ok(None);
    }
    match any_to_f64(value.clone()) {
        Some(number) => Ok(Some(number)),
        None => Err(SchemaError::invalid_value(name, row, describe(value), "a number").into()),
    }
}

/// Read a cell as trimmed text. Null reads as an empty string.
pub fn text_at(column: &Column, row: usize) -> Result<String> {
    let value = column.get(row)?;
    Ok(any_to_string(value).trim().to_string())
}

fn describe(value: AnyValue<'_>) -> String {
    if matches!(value, AnyValue::Null) {
        "null".to_string()
    } else {
        any_to_string(value)
    }
}
