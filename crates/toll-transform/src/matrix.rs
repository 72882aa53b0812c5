//! Labelled matrices with zero-default cells.
//!
//! A [`Matrix`] keeps its row and column identifiers in order and stores
//! only the cells that were written. Reading an unwritten cell yields
//! `0.0`, which is the value every pivot and distance matrix assigns to
//! pairs absent from the input.
//!
//! # Frame layout
//!
//! As a `DataFrame`, the first column ([`INDEX_COLUMN`]) holds the row
//! identifiers and each following `Float64` column holds one column
//! identifier's values, named by the identifier's text form.

use std::collections::{BTreeMap, HashMap};

use polars::prelude::{Column, DataFrame};
use toll_ingest::{ColumnLookup, identifier_at, optional_f64_at};
use toll_model::{Identifier, SchemaError};

use crate::error::Result;

/// Name of the row-identifier column in matrix frames.
pub const INDEX_COLUMN: &str = "id";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matrix {
    rows: Vec<Identifier>,
    columns: Vec<Identifier>,
    row_positions: HashMap<Identifier, usize>,
    column_positions: HashMap<Identifier, usize>,
    cells: BTreeMap<(usize, usize), f64>,
}

impl Matrix {
    /// An all-zero matrix over the given axes.
    pub fn new(rows: Vec<Identifier>, columns: Vec<Identifier>) -> Self {
        let row_positions = positions(&rows);
        let column_positions = positions(&columns);
        Self {
            rows,
            columns,
            row_positions,
            column_positions,
            cells: BTreeMap::new(),
        }
    }

    /// An all-zero matrix with the same identifiers on both axes.
    pub fn square(ids: Vec<Identifier>) -> Self {
        Self::new(ids.clone(), ids)
    }

    pub fn rows(&self) -> &[Identifier] {
        &self.rows
    }

    pub fn columns(&self) -> &[Identifier] {
        &self.columns
    }

    pub fn row_position(&self, id: &Identifier) -> Option<usize> {
        self.row_positions.get(id).copied()
    }

    pub fn column_position(&self, id: &Identifier) -> Option<usize> {
        self.column_positions.get(id).copied()
    }

    /// Cell at (`row`, `column`) positions; unwritten cells read as zero.
    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.cells.get(&(row, column)).copied().unwrap_or(0.0)
    }

    /// Write a cell, returning the previously written value.
    pub fn set(&mut self, row: usize, column: usize, value: f64) -> Option<f64> {
        self.cells.insert((row, column), value)
    }

    /// Cell for a pair of identifiers, `None` when either is off-axis.
    pub fn value(&self, row: &Identifier, column: &Identifier) -> Option<f64> {
        Some(self.get(self.row_position(row)?, self.column_position(column)?))
    }

    /// Reset every cell whose row and column identifiers are equal.
    pub fn clear_diagonal(&mut self) {
        for (row, id) in self.rows.iter().enumerate() {
            if let Some(column) = self.column_positions.get(id) {
                self.cells.remove(&(row, *column));
            }
        }
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.columns
    }

    pub fn is_symmetric(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        self.cells
            .iter()
            .all(|(&(row, column), &value)| self.get(column, row) == value)
    }

    pub fn to_frame(&self) -> Result<DataFrame> {
        let mut columns = Vec::with_capacity(self.columns.len() + 1);
        columns.push(identifier_column(INDEX_COLUMN, &self.rows));
        for (position, id) in self.columns.iter().enumerate() {
            let values: Vec<f64> = (0..self.rows.len())
                .map(|row| self.get(row, position))
                .collect();
            columns.push(Column::new(id.to_string().into(), values));
        }
        Ok(DataFrame::new(columns)?)
    }

    /// Read a matrix frame. Null cells read as zero.
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let lookup = ColumnLookup::for_frame("matrix", df);
        let index_name = lookup.require(INDEX_COLUMN)?;
        let index = df.column(index_name)?;

        let mut rows = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            rows.push(identifier_at(index, index_name, row)?);
        }

        let value_columns: Vec<&Column> = df
            .get_columns()
            .iter()
            .filter(|column| column.name().as_str() != index_name)
            .collect();
        let mut columns = Vec::with_capacity(value_columns.len());
        for column in &value_columns {
            let name = column.name().as_str();
            let id = Identifier::parse(name).ok_or_else(|| {
                SchemaError::invalid_value(name, 0, name, "a column identifier")
            })?;
            columns.push(id);
        }

        let mut matrix = Matrix::new(rows, columns);
        for (position, column) in value_columns.iter().enumerate() {
            let name = column.name().as_str();
            for row in 0..df.height() {
                if let Some(value) = optional_f64_at(column, name, row)? {
                    matrix.set(row, position, value);
                }
            }
        }
        Ok(matrix)
    }
}

/// Identifier column typed `Int64` when every key is an integer.
pub fn identifier_column(name: &str, ids: &[Identifier]) -> Column {
    if ids.iter().all(Identifier::is_int) {
        let values: Vec<i64> = ids.iter().filter_map(Identifier::as_int).collect();
        Column::new(name.into(), values)
    } else {
        let values: Vec<String> = ids.iter().map(ToString::to_string).collect();
        Column::new(name.into(), values)
    }
}

fn positions(ids: &[Identifier]) -> HashMap<Identifier, usize> {
    let mut map = HashMap::with_capacity(ids.len());
    for (position, id) in ids.iter().enumerate() {
        map.entry(id.clone()).or_insert(position);
    }
    map
}
