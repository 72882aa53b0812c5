//! Car matrix pivoting and conditional rescaling.

use std::collections::BTreeSet;

use polars::prelude::{Column, DataFrame};
use toll_common::round_to_decimals;
use toll_ingest::{ColumnLookup, car_records, optional_f64_at};
use toll_model::{Identifier, Rescale};
use tracing::{debug, warn};

use crate::error::Result;
use crate::matrix::{INDEX_COLUMN, Matrix};

/// Pivot `id_1`, `id_2`, `car` rows into a square matrix.
///
/// Both axes hold the sorted union of `id_1` and `id_2` values, so the
/// result is square even when a key only ever appears on one side.
/// Pairs absent from the input read as zero and the diagonal is forced to
/// zero. When a pair occurs more than once, the last row wins.
pub fn generate_car_matrix(df: &DataFrame) -> Result<DataFrame> {
    car_matrix(df)?.to_frame()
}

/// [`generate_car_matrix`] as a [`Matrix`].
pub fn car_matrix(df: &DataFrame) -> Result<Matrix> {
    let records = car_records(df)?;
    let ids: BTreeSet<Identifier> = records
        .iter()
        .flat_map(|record| [record.id_1.clone(), record.id_2.clone()])
        .collect();
    let mut matrix = Matrix::square(ids.into_iter().collect());

    let mut collisions = 0usize;
    for record in &records {
        let (Some(row), Some(column)) = (
            matrix.row_position(&record.id_1),
            matrix.column_position(&record.id_2),
        ) else {
            continue;
        };
        if matrix.set(row, column, record.car).is_some() {
            collisions += 1;
        }
    }
    if collisions > 0 {
        warn!(
            collisions,
            "duplicate (id_1, id_2) pairs in car matrix input; keeping the last value"
        );
    }
    matrix.clear_diagonal();
    debug!(size = matrix.rows().len(), "generated car matrix");
    Ok(matrix)
}

/// Rescale every value cell: above 20 by 0.75, otherwise by 1.25, then
/// round to one decimal place.
pub fn multiply_matrix(df: &DataFrame) -> Result<DataFrame> {
    multiply_matrix_with(df, &Rescale::default())
}

/// Rescale every cell except the [`INDEX_COLUMN`], when one is present.
///
/// All other columns must be numeric. Null cells stay null.
pub fn multiply_matrix_with(df: &DataFrame, rescale: &Rescale) -> Result<DataFrame> {
    let lookup = ColumnLookup::for_frame("matrix", df);
    let index_name = lookup.get(INDEX_COLUMN);

    let mut columns = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let name = column.name().as_str();
        if Some(name) == index_name {
            columns.push(column.clone());
            continue;
        }
        let mut values = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let value = optional_f64_at(column, name, row)?;
            values.push(value.map(|v| rescale_value(v, rescale)));
        }
        columns.push(Column::new(column.name().clone(), values));
    }
    Ok(DataFrame::new(columns)?)
}

/// Apply the rescale rule to a single value.
pub fn rescale_value(value: f64, rescale: &Rescale) -> f64 {
    round_to_decimals(value * rescale.factor_for(value), rescale.decimals)
}
