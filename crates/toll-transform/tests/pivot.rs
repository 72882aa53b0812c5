//! Tests for car matrix pivoting and rescaling.

use polars::prelude::*;
use toll_model::Identifier;
use toll_transform::{
    INDEX_COLUMN, Matrix, TransformError, car_matrix, generate_car_matrix, multiply_matrix,
};

fn cell(df: &DataFrame, column: &str, row: usize) -> Option<f64> {
    df.column(column).unwrap().f64().unwrap().get(row)
}

#[test]
fn pivot_fills_missing_pairs_and_zeroes_diagonal() {
    let df = df!(
        "id_1" => [1i64, 2, 1, 2],
        "id_2" => [2i64, 1, 3, 2],
        "car" => [5.0, 5.0, 7.0, 9.0],
    )
    .unwrap();

    let matrix = generate_car_matrix(&df).unwrap();

    assert_eq!(matrix.height(), 3);
    assert_eq!(matrix.width(), 4);
    let index: Vec<Option<i64>> = matrix
        .column(INDEX_COLUMN)
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(index, vec![Some(1), Some(2), Some(3)]);
    assert_eq!(cell(&matrix, "2", 0), Some(5.0));
    assert_eq!(cell(&matrix, "3", 0), Some(7.0));
    assert_eq!(cell(&matrix, "2", 1), Some(0.0));
    assert_eq!(cell(&matrix, "1", 2), Some(0.0));
    assert_eq!(cell(&matrix, "3", 1), Some(0.0));
}

#[test]
fn pivot_diagonal_is_zero_and_symmetric_input_stays_symmetric() {
    let df = df!(
        "id_1" => [10i64, 20, 10, 10],
        "id_2" => [20i64, 10, 10, 30],
        "car" => [1.5, 1.5, 4.0, 2.0],
    )
    .unwrap();

    let matrix = car_matrix(&df).unwrap();
    assert!(matrix.is_square());
    for id in matrix.rows() {
        assert_eq!(matrix.value(id, id), Some(0.0));
    }
    // (10, 30) has no mirror in the input, so the result is not symmetric.
    assert!(!matrix.is_symmetric());

    let symmetric = df!(
        "id_1" => [10i64, 20],
        "id_2" => [20i64, 10],
        "car" => [1.5, 1.5],
    )
    .unwrap();
    assert!(car_matrix(&symmetric).unwrap().is_symmetric());
}

#[test]
fn duplicate_pairs_keep_last_value() {
    let df = df!(
        "id_1" => [1i64, 1],
        "id_2" => [2i64, 2],
        "car" => [5.0, 8.0],
    )
    .unwrap();
    let matrix = car_matrix(&df).unwrap();
    assert_eq!(
        matrix.value(&Identifier::Int(1), &Identifier::Int(2)),
        Some(8.0)
    );
}

#[test]
fn pivot_with_text_identifiers() {
    let df = df!(
        "id_1" => ["b", "a"],
        "id_2" => ["a", "b"],
        "car" => [3.0, 4.0],
    )
    .unwrap();
    let matrix = generate_car_matrix(&df).unwrap();
    let index = matrix.column(INDEX_COLUMN).unwrap().str().unwrap();
    assert_eq!(index.get(0), Some("a"));
    assert_eq!(index.get(1), Some("b"));
    assert_eq!(cell(&matrix, "b", 0), Some(4.0));
}

#[test]
fn pivot_requires_car_column() {
    let df = df!("id_1" => [1i64], "id_2" => [2i64]).unwrap();
    assert!(matches!(
        generate_car_matrix(&df),
        Err(TransformError::Schema(_))
    ));
}

#[test]
fn empty_input_yields_empty_matrix() {
    let df = df!(
        "id_1" => Vec::<i64>::new(),
        "id_2" => Vec::<i64>::new(),
        "car" => Vec::<f64>::new(),
    )
    .unwrap();
    let matrix = generate_car_matrix(&df).unwrap();
    assert_eq!(matrix.height(), 0);
    assert_eq!(matrix.width(), 1);
}

#[test]
fn multiply_matrix_reference_values() {
    let df = df!(
        INDEX_COLUMN => [1i64, 2],
        "1" => [0.0, 30.0],
        "2" => [10.0, 20.0],
    )
    .unwrap();

    let scaled = multiply_matrix(&df).unwrap();

    assert_eq!(cell(&scaled, "1", 0), Some(0.0));
    assert_eq!(cell(&scaled, "1", 1), Some(22.5));
    assert_eq!(cell(&scaled, "2", 0), Some(12.5));
    assert_eq!(cell(&scaled, "2", 1), Some(25.0));
    let index = scaled.column(INDEX_COLUMN).unwrap().i64().unwrap();
    assert_eq!(index.get(1), Some(2));
}

#[test]
fn multiply_matrix_rounds_to_one_decimal() {
    let df = df!("a" => [9.7, 21.3], "b" => [Some(1.11), None]).unwrap();
    let scaled = multiply_matrix(&df).unwrap();
    assert_eq!(cell(&scaled, "a", 0), Some(12.1));
    assert_eq!(cell(&scaled, "a", 1), Some(16.0));
    assert_eq!(cell(&scaled, "b", 0), Some(1.4));
    assert_eq!(cell(&scaled, "b", 1), None);
}

#[test]
fn multiply_matrix_twice_differs_from_once() {
    let df = df!("x" => [18.0]).unwrap();
    let once = multiply_matrix(&df).unwrap();
    let twice = multiply_matrix(&once).unwrap();
    assert_eq!(cell(&once, "x", 0), Some(22.5));
    assert_eq!(cell(&twice, "x", 0), Some(16.9));
}

#[test]
fn multiply_matrix_rejects_text_cells() {
    let df = df!("x" => ["high"]).unwrap();
    assert!(matches!(
        multiply_matrix(&df),
        Err(TransformError::Schema(_))
    ));
}

#[test]
fn rescaled_matrix_still_reads_as_matrix() {
    let df = df!(
        "id_1" => [1i64, 2],
        "id_2" => [2i64, 1],
        "car" => [30.0, 30.0],
    )
    .unwrap();
    let scaled = multiply_matrix(&generate_car_matrix(&df).unwrap()).unwrap();
    let matrix = Matrix::from_frame(&scaled).unwrap();
    assert_eq!(
        matrix.value(&Identifier::Int(2), &Identifier::Int(1)),
        Some(22.5)
    );
    assert!(matrix.is_symmetric());
}
