//! Tests for distance matrices, unrolling and neighbour search.

use polars::prelude::*;
use toll_model::Identifier;
use toll_transform::{
    INDEX_COLUMN, TransformError, calculate_distance_matrix, distance_matrix,
    find_ids_within_ten_percentage_threshold, find_ids_within_threshold, unroll_distance_matrix,
};

fn id(value: i64) -> Identifier {
    Identifier::Int(value)
}

fn edges(starts: &[i64], ends: &[i64], distances: &[f64]) -> DataFrame {
    df!(
        "id_start" => starts,
        "id_end" => ends,
        "distance" => distances,
    )
    .unwrap()
}

#[test]
fn chained_edges_sum_to_transitive_distance() {
    let df = edges(&[1, 2], &[2, 3], &[10.0, 5.0]);

    let matrix = distance_matrix(&df).unwrap();

    assert_eq!(matrix.value(&id(1), &id(3)), Some(15.0));
    assert_eq!(matrix.value(&id(3), &id(1)), Some(15.0));
    assert_eq!(matrix.value(&id(1), &id(2)), Some(10.0));
    assert_eq!(matrix.value(&id(2), &id(3)), Some(5.0));
    assert_eq!(matrix.value(&id(2), &id(2)), Some(0.0));
    assert!(matrix.is_symmetric());
}

#[test]
fn shorter_chain_beats_longer_direct_edge() {
    let df = edges(&[1, 2, 1], &[2, 3, 3], &[10.0, 5.0, 20.0]);
    let matrix = distance_matrix(&df).unwrap();
    assert_eq!(matrix.value(&id(1), &id(3)), Some(15.0));
}

#[test]
fn repeated_edge_keeps_shortest_distance() {
    let df = edges(&[1, 2], &[2, 1], &[10.0, 8.0]);
    let matrix = distance_matrix(&df).unwrap();
    assert_eq!(matrix.value(&id(1), &id(2)), Some(8.0));
    assert_eq!(matrix.value(&id(2), &id(1)), Some(8.0));
}

#[test]
fn unreachable_pairs_are_zero() {
    let df = edges(&[1, 3], &[2, 4], &[4.0, 6.0]);
    let matrix = distance_matrix(&df).unwrap();
    assert_eq!(matrix.value(&id(1), &id(4)), Some(0.0));
    assert_eq!(matrix.value(&id(3), &id(4)), Some(6.0));
}

#[test]
fn axes_follow_first_appearance() {
    let df = edges(&[30, 10], &[10, 20], &[1.0, 2.0]);
    let frame = calculate_distance_matrix(&df).unwrap();
    let index: Vec<Option<i64>> = frame
        .column(INDEX_COLUMN)
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(index, vec![Some(30), Some(10), Some(20)]);
    let names: Vec<&str> = frame
        .get_columns()
        .iter()
        .map(|column| column.name().as_str())
        .collect();
    assert_eq!(names, vec![INDEX_COLUMN, "30", "10", "20"]);
}

#[test]
fn unroll_covers_every_off_diagonal_cell_once() {
    let matrix = calculate_distance_matrix(&edges(&[1, 2], &[2, 3], &[10.0, 5.0])).unwrap();

    let unrolled = unroll_distance_matrix(&matrix).unwrap();

    assert_eq!(unrolled.height(), 6);
    let starts: Vec<Option<i64>> = unrolled
        .column("id_start")
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .collect();
    let ends: Vec<Option<i64>> = unrolled
        .column("id_end")
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .collect();
    let distances: Vec<Option<f64>> = unrolled
        .column("distance")
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(
        starts,
        vec![Some(1), Some(1), Some(2), Some(2), Some(3), Some(3)]
    );
    assert_eq!(
        ends,
        vec![Some(2), Some(3), Some(1), Some(3), Some(1), Some(2)]
    );
    assert_eq!(
        distances,
        vec![
            Some(10.0),
            Some(15.0),
            Some(10.0),
            Some(5.0),
            Some(15.0),
            Some(5.0)
        ]
    );
}

#[test]
fn unrolled_rows_rebuild_the_same_matrix() {
    let df = edges(&[1, 2, 3], &[2, 3, 4], &[3.0, 4.0, 5.0]);
    let original = distance_matrix(&df).unwrap();
    let unrolled = unroll_distance_matrix(&original.to_frame().unwrap()).unwrap();
    let rebuilt = distance_matrix(&unrolled).unwrap();
    assert_eq!(rebuilt.rows(), original.rows());
    for a in original.rows() {
        for b in original.rows() {
            assert_eq!(rebuilt.value(a, b), original.value(a, b));
        }
    }
}

#[test]
fn disconnected_components_survive_unrolling() {
    let df = edges(&[1, 3], &[2, 4], &[4.0, 6.0]);
    let original = distance_matrix(&df).unwrap();

    let unrolled = unroll_distance_matrix(&original.to_frame().unwrap()).unwrap();
    let rebuilt = distance_matrix(&unrolled).unwrap();

    assert_eq!(rebuilt.value(&id(1), &id(2)), Some(4.0));
    assert_eq!(rebuilt.value(&id(3), &id(4)), Some(6.0));
    assert_eq!(rebuilt.value(&id(1), &id(3)), Some(0.0));
    assert_eq!(rebuilt.value(&id(2), &id(4)), Some(0.0));
}

#[test]
fn zero_distance_rows_add_no_link() {
    let df = edges(&[1, 2, 3], &[2, 3, 1], &[5.0, 0.0, 7.0]);
    let matrix = distance_matrix(&df).unwrap();
    assert_eq!(matrix.value(&id(2), &id(3)), Some(12.0));
    assert_eq!(matrix.value(&id(1), &id(3)), Some(7.0));
}

#[test]
fn unroll_requires_index_column() {
    let df = df!("1" => [0.0]).unwrap();
    assert!(matches!(
        unroll_distance_matrix(&df),
        Err(TransformError::Schema(_))
    ));
}

#[test]
fn neighbours_within_ten_percent() {
    let df = edges(
        &[1, 1, 2, 2, 3, 3, 4],
        &[2, 3, 1, 3, 1, 2, 1],
        &[8.0, 12.0, 10.0, 11.0, 20.0, 20.0, 9.0],
    );
    // means: 1 -> 10.0, 2 -> 10.5, 3 -> 20.0, 4 -> 9.0 (band is [9, 11])
    assert_eq!(
        find_ids_within_ten_percentage_threshold(&df, &id(1)).unwrap(),
        vec![id(1), id(2), id(4)]
    );
    assert_eq!(
        find_ids_within_threshold(&df, &id(3), 0.0).unwrap(),
        vec![id(3)]
    );
}

#[test]
fn unknown_reference_is_not_found() {
    let df = edges(&[1], &[2], &[5.0]);
    let err = find_ids_within_ten_percentage_threshold(&df, &id(2)).unwrap_err();
    match err {
        TransformError::NotFound { id: missing, .. } => assert_eq!(missing, id(2)),
        other => panic!("unexpected error: {other}"),
    }
}
