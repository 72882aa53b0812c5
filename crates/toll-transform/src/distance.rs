//! Distance matrices between toll locations.
//!
//! Edges are undirected. The matrix holds the shortest total distance
//! along the given edges between every pair of locations, so a chain
//! `A-B` (10) and `B-C` (5) yields `A-C` = 15 even though no row lists
//! that pair directly.

use std::collections::{BTreeMap, HashSet};

use ordered_float::OrderedFloat;
use pathfinding::prelude::dijkstra_all;
use polars::prelude::{Column, DataFrame};
use toll_ingest::distance_edges;
use toll_model::{DistanceEdge, Identifier};
use tracing::debug;

use crate::error::{Result, TransformError};
use crate::matrix::{Matrix, identifier_column};
use crate::stats::mean;

/// Build the symmetric all-pairs distance matrix from edge rows.
///
/// Axes list every `id_start` in order of first appearance, followed by
/// any `id_end` not already seen. Unreachable pairs and the diagonal are
/// zero. Repeated edges between the same pair keep the shortest distance,
/// and a zero distance between two locations adds no link.
pub fn calculate_distance_matrix(df: &DataFrame) -> Result<DataFrame> {
    distance_matrix(df)?.to_frame()
}

/// [`calculate_distance_matrix`] as a [`Matrix`].
pub fn distance_matrix(df: &DataFrame) -> Result<Matrix> {
    let edges = distance_edges(df)?;
    Ok(shortest_paths(&edges))
}

/// All-pairs shortest paths over undirected edges.
///
/// Runs Dijkstra from every location. A zero distance between two
/// different locations is an absent link, the same reading an unset
/// matrix cell gets, so an unrolled matrix rebuilds to itself.
pub fn shortest_paths(edges: &[DistanceEdge]) -> Matrix {
    let ids = appearance_order(edges);
    let mut matrix = Matrix::square(ids);
    let size = matrix.rows().len();

    let mut links: Vec<BTreeMap<usize, OrderedFloat<f64>>> = vec![BTreeMap::new(); size];
    for edge in edges {
        let (Some(a), Some(b)) = (
            matrix.row_position(&edge.id_start),
            matrix.row_position(&edge.id_end),
        ) else {
            continue;
        };
        if a == b || edge.distance == 0.0 {
            continue;
        }
        let distance = OrderedFloat(edge.distance);
        for (from, to) in [(a, b), (b, a)] {
            links[from]
                .entry(to)
                .and_modify(|known| *known = (*known).min(distance))
                .or_insert(distance);
        }
    }

    for from in 0..size {
        let reached = dijkstra_all(&from, |&node| {
            links[node]
                .iter()
                .map(|(&next, &distance)| (next, distance))
                .collect::<Vec<_>>()
        });
        for (to, (_, OrderedFloat(distance))) in reached {
            // Each pair is written once, from its lower position, so both
            // cells hold the same sum.
            if to > from {
                matrix.set(from, to, distance);
                matrix.set(to, from, distance);
            }
        }
    }
    debug!(locations = size, edges = edges.len(), "distance matrix built");
    matrix
}

fn appearance_order(edges: &[DistanceEdge]) -> Vec<Identifier> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    let starts = edges.iter().map(|edge| &edge.id_start);
    let ends = edges.iter().map(|edge| &edge.id_end);
    for id in starts.chain(ends) {
        if seen.insert(id.clone()) {
            ids.push(id.clone());
        }
    }
    ids
}

/// Flatten a matrix frame into `id_start`, `id_end`, `distance` rows.
///
/// Rows are emitted row-major over the matrix axes and every cell whose
/// row and column identifiers differ appears exactly once.
pub fn unroll_distance_matrix(df: &DataFrame) -> Result<DataFrame> {
    unroll(&Matrix::from_frame(df)?)
}

/// [`unroll_distance_matrix`] for an in-memory [`Matrix`].
pub fn unroll(matrix: &Matrix) -> Result<DataFrame> {
    let mut starts = Vec::new();
    let mut ends = Vec::new();
    let mut distances = Vec::new();
    for (row, start) in matrix.rows().iter().enumerate() {
        for (column, end) in matrix.columns().iter().enumerate() {
            if start == end {
                continue;
            }
            starts.push(start.clone());
            ends.push(end.clone());
            distances.push(matrix.get(row, column));
        }
    }
    Ok(DataFrame::new(vec![
        identifier_column("id_start", &starts),
        identifier_column("id_end", &ends),
        Column::new("distance".into(), distances),
    ])?)
}

/// `id_start` values whose mean distance lies within 10% of the
/// reference's mean distance.
pub fn find_ids_within_ten_percentage_threshold(
    df: &DataFrame,
    reference_id: &Identifier,
) -> Result<Vec<Identifier>> {
    find_ids_within_threshold(df, reference_id, 0.1)
}

/// `id_start` values whose mean outbound distance lies inside
/// `[m * (1 - tolerance), m * (1 + tolerance)]`, where `m` is the mean
/// outbound distance of `reference_id`. Sorted, unique and inclusive of
/// the reference itself.
///
/// Fails with [`TransformError::NotFound`] when the reference has no rows.
pub fn find_ids_within_threshold(
    df: &DataFrame,
    reference_id: &Identifier,
    tolerance: f64,
) -> Result<Vec<Identifier>> {
    let edges = distance_edges(df)?;
    let mut outbound: BTreeMap<&Identifier, Vec<f64>> = BTreeMap::new();
    for edge in &edges {
        outbound
            .entry(&edge.id_start)
            .or_default()
            .push(edge.distance);
    }
    let means: BTreeMap<&Identifier, f64> = outbound
        .into_iter()
        .filter_map(|(id, distances)| Some((id, mean(distances)?)))
        .collect();

    let Some(&reference) = means.get(reference_id) else {
        return Err(TransformError::NotFound {
            id: reference_id.clone(),
            table: "distance".to_string(),
        });
    };
    let band = reference * tolerance;
    let (lower, upper) = (reference - band, reference + band);
    Ok(means
        .into_iter()
        .filter(|(_, average)| lower <= *average && *average <= upper)
        .map(|(id, _)| id.clone())
        .collect())
}
