//! Tabular transformations over vehicle, route and toll tables.
//!
//! Every operation is a pure function from an in-memory Polars
//! `DataFrame` to a new frame, map or list. Inputs are validated through
//! `toll_ingest` before any arithmetic runs, so a missing column or an
//! unreadable cell surfaces as a [`TransformError::Schema`].
//!
//! - **pivot**: car matrix pivoting and conditional rescaling
//! - **stats**: car categories, bus outliers and route filtering
//! - **coverage**: weekly time-coverage validation
//! - **distance**: distance matrices, unrolling and neighbour search
//! - **tolls**: toll rates and time-based discounts
//! - **matrix**: the zero-default [`Matrix`] container shared by the above
//! - **pipeline**: [`TollPipeline`], every operation driven by one `TollConfig`
//!
//! A typical toll pipeline chains
//! [`calculate_distance_matrix`] → [`unroll_distance_matrix`] →
//! [`calculate_toll_rate`] → [`calculate_time_based_toll_rates`].

pub mod coverage;
pub mod distance;
pub mod error;
pub mod matrix;
pub mod pipeline;
pub mod pivot;
pub mod stats;
pub mod tolls;

pub use coverage::{CoverageCheck, coverage_by_pair, time_check};
pub use distance::{
    calculate_distance_matrix, distance_matrix, find_ids_within_ten_percentage_threshold,
    find_ids_within_threshold, shortest_paths, unroll, unroll_distance_matrix,
};
pub use error::{Result, TransformError};
pub use matrix::{INDEX_COLUMN, Matrix};
pub use pipeline::TollPipeline;
pub use pivot::{car_matrix, generate_car_matrix, multiply_matrix, multiply_matrix_with};
pub use stats::{
    filter_routes, filter_routes_with, get_bus_indexes, get_bus_indexes_with, get_type_count,
    get_type_count_with,
};
pub use tolls::{
    calculate_time_based_toll_rates, calculate_time_based_toll_rates_with, calculate_toll_rate,
    calculate_toll_rate_with,
};
