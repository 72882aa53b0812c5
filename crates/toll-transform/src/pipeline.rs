//! Configured entry point for all transformations.
//!
//! [`TollPipeline`] holds a validated [`TollConfig`] and forwards each
//! operation to its `*_with` variant with the matching config section.
//!
//! ```ignore
//! use toll_model::TollConfig;
//! use toll_transform::TollPipeline;
//!
//! let pipeline = TollPipeline::new(TollConfig::from_toml_str(&text)?)?;
//! let tolls = pipeline.toll_rates_from_edges(&edges)?;
//! ```

use std::collections::BTreeMap;

use polars::prelude::DataFrame;
use toll_model::{CarType, Identifier, TollConfig};
use tracing::info;

use crate::coverage::time_check;
use crate::distance::{
    calculate_distance_matrix, find_ids_within_threshold, unroll_distance_matrix,
};
use crate::error::Result;
use crate::pivot::{generate_car_matrix, multiply_matrix_with};
use crate::stats::{filter_routes_with, get_bus_indexes_with, get_type_count_with};
use crate::tolls::{calculate_time_based_toll_rates_with, calculate_toll_rate_with};

#[derive(Debug, Clone, Default)]
pub struct TollPipeline {
    config: TollConfig,
}

impl TollPipeline {
    /// Validate `config` and build a pipeline around it.
    pub fn new(config: TollConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TollConfig {
        &self.config
    }

    pub fn car_matrix(&self, df: &DataFrame) -> Result<DataFrame> {
        generate_car_matrix(df)
    }

    pub fn type_count(&self, df: &DataFrame) -> Result<BTreeMap<CarType, usize>> {
        get_type_count_with(df, &self.config.car_bins)
    }

    pub fn bus_indexes(&self, df: &DataFrame) -> Result<Vec<usize>> {
        get_bus_indexes_with(df, self.config.bus_outlier_factor)
    }

    pub fn routes(&self, df: &DataFrame) -> Result<Vec<Identifier>> {
        filter_routes_with(df, self.config.route_truck_threshold)
    }

    pub fn rescale(&self, matrix: &DataFrame) -> Result<DataFrame> {
        multiply_matrix_with(matrix, &self.config.rescale)
    }

    pub fn coverage(&self, df: &DataFrame) -> Result<DataFrame> {
        time_check(df)
    }

    pub fn neighbors(
        &self,
        unrolled: &DataFrame,
        reference: &Identifier,
    ) -> Result<Vec<Identifier>> {
        find_ids_within_threshold(unrolled, reference, self.config.neighbor_tolerance)
    }

    pub fn toll_rates(&self, unrolled: &DataFrame) -> Result<DataFrame> {
        calculate_toll_rate_with(unrolled, &self.config.rates)
    }

    pub fn time_based_toll_rates(&self, tolls: &DataFrame) -> Result<DataFrame> {
        calculate_time_based_toll_rates_with(tolls, &self.config.discounts)
    }

    /// Edge rows → distance matrix → long-form table → toll rates.
    pub fn toll_rates_from_edges(&self, edges: &DataFrame) -> Result<DataFrame> {
        let matrix = calculate_distance_matrix(edges)?;
        let unrolled = unroll_distance_matrix(&matrix)?;
        let tolls = self.toll_rates(&unrolled)?;
        info!(
            locations = matrix.height(),
            pairs = tolls.height(),
            "toll rates derived from edges"
        );
        Ok(tolls)
    }
}
