//! Categorisation and aggregate filters over vehicle tables.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;
use toll_ingest::{bus_values, car_values, route_records};
use toll_model::{CarBins, CarType, Identifier};
use tracing::debug;

use crate::error::Result;

/// Count `car` values per category.
///
/// Every row lands in exactly one of `low` (< 15), `medium` (15 to < 25)
/// or `high` (>= 25). The map iterates in label order. All three
/// categories are present for non-empty input; empty input yields an
/// empty map.
pub fn get_type_count(df: &DataFrame) -> Result<BTreeMap<CarType, usize>> {
    get_type_count_with(df, &CarBins::default())
}

pub fn get_type_count_with(df: &DataFrame, bins: &CarBins) -> Result<BTreeMap<CarType, usize>> {
    let values = car_values(df)?;
    let mut counts = BTreeMap::new();
    if values.is_empty() {
        return Ok(counts);
    }
    for car_type in [CarType::High, CarType::Low, CarType::Medium] {
        counts.insert(car_type, 0);
    }
    for value in &values {
        *counts.entry(CarType::classify(value.car, bins)).or_insert(0) += 1;
    }
    Ok(counts)
}

/// Row positions whose `bus` value exceeds twice the column mean.
pub fn get_bus_indexes(df: &DataFrame) -> Result<Vec<usize>> {
    get_bus_indexes_with(df, 2.0)
}

/// Row positions whose `bus` value strictly exceeds `factor` times the
/// mean, in ascending order.
pub fn get_bus_indexes_with(df: &DataFrame, factor: f64) -> Result<Vec<usize>> {
    let values = bus_values(df)?;
    let Some(mean) = mean(values.iter().map(|value| value.bus)) else {
        return Ok(Vec::new());
    };
    let limit = factor * mean;
    let indexes: Vec<usize> = values
        .iter()
        .enumerate()
        .filter(|(_, value)| value.bus > limit)
        .map(|(idx, _)| idx)
        .collect();
    debug!(mean, limit, matches = indexes.len(), "bus outliers");
    Ok(indexes)
}

/// Routes whose mean `truck` value exceeds 7, in ascending order.
pub fn filter_routes(df: &DataFrame) -> Result<Vec<Identifier>> {
    filter_routes_with(df, 7.0)
}

pub fn filter_routes_with(df: &DataFrame, threshold: f64) -> Result<Vec<Identifier>> {
    let records = route_records(df)?;
    let mut totals: BTreeMap<Identifier, (f64, usize)> = BTreeMap::new();
    for record in records {
        let entry = totals.entry(record.route).or_insert((0.0, 0));
        entry.0 += record.truck;
        entry.1 += 1;
    }
    Ok(totals
        .into_iter()
        .filter(|(_, (sum, count))| *sum / *count as f64 > threshold)
        .map(|(route, _)| route)
        .collect())
}

/// Arithmetic mean, `None` for an empty sequence.
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(Vec::new()), None);
        assert_eq!(mean(vec![1.0, 2.0, 6.0]), Some(3.0));
    }
}
