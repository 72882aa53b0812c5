//! Frame-to-record conversion, one function per input schema.

use polars::prelude::DataFrame;
use toll_model::{
    BusValue, CarRecord, CarValue, CoverageRecord, DistanceEdge, RouteRecord, ScheduledToll,
    SchemaError,
};
use tracing::{debug, warn};

use crate::cells::{identifier_at, optional_f64_at, required_f64_at, text_at};
use crate::columns::ColumnLookup;
use crate::datetime::{DayRef, parse_day, parse_timestamp, resolve_day_time};
use crate::error::Result;

/// Read `id_1`, `id_2`, `car` rows for pivoting.
///
/// A null `car` pivots to zero, the same value an absent pair receives.
pub fn car_records(df: &DataFrame) -> Result<Vec<CarRecord>> {
    let lookup = ColumnLookup::for_frame("vehicle", df);
    let id_1_name = lookup.require("id_1")?;
    let id_2_name = lookup.require("id_2")?;
    let car_name = lookup.require("car")?;
    let id_1 = df.column(id_1_name)?;
    let id_2 = df.column(id_2_name)?;
    let car = df.column(car_name)?;

    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        records.push(CarRecord {
            id_1: identifier_at(id_1, id_1_name, row)?,
            id_2: identifier_at(id_2, id_2_name, row)?,
            car: optional_f64_at(car, car_name, row)?.unwrap_or(0.0),
        });
    }
    debug!(rows = records.len(), "read car records");
    Ok(records)
}

/// Read the `car` column. Every row must hold a number.
pub fn car_values(df: &DataFrame) -> Result<Vec<CarValue>> {
    let lookup = ColumnLookup::for_frame("vehicle", df);
    let name = lookup.require("car")?;
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        values.push(CarValue {
            car: required_f64_at(column, name, row)?,
        });
    }
    Ok(values)
}

/// Read the `bus` column. Every row must hold a number.
pub fn bus_values(df: &DataFrame) -> Result<Vec<BusValue>> {
    let lookup = ColumnLookup::for_frame("vehicle", df);
    let name = lookup.require("bus")?;
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        values.push(BusValue {
            bus: required_f64_at(column, name, row)?,
        });
    }
    Ok(values)
}

/// Read `route`, `truck` rows.
pub fn route_records(df: &DataFrame) -> Result<Vec<RouteRecord>> {
    let lookup = ColumnLookup::for_frame("vehicle", df);
    let route_name = lookup.require("route")?;
    let truck_name = lookup.require("truck")?;
    let route = df.column(route_name)?;
    let truck = df.column(truck_name)?;

    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        records.push(RouteRecord {
            route: identifier_at(route, route_name, row)?,
            truck: required_f64_at(truck, truck_name, row)?,
        });
    }
    Ok(records)
}

/// Read `id_start`, `id_end`, `distance` edges.
///
/// Distances must be finite and non-negative.
pub fn distance_edges(df: &DataFrame) -> Result<Vec<DistanceEdge>> {
    let lookup = ColumnLookup::for_frame("distance", df);
    let start_name = lookup.require("id_start")?;
    let end_name = lookup.require("id_end")?;
    let distance_name = lookup.require("distance")?;
    let id_start = df.column(start_name)?;
    let id_end = df.column(end_name)?;
    let distance = df.column(distance_name)?;

    let mut edges = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let value = required_f64_at(distance, distance_name, row)?;
        if !value.is_finite() || value < 0.0 {
            return Err(SchemaError::invalid_value(
                distance_name,
                row,
                value.to_string(),
                "a finite non-negative distance",
            )
            .into());
        }
        edges.push(DistanceEdge {
            id_start: identifier_at(id_start, start_name, row)?,
            id_end: identifier_at(id_end, end_name, row)?,
            distance: value,
        });
    }
    debug!(edges = edges.len(), "read distance edges");
    Ok(edges)
}

/// Read timed records keyed by (`id`, `id_2`).
///
/// Rows whose day or time cells do not parse keep `None` timestamps
/// rather than failing the whole table.
pub fn coverage_records(df: &DataFrame) -> Result<Vec<CoverageRecord>> {
    let lookup = ColumnLookup::for_frame("coverage", df);
    let id_name = lookup.require("id")?;
    let id_2_name = lookup.require("id_2")?;
    let id = df.column(id_name)?;
    let id_2 = df.column(id_2_name)?;
    let start_day = df.column(lookup.require("startDay")?)?;
    let start_time = df.column(lookup.require("startTime")?)?;
    let end_day = df.column(lookup.require("endDay")?)?;
    let end_time = df.column(lookup.require("endTime")?)?;

    let mut records = Vec::with_capacity(df.height());
    let mut unparsed = 0usize;
    for row in 0..df.height() {
        let start_day_text = text_at(start_day, row)?;
        let end_day_text = text_at(end_day, row)?;
        let (start, end) = resolve_day_time(
            &start_day_text,
            &text_at(start_time, row)?,
            &end_day_text,
            &text_at(end_time, row)?,
        );
        if start.is_none() || end.is_none() {
            unparsed += 1;
        }
        let dated = [&start_day_text, &end_day_text]
            .iter()
            .any(|text| matches!(parse_day(text), Some(DayRef::Date(_))));
        records.push(CoverageRecord {
            id: identifier_at(id, id_name, row)?,
            id_2: identifier_at(id_2, id_2_name, row)?,
            start,
            end,
            dated,
        });
    }
    if unparsed > 0 {
        warn!(rows = unparsed, "coverage rows with unparseable timestamps");
    }
    Ok(records)
}

/// Read start and end timestamps of toll rows.
///
/// With `startDay`/`endDay` columns present the day and time cells are
/// combined; otherwise `startTime`/`endTime` must hold full timestamps.
pub fn scheduled_tolls(df: &DataFrame) -> Result<Vec<ScheduledToll>> {
    let lookup = ColumnLookup::for_frame("toll", df);
    let start_time = df.column(lookup.require("startTime")?)?;
    let end_time = df.column(lookup.require("endTime")?)?;
    let days = match (lookup.get("startDay"), lookup.get("endDay")) {
        (Some(start), Some(end)) => Some((df.column(start)?, df.column(end)?)),
        _ => None,
    };

    let mut tolls = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let start_text = text_at(start_time, row)?;
        let end_text = text_at(end_time, row)?;
        let (start, end) = match days {
            Some((start_day, end_day)) => resolve_day_time(
                &text_at(start_day, row)?,
                &start_text,
                &text_at(end_day, row)?,
                &end_text,
            ),
            None => (parse_timestamp(&start_text), parse_timestamp(&end_text)),
        };
        tolls.push(ScheduledToll { start, end });
    }
    Ok(tolls)
}
