//! Toll rates per vehicle class, with time-of-day discounts.

use chrono::{Datelike, Weekday};
use polars::prelude::{Column, DataFrame, DataType, Expr, IntoLazy, col, lit};
use toll_ingest::{ColumnLookup, optional_f64_at, required_f64_at, scheduled_tolls};
use toll_model::{TimeDiscounts, TollRates, VehicleClass};
use tracing::{debug, warn};

use crate::error::Result;

/// Append `moto`, `car`, `rv`, `bus` and `truck` columns, each the row's
/// `distance` times the class coefficient.
pub fn calculate_toll_rate(df: &DataFrame) -> Result<DataFrame> {
    calculate_toll_rate_with(df, &TollRates::default())
}

/// [`calculate_toll_rate`] with custom coefficients.
///
/// Existing class columns are overwritten.
pub fn calculate_toll_rate_with(df: &DataFrame, rates: &TollRates) -> Result<DataFrame> {
    let lookup = ColumnLookup::for_frame("distance", df);
    let distance_name = lookup.require("distance")?;
    let distance = df.column(distance_name)?;
    for row in 0..df.height() {
        required_f64_at(distance, distance_name, row)?;
    }

    let exprs: Vec<Expr> = VehicleClass::ALL
        .iter()
        .map(|class| {
            (col(distance_name).cast(DataType::Float64) * lit(rates.coefficient(*class)))
                .alias(class.column_name())
        })
        .collect();
    let tolls = df.clone().lazy().with_columns(exprs).collect()?;
    debug!(rows = tolls.height(), "toll rates calculated");
    Ok(tolls)
}

/// Discount toll columns for rows that stay inside one time window.
///
/// Windows are `[00:00, 10:00)`, `[10:00, 18:00)` and `[18:00, 23:59:59]`.
/// A row whose start and end clock times fall in the same window has all
/// five class columns multiplied by 0.8 when it starts Monday to Friday
/// and by 0.7 at the weekend. Rows crossing a window boundary keep their
/// rates. `start_day` and `end_day` columns receive full weekday names.
pub fn calculate_time_based_toll_rates(df: &DataFrame) -> Result<DataFrame> {
    calculate_time_based_toll_rates_with(df, &TimeDiscounts::default())
}

/// [`calculate_time_based_toll_rates`] with custom windows and factors.
///
/// Rows with an unparseable start or end keep their rates and get null
/// day names.
pub fn calculate_time_based_toll_rates_with(
    df: &DataFrame,
    discounts: &TimeDiscounts,
) -> Result<DataFrame> {
    let lookup = ColumnLookup::for_frame("toll", df);
    let schedule = scheduled_tolls(df)?;

    let mut rates = Vec::with_capacity(VehicleClass::ALL.len());
    for class in VehicleClass::ALL {
        let name = lookup.require(class.column_name())?;
        let column = df.column(name)?;
        let mut values = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            values.push(optional_f64_at(column, name, row)?);
        }
        rates.push((name.to_string(), values));
    }

    let mut start_days = Vec::with_capacity(schedule.len());
    let mut end_days = Vec::with_capacity(schedule.len());
    let mut discounted = 0usize;
    let mut unparsed = 0usize;
    for (row, toll) in schedule.iter().enumerate() {
        start_days.push(toll.start.map(|start| weekday_name(start.weekday())));
        end_days.push(toll.end.map(|end| weekday_name(end.weekday())));

        let (Some(start), Some(end)) = (toll.start, toll.end) else {
            unparsed += 1;
            continue;
        };
        if discounts.window_spanning(start.time(), end.time()).is_none() {
            continue;
        }
        let factor = discounts.factor_for(start.weekday());
        for (_, values) in &mut rates {
            if let Some(value) = values[row].as_mut() {
                *value *= factor;
            }
        }
        discounted += 1;
    }
    if unparsed > 0 {
        warn!(rows = unparsed, "toll rows with unparseable timestamps left undiscounted");
    }
    debug!(rows = schedule.len(), discounted, "time-based toll rates applied");

    let mut out = df.clone();
    for (name, values) in rates {
        out.with_column(Column::new(name.into(), values))?;
    }
    out.with_column(Column::new("start_day".into(), start_days))?;
    out.with_column(Column::new("end_day".into(), end_days))?;
    Ok(out)
}

/// Full English weekday name.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
