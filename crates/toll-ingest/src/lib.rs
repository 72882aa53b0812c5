//! Validated ingestion of in-memory tables.
//!
//! Every transformation reads its input through this crate, which checks
//! the required columns exist and converts each row into the typed record
//! from `toll_model::records`. Column names match case-insensitively and
//! ignore surrounding whitespace.

pub mod cells;
pub mod columns;
pub mod datetime;
pub mod error;
pub mod records;

pub use cells::{identifier_at, optional_f64_at, required_f64_at, text_at};
pub use columns::ColumnLookup;
pub use datetime::{DayRef, parse_clock_time, parse_day, parse_timestamp, resolve_day_time};
pub use error::{IngestError, Result};
pub use records::{
    bus_values, car_records, car_values, coverage_records, distance_edges, route_records,
    scheduled_tolls,
};
