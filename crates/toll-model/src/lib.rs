//! Data model for vehicle, route and toll tables.
//!
//! This crate holds the strongly-typed vocabulary shared by ingestion and
//! the transformation routines:
//!
//! - **ids**: [`Identifier`] keys used to index matrices and groups
//! - **vehicle**: vehicle classes and the car value categories
//! - **window**: clock-time windows used for time-based discounts
//! - **records**: one row record type per transformation input
//! - **config**: tunable coefficients, thresholds and windows
//! - **error**: schema and configuration errors

pub mod config;
pub mod error;
pub mod ids;
pub mod records;
pub mod vehicle;
pub mod window;

pub use config::{CarBins, Rescale, TimeDiscounts, TollConfig, TollRates};
pub use error::{ConfigError, SchemaError};
pub use ids::Identifier;
pub use records::{
    BusValue, CarRecord, CarValue, CoverageRecord, DistanceEdge, RouteRecord, ScheduledToll,
};
pub use vehicle::{CarType, VehicleClass};
pub use window::TimeWindow;
