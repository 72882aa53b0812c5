//! Shared utilities for the toll workspace.
//!
//! This crate provides helpers used across the workspace:
//!
//! - **polars**: reading Polars `AnyValue` cells as strings and numbers
//! - **numeric**: decimal rounding
//! - **logging**: `tracing-subscriber` setup for host applications

pub mod logging;
pub mod numeric;
pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use numeric::round_to_decimals;
pub use polars::{any_to_f64, any_to_i64, any_to_string, format_numeric, parse_f64, parse_i64};
