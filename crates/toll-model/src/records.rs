//! Row records, one per transformation input schema.
//!
//! Each record carries only the columns its operation reads. Ingestion
//! validates a table into a `Vec` of these before any transformation runs.

use chrono::NaiveDateTime;

use crate::ids::Identifier;

/// `id_1`, `id_2`, `car` row used to pivot the car matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct CarRecord {
    pub id_1: Identifier,
    pub id_2: Identifier,
    pub car: f64,
}

/// A single `car` measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarValue {
    pub car: f64,
}

/// A single `bus` measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusValue {
    pub bus: f64,
}

/// `route`, `truck` row used for per-route averages.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    pub route: Identifier,
    pub truck: f64,
}

/// Undirected distance between two toll locations.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceEdge {
    pub id_start: Identifier,
    pub id_end: Identifier,
    pub distance: f64,
}

/// A timed record for an (`id`, `id_2`) pair.
///
/// Timestamps are `None` when the source day/time could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageRecord {
    pub id: Identifier,
    pub id_2: Identifier,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    /// A day cell held a calendar date rather than a weekday name.
    pub dated: bool,
}

impl CoverageRecord {
    /// Both timestamps, when both parsed.
    pub fn interval(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.start?, self.end?))
    }
}

/// Start and end timestamps of a toll row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledToll {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}
