//! Vehicle classes and car value categories.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::CarBins;

/// Vehicle classes that carry their own toll column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    Moto,
    Car,
    Rv,
    Bus,
    Truck,
}

impl VehicleClass {
    /// All classes in toll column order.
    pub const ALL: [VehicleClass; 5] = [
        VehicleClass::Moto,
        VehicleClass::Car,
        VehicleClass::Rv,
        VehicleClass::Bus,
        VehicleClass::Truck,
    ];

    /// Column name used for this class in toll tables.
    pub fn column_name(self) -> &'static str {
        match self {
            Self::Moto => "moto",
            Self::Car => "car",
            Self::Rv => "rv",
            Self::Bus => "bus",
            Self::Truck => "truck",
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Category of a `car` measurement.
///
/// Variants are declared in label order so that ordered maps keyed by
/// `CarType` iterate alphabetically (`high`, `low`, `medium`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarType {
    High,
    Low,
    Medium,
}

impl CarType {
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
            Self::Medium => "medium",
        }
    }

    /// Assign a value to exactly one half-open bin.
    ///
    /// `low` is `(-inf, medium_from)`, `medium` is `[medium_from, high_from)`
    /// and `high` is `[high_from, +inf)`.
    pub fn classify(value: f64, bins: &CarBins) -> Self {
        if value >= bins.high_from {
            Self::High
        } else if value >= bins.medium_from {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for CarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
