//! Tunable coefficients, thresholds and windows.
//!
//! Every field has a default matching the reference toll schedule, so an
//! empty TOML document yields [`TollConfig::default`].
//!
//! ```
//! use toll_model::TollConfig;
//!
//! let config = TollConfig::from_toml_str("[rates]\ntruck = 4.0\n").unwrap();
//! assert_eq!(config.rates.truck, 4.0);
//! assert_eq!(config.rates.car, 1.2);
//! ```

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::vehicle::VehicleClass;
use crate::window::TimeWindow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TollConfig {
    /// Multiple of the mean `bus` value a row must exceed to be an outlier.
    pub bus_outlier_factor: f64,
    /// Mean `truck` value a route must exceed to be kept.
    pub route_truck_threshold: f64,
    /// Relative band around the reference mean distance.
    pub neighbor_tolerance: f64,
    pub rates: TollRates,
    pub discounts: TimeDiscounts,
    pub car_bins: CarBins,
    pub rescale: Rescale,
}

impl Default for TollConfig {
    fn default() -> Self {
        Self {
            bus_outlier_factor: 2.0,
            route_truck_threshold: 7.0,
            neighbor_tolerance: 0.1,
            rates: TollRates::default(),
            discounts: TimeDiscounts::default(),
            car_bins: CarBins::default(),
            rescale: Rescale::default(),
        }
    }
}

impl TollConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rates.validate()?;
        self.discounts.validate()?;
        self.car_bins.validate()?;
        self.rescale.validate()?;
        non_negative("bus_outlier_factor", self.bus_outlier_factor)?;
        finite("route_truck_threshold", self.route_truck_threshold)?;
        non_negative("neighbor_tolerance", self.neighbor_tolerance)?;
        Ok(())
    }
}

/// Per-class toll coefficient applied to distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TollRates {
    pub moto: f64,
    pub car: f64,
    pub rv: f64,
    pub bus: f64,
    pub truck: f64,
}

impl Default for TollRates {
    fn default() -> Self {
        Self {
            moto: 0.8,
            car: 1.2,
            rv: 1.5,
            bus: 2.2,
            truck: 3.6,
        }
    }
}

impl TollRates {
    pub fn coefficient(&self, class: VehicleClass) -> f64 {
        match class {
            VehicleClass::Moto => self.moto,
            VehicleClass::Car => self.car,
            VehicleClass::Rv => self.rv,
            VehicleClass::Bus => self.bus,
            VehicleClass::Truck => self.truck,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for class in VehicleClass::ALL {
            non_negative(&format!("rates.{class}"), self.coefficient(class))?;
        }
        Ok(())
    }
}

/// Discount multipliers for rows that stay inside one time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeDiscounts {
    pub weekday: f64,
    pub weekend: f64,
    pub windows: Vec<TimeWindow>,
}

impl Default for TimeDiscounts {
    fn default() -> Self {
        Self {
            weekday: 0.8,
            weekend: 0.7,
            windows: TimeWindow::default_day(),
        }
    }
}

impl TimeDiscounts {
    /// Multiplier for a row starting on `day`.
    pub fn factor_for(&self, day: Weekday) -> f64 {
        match day {
            Weekday::Sat | Weekday::Sun => self.weekend,
            _ => self.weekday,
        }
    }

    /// The window holding both clock times, if any.
    pub fn window_spanning(
        &self,
        start: chrono::NaiveTime,
        end: chrono::NaiveTime,
    ) -> Option<&TimeWindow> {
        self.windows.iter().find(|window| window.spans(start, end))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("discounts.weekday", self.weekday)?;
        non_negative("discounts.weekend", self.weekend)?;
        for (idx, window) in self.windows.iter().enumerate() {
            if window.end < window.start {
                return Err(ConfigError::invalid(
                    format!("discounts.windows[{idx}]"),
                    format!("end {} precedes start {}", window.end, window.start),
                ));
            }
        }
        Ok(())
    }
}

/// Lower edges of the `medium` and `high` car bins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarBins {
    pub medium_from: f64,
    pub high_from: f64,
}

impl Default for CarBins {
    fn default() -> Self {
        Self {
            medium_from: 15.0,
            high_from: 25.0,
        }
    }
}

impl CarBins {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("car_bins.medium_from", self.medium_from)?;
        finite("car_bins.high_from", self.high_from)?;
        if self.high_from < self.medium_from {
            return Err(ConfigError::invalid(
                "car_bins",
                "high_from must not be below medium_from",
            ));
        }
        Ok(())
    }
}

/// Conditional element-wise rescaling of a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rescale {
    pub threshold: f64,
    /// Factor for values strictly above `threshold`.
    pub above: f64,
    /// Factor for every other value.
    pub at_or_below: f64,
    pub decimals: u32,
}

impl Default for Rescale {
    fn default() -> Self {
        Self {
            threshold: 20.0,
            above: 0.75,
            at_or_below: 1.25,
            decimals: 1,
        }
    }
}

impl Rescale {
    pub fn factor_for(&self, value: f64) -> f64 {
        if value > self.threshold {
            self.above
        } else {
            self.at_or_below
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("rescale.threshold", self.threshold)?;
        finite("rescale.above", self.above)?;
        finite("rescale.at_or_below", self.at_or_below)?;
        if self.decimals > 15 {
            return Err(ConfigError::invalid(
                "rescale.decimals",
                "at most 15 decimal places are representable",
            ));
        }
        Ok(())
    }
}

fn finite(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} is not finite")))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::invalid(field, format!("{value} is negative")));
    }
    Ok(())
}
