//! Unit conversion and display formatting

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit conversion error
#[derive(Debug, thiserror::Error)]
pub enum UnitError {
    #[error("Unknown temperature unit: {0}")]
    UnknownTemperatureUnit(String),
}

/// Display unit for temperatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "F")]
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// The other unit; used by the unit toggle
    pub fn toggled(&self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "C" | "c" | "celsius" | "metric" => Ok(TemperatureUnit::Celsius),
            "F" | "f" | "fahrenheit" | "imperial" => Ok(TemperatureUnit::Fahrenheit),
            other => Err(UnitError::UnknownTemperatureUnit(other.to_string())),
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemperatureUnit::Celsius => f.write_str("C"),
            TemperatureUnit::Fahrenheit => f.write_str("F"),
        }
    }
}

/// Round to the nearest integer, halves away from zero
pub fn round_to_i64(value: f64) -> i64 {
    value.round() as i64
}

/// Metres per second to kilometres per hour (unrounded)
pub fn mps_to_kph(mps: f64) -> f64 {
    mps * 3.6
}

pub fn celsius_to_fahrenheit(celsius: f64) -> i64 {
    round_to_i64(celsius * 9.0 / 5.0 + 32.0)
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> i64 {
    round_to_i64((fahrenheit - 32.0) * 5.0 / 9.0)
}

/// Render a Celsius temperature in the requested unit, e.g. "12°C" or "54°F"
pub fn format_temperature(celsius: i64, unit: TemperatureUnit) -> String {
    match unit {
        TemperatureUnit::Celsius => format!("{}{}", celsius, unit.symbol()),
        TemperatureUnit::Fahrenheit => {
            format!("{}{}", celsius_to_fahrenheit(celsius as f64), unit.symbol())
        }
    }
}

const COMPASS_POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Eight-point compass direction for a bearing in degrees
pub fn wind_direction(degrees: f64) -> &'static str {
    let index = round_to_i64(degrees / 45.0).rem_euclid(8) as usize;
    COMPASS_POINTS[index]
}

/// Wall-clock time at a location as "07:05 AM"
///
/// `tz_offset` is the location's offset from UTC in seconds. Returns `None`
/// when the shifted timestamp is outside the representable range.
pub fn format_local_time(timestamp: i64, tz_offset: i64) -> Option<String> {
    let shifted = timestamp.checked_add(tz_offset)?;
    DateTime::from_timestamp(shifted, 0).map(|dt| dt.format("%I:%M %p").to_string())
}
