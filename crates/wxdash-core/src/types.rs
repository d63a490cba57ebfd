//! Core data types for weather samples and forecasts

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Timestamp type (Unix epoch seconds, UTC)
pub type Timestamp = i64;

/// One 3-hour forecast slot as delivered by a weather source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawSample {
    /// Start of the slot
    pub timestamp_utc: Timestamp,

    pub temperature_c: f64,

    /// Short category label, e.g. "Clear" or "Rain"
    pub condition: String,

    /// Human readable condition detail
    pub description: String,

    pub icon_code: String,

    /// Relative humidity; not range checked
    pub humidity_pct: i64,

    pub wind_speed_mps: f64,

    /// Rain plus snow volume for the slot, 0 when absent
    #[serde(default)]
    pub precipitation_mm: f64,
}

/// Forecast summary for one UTC calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySummary {
    pub date_utc: NaiveDate,
    pub temperature_high_c: i64,
    pub temperature_low_c: i64,
    pub dominant_condition: String,
    pub representative_description: String,
    pub representative_icon_code: String,
    pub humidity_pct_avg: i64,
    pub wind_speed_kph_avg: i64,
    pub precipitation_mm_total: f64,

    /// Number of samples folded into this day
    pub sample_count: usize,
}

impl DailySummary {
    /// Abbreviated weekday, e.g. "Mon"
    pub fn day_name(&self) -> String {
        self.date_utc.format("%a").to_string()
    }

    /// Long label, e.g. "Monday, Jan 5"
    pub fn day_label(&self) -> String {
        self.date_utc.format("%A, %b %-d").to_string()
    }
}

/// Where a current-conditions observation was taken
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub city: String,
    pub country: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

/// Current weather at a location, normalised to metric display values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentConditions {
    pub location: Location,
    pub temp_c: i64,
    pub feels_like_c: i64,
    pub temp_min_c: i64,
    pub temp_max_c: i64,
    pub condition: String,
    pub description: String,
    pub icon_code: String,
    pub humidity_pct: i64,
    pub pressure_hpa: i64,
    pub wind_speed_kph: i64,
    pub wind_deg: Option<f64>,

    /// Visibility in kilometres, one decimal place
    pub visibility_km: Option<f64>,
    pub clouds_pct: Option<i64>,
    pub sunrise: Option<Timestamp>,
    pub sunset: Option<Timestamp>,

    /// Offset from UTC in seconds
    pub timezone_offset: i64,
    pub observed_at: Timestamp,
}

/// Current conditions plus the daily forecast for the same place
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub forecast: Vec<DailySummary>,
}
