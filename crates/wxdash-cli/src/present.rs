//! Display-ready views of weather reports

use chrono::NaiveDate;
use serde::Serialize;
use wxdash_core::{
    condition_emoji, format_local_time, format_temperature, wind_direction, CurrentConditions,
    DailySummary, TemperatureUnit, WeatherReport,
};
use wxdash_source::icon_url;

#[derive(Debug, Clone, Serialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub day_name: String,
    pub day_label: String,
    pub high: String,
    pub low: String,
    pub condition: String,
    pub emoji: &'static str,
    pub description: String,
    pub icon_url: String,
    pub humidity_pct: i64,
    pub wind_kph: i64,
    pub precipitation_mm: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentView {
    pub city: String,
    pub country: Option<String>,
    pub temperature: String,
    pub feels_like: String,
    pub high: String,
    pub low: String,
    pub condition: String,
    pub emoji: &'static str,
    pub description: String,
    pub icon_url: String,
    pub humidity_pct: i64,
    pub pressure_hpa: i64,
    pub wind_kph: i64,
    pub wind_direction: Option<&'static str>,
    pub visibility_km: Option<f64>,
    pub clouds_pct: Option<i64>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub observed_at: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeatherView {
    pub unit: TemperatureUnit,
    pub is_favorite: bool,
    pub current: CurrentView,
    pub forecast: Vec<DayView>,
}

pub fn day_view(day: &DailySummary, unit: TemperatureUnit, icon_base: &str) -> DayView {
    DayView {
        date: day.date_utc,
        day_name: day.day_name(),
        day_label: day.day_label(),
        high: format_temperature(day.temperature_high_c, unit),
        low: format_temperature(day.temperature_low_c, unit),
        condition: day.dominant_condition.clone(),
        emoji: condition_emoji(&day.dominant_condition),
        description: day.representative_description.clone(),
        icon_url: icon_url(icon_base, &day.representative_icon_code),
        humidity_pct: day.humidity_pct_avg,
        wind_kph: day.wind_speed_kph_avg,
        precipitation_mm: day.precipitation_mm_total,
    }
}

pub fn current_view(current: &CurrentConditions, unit: TemperatureUnit, icon_base: &str) -> CurrentView {
    let local = |ts: Option<i64>| ts.and_then(|t| format_local_time(t, current.timezone_offset));
    CurrentView {
        city: current.location.city.clone(),
        country: current.location.country.clone(),
        temperature: format_temperature(current.temp_c, unit),
        feels_like: format_temperature(current.feels_like_c, unit),
        high: format_temperature(current.temp_max_c, unit),
        low: format_temperature(current.temp_min_c, unit),
        condition: current.condition.clone(),
        emoji: condition_emoji(&current.condition),
        description: current.description.clone(),
        icon_url: icon_url(icon_base, &current.icon_code),
        humidity_pct: current.humidity_pct,
        pressure_hpa: current.pressure_hpa,
        wind_kph: current.wind_speed_kph,
        wind_direction: current.wind_deg.map(wind_direction),
        visibility_km: current.visibility_km,
        clouds_pct: current.clouds_pct,
        sunrise: local(current.sunrise),
        sunset: local(current.sunset),
        observed_at: current.observed_at,
    }
}

pub fn weather_view(
    report: &WeatherReport,
    unit: TemperatureUnit,
    icon_base: &str,
    is_favorite: bool,
) -> WeatherView {
    WeatherView {
        unit,
        is_favorite,
        current: current_view(&report.current, unit, icon_base),
        forecast: report
            .forecast
            .iter()
            .map(|day| day_view(day, unit, icon_base))
            .collect(),
    }
}
