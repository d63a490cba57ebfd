//! OpenWeatherMap response bodies and their mapping onto core types

use serde::Deserialize;
use wxdash_core::{
    mps_to_kph, round_to_i64, CurrentConditions, Location, RawSample, SourceError, SourceResult,
};

#[derive(Debug, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub struct ConditionBlock {
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct MainBlock {
    pub temp: f64,
    pub feels_like: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub pressure: Option<f64>,
    pub humidity: f64,
}

#[derive(Debug, Deserialize)]
pub struct WindBlock {
    pub speed: f64,
    pub deg: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct CloudsBlock {
    pub all: f64,
}

/// Rain or snow volume; only the 3-hour window is used
#[derive(Debug, Default, Deserialize)]
pub struct VolumeBlock {
    #[serde(rename = "3h")]
    pub three_hours: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct SysBlock {
    pub country: Option<String>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

/// Body of `GET /weather`
#[derive(Debug, Deserialize)]
pub struct CurrentPayload {
    pub name: String,
    pub coord: Coord,
    #[serde(default)]
    pub weather: Vec<ConditionBlock>,
    pub main: MainBlock,
    pub wind: WindBlock,
    pub visibility: Option<f64>,
    pub clouds: Option<CloudsBlock>,
    pub sys: Option<SysBlock>,
    #[serde(default)]
    pub timezone: i64,
    pub dt: i64,
}

/// One entry of the `/forecast` list
#[derive(Debug, Deserialize)]
pub struct ForecastItem {
    pub dt: i64,
    pub main: MainBlock,
    #[serde(default)]
    pub weather: Vec<ConditionBlock>,
    pub wind: WindBlock,
    pub rain: Option<VolumeBlock>,
    pub snow: Option<VolumeBlock>,
}

/// Body of `GET /forecast`
#[derive(Debug, Deserialize)]
pub struct ForecastPayload {
    #[serde(default)]
    pub list: Vec<ForecastItem>,
}

fn first_condition<'a>(weather: &'a [ConditionBlock], at: i64) -> SourceResult<&'a ConditionBlock> {
    weather
        .first()
        .ok_or_else(|| SourceError::MalformedPayload(format!("no weather condition for dt={}", at)))
}

fn volume(block: &Option<VolumeBlock>) -> f64 {
    block
        .as_ref()
        .and_then(|v| v.three_hours)
        .unwrap_or(0.0)
}

/// Map one forecast entry to a sample; rain and snow are summed
pub fn sample_from_item(item: &ForecastItem) -> SourceResult<RawSample> {
    let condition = first_condition(&item.weather, item.dt)?;
    Ok(RawSample {
        timestamp_utc: item.dt,
        temperature_c: item.main.temp,
        condition: condition.main.clone(),
        description: condition.description.clone(),
        icon_code: condition.icon.clone(),
        humidity_pct: round_to_i64(item.main.humidity),
        wind_speed_mps: item.wind.speed,
        precipitation_mm: volume(&item.rain) + volume(&item.snow),
    })
}

pub fn samples_from_payload(payload: &ForecastPayload) -> SourceResult<Vec<RawSample>> {
    payload.list.iter().map(sample_from_item).collect()
}

pub fn current_from_payload(payload: &CurrentPayload) -> SourceResult<CurrentConditions> {
    let condition = first_condition(&payload.weather, payload.dt)?;
    let main = &payload.main;
    let sys = payload.sys.as_ref();

    Ok(CurrentConditions {
        location: Location {
            city: payload.name.clone(),
            country: sys.and_then(|s| s.country.clone()),
            lat: payload.coord.lat,
            lon: payload.coord.lon,
        },
        temp_c: round_to_i64(main.temp),
        feels_like_c: round_to_i64(main.feels_like.unwrap_or(main.temp)),
        temp_min_c: round_to_i64(main.temp_min.unwrap_or(main.temp)),
        temp_max_c: round_to_i64(main.temp_max.unwrap_or(main.temp)),
        condition: condition.main.clone(),
        description: condition.description.clone(),
        icon_code: condition.icon.clone(),
        humidity_pct: round_to_i64(main.humidity),
        pressure_hpa: round_to_i64(main.pressure.unwrap_or_default()),
        wind_speed_kph: round_to_i64(mps_to_kph(payload.wind.speed)),
        wind_deg: payload.wind.deg,
        // metres to km, one decimal
        visibility_km: payload.visibility.map(|m| (m / 100.0).round() / 10.0),
        clouds_pct: payload.clouds.as_ref().map(|c| round_to_i64(c.all)),
        sunrise: sys.and_then(|s| s.sunrise),
        sunset: sys.and_then(|s| s.sunset),
        timezone_offset: payload.timezone,
        observed_at: payload.dt,
    })
}
