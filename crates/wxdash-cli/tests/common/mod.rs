#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use wxdash_cli::AppState;
use wxdash_config::DashboardSettings;
use wxdash_core::{
    CurrentConditions, Location, RawSample, SourceError, SourceResult, WeatherSource,
};

// 2024-01-01T00:00:00Z
pub const JAN_1: i64 = 1_704_067_200;

/// In-memory weather source with canned answers
#[derive(Default)]
pub struct FakeSource {
    pub fail_with: Option<SourceError>,
}

impl FakeSource {
    pub fn failing(err: SourceError) -> Self {
        Self {
            fail_with: Some(err),
        }
    }

    fn check(&self, city: &str) -> SourceResult<()> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        if city == "Nowhere" {
            return Err(SourceError::NotFound);
        }
        Ok(())
    }
}

pub fn current(city: &str) -> CurrentConditions {
    CurrentConditions {
        location: Location {
            city: city.to_string(),
            country: Some("GB".into()),
            lat: 51.48,
            lon: 0.0,
        },
        temp_c: 12,
        feels_like_c: 10,
        temp_min_c: 9,
        temp_max_c: 14,
        condition: "Clouds".into(),
        description: "broken clouds".into(),
        icon_code: "04d".into(),
        humidity_pct: 72,
        pressure_hpa: 1015,
        wind_speed_kph: 18,
        wind_deg: Some(225.0),
        visibility_km: Some(10.0),
        clouds_pct: Some(75),
        sunrise: Some(JAN_1 + 29_000),
        sunset: Some(JAN_1 + 57_600),
        timezone_offset: 0,
        observed_at: JAN_1 + 36_000,
    }
}

fn sample(ts: i64, temp: f64, condition: &str) -> RawSample {
    RawSample {
        timestamp_utc: ts,
        temperature_c: temp,
        condition: condition.to_string(),
        description: condition.to_lowercase(),
        icon_code: "10d".into(),
        humidity_pct: 80,
        wind_speed_mps: 2.0,
        precipitation_mm: if condition == "Rain" { 0.5 } else { 0.0 },
    }
}

/// Two days: Rain-dominated Jan 1, Clear Jan 2
pub fn samples() -> Vec<RawSample> {
    vec![
        sample(JAN_1, 9.0, "Rain"),
        sample(JAN_1 + 10_800, 12.0, "Clouds"),
        sample(JAN_1 + 21_600, 14.6, "Rain"),
        sample(JAN_1 + 86_400, 3.0, "Clear"),
        sample(JAN_1 + 97_200, 7.0, "Clear"),
    ]
}

#[async_trait::async_trait]
impl WeatherSource for FakeSource {
    async fn current_by_city(&self, city: &str) -> SourceResult<CurrentConditions> {
        self.check(city)?;
        Ok(current(city))
    }

    async fn current_by_coords(&self, _lat: f64, _lon: f64) -> SourceResult<CurrentConditions> {
        self.check("")?;
        Ok(current("Greenwich"))
    }

    async fn forecast_by_city(&self, city: &str) -> SourceResult<Vec<RawSample>> {
        self.check(city)?;
        Ok(samples())
    }
}

pub fn app_with(source: FakeSource, dashboard: DashboardSettings) -> (Router, Arc<AppState>) {
    wxdash_cli::build_app(Arc::new(source), dashboard, "https://icons.test")
}

pub fn app() -> (Router, Arc<AppState>) {
    app_with(FakeSource::default(), DashboardSettings::default())
}
