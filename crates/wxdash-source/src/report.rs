//! Full weather reports assembled from a source

use tracing::info;
use wxdash_core::{aggregate_forecast, SourceResult, WeatherReport, WeatherSource};

/// Current conditions and five-day forecast for a city, fetched concurrently
pub async fn report_for_city(source: &dyn WeatherSource, city: &str) -> SourceResult<WeatherReport> {
    let (current, samples) =
        tokio::try_join!(source.current_by_city(city), source.forecast_by_city(city))?;
    let forecast = aggregate_forecast(&samples);
    info!(
        city = %current.location.city,
        samples = samples.len(),
        days = forecast.len(),
        "weather report assembled"
    );
    Ok(WeatherReport { current, forecast })
}

/// Report for coordinates; the forecast is looked up by the resolved city name
pub async fn report_for_coords(
    source: &dyn WeatherSource,
    lat: f64,
    lon: f64,
) -> SourceResult<WeatherReport> {
    let current = source.current_by_coords(lat, lon).await?;
    let samples = source.forecast_by_city(&current.location.city).await?;
    let forecast = aggregate_forecast(&samples);
    info!(
        city = %current.location.city,
        lat,
        lon,
        days = forecast.len(),
        "weather report assembled"
    );
    Ok(WeatherReport { current, forecast })
}
