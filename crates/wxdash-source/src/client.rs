//! OpenWeatherMap HTTP client

use anyhow::{anyhow, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;
use wxdash_config::OpenWeatherSettings;
use wxdash_core::{CurrentConditions, RawSample, SourceError, SourceResult, WeatherSource};

use crate::payload::{current_from_payload, samples_from_payload, CurrentPayload, ForecastPayload};

pub const CURRENT_ENDPOINT: &str = "/weather";
pub const FORECAST_ENDPOINT: &str = "/forecast";

/// Map a non-success upstream status to a source error
pub fn status_error(status: StatusCode) -> SourceError {
    match status {
        StatusCode::NOT_FOUND => SourceError::NotFound,
        StatusCode::UNAUTHORIZED => SourceError::InvalidApiKey,
        StatusCode::TOO_MANY_REQUESTS => SourceError::RateLimited,
        other => SourceError::Upstream {
            status: other.as_u16(),
        },
    }
}

fn network_error(err: reqwest::Error) -> SourceError {
    // the request URL carries the API key
    SourceError::Network(err.without_url().to_string())
}

/// URL of the 2x PNG for an icon code
pub fn icon_url(icon_base: &str, icon_code: &str) -> String {
    format!("{}/{}@2x.png", icon_base.trim_end_matches('/'), icon_code)
}

pub struct OpenWeatherClient {
    client: Client,
    base_url: Url,
    settings: OpenWeatherSettings,
}

impl OpenWeatherClient {
    pub fn new(settings: OpenWeatherSettings) -> Result<Self> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|e| anyhow!("invalid OpenWeatherMap base url {}: {}", settings.base_url, e))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!(
                "OpenWeatherMap base url cannot carry a path: {}",
                settings.base_url
            ));
        }
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self {
            client,
            base_url,
            settings,
        })
    }

    pub fn settings(&self) -> &OpenWeatherSettings {
        &self.settings
    }

    /// Endpoint URL with the API key, metric units, then `params` in order
    pub fn build_url(&self, endpoint: &str, params: &[(&str, String)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(endpoint.split('/').filter(|s| !s.is_empty()));
        }
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("appid", &self.settings.api_key)
                .append_pair("units", "metric");
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, url: Url) -> SourceResult<T> {
        let resp = self.client.get(url).send().await.map_err(network_error)?;
        let status = resp.status();
        if !status.is_success() {
            warn!(endpoint, status = status.as_u16(), "upstream request failed");
            return Err(status_error(status));
        }
        let body = resp.bytes().await.map_err(network_error)?;
        debug!(endpoint, bytes = body.len(), "upstream response received");
        serde_json::from_slice(&body).map_err(|e| SourceError::MalformedPayload(e.to_string()))
    }
}

#[async_trait::async_trait]
impl WeatherSource for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn current_by_city(&self, city: &str) -> SourceResult<CurrentConditions> {
        let url = self.build_url(CURRENT_ENDPOINT, &[("q", city.to_string())]);
        let payload: CurrentPayload = self.get_json(CURRENT_ENDPOINT, url).await?;
        current_from_payload(&payload)
    }

    #[instrument(skip(self))]
    async fn current_by_coords(&self, lat: f64, lon: f64) -> SourceResult<CurrentConditions> {
        let url = self.build_url(
            CURRENT_ENDPOINT,
            &[("lat", lat.to_string()), ("lon", lon.to_string())],
        );
        let payload: CurrentPayload = self.get_json(CURRENT_ENDPOINT, url).await?;
        current_from_payload(&payload)
    }

    #[instrument(skip(self))]
    async fn forecast_by_city(&self, city: &str) -> SourceResult<Vec<RawSample>> {
        let url = self.build_url(FORECAST_ENDPOINT, &[("q", city.to_string())]);
        let payload: ForecastPayload = self.get_json(FORECAST_ENDPOINT, url).await?;
        let samples = samples_from_payload(&payload)?;
        debug!(samples = samples.len(), "forecast samples mapped");
        Ok(samples)
    }
}
