use thiserror::Error;

use crate::{CurrentConditions, RawSample};

/// Failures reported by a weather source
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    #[error("City not found. Please check the spelling and try again.")]
    NotFound,

    #[error("Invalid API key. Please check your configuration.")]
    InvalidApiKey,

    #[error("Too many requests. Please try again in a minute.")]
    RateLimited,

    #[error("Failed to fetch weather data (upstream status {status}).")]
    Upstream { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Supplier of current conditions and raw forecast samples
#[async_trait::async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current_by_city(&self, city: &str) -> SourceResult<CurrentConditions>;

    async fn current_by_coords(&self, lat: f64, lon: f64) -> SourceResult<CurrentConditions>;

    /// 3-hour samples covering the upcoming days, in upstream order
    async fn forecast_by_city(&self, city: &str) -> SourceResult<Vec<RawSample>>;
}
