use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_ICON_URL: &str = "https://openweathermap.org/img/wn";

/// Key shipped in sample configs; requests made with it will be rejected
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenWeatherConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub icon_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub default_city: Option<String>,
    /// "C" or "F"
    pub default_unit: Option<String>,
    pub max_recent: Option<usize>,
    pub max_favorites: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub openweather: Option<OpenWeatherConfig>,
    pub dashboard: Option<DashboardConfig>,
    pub server: Option<ServerConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolved settings handed to the OpenWeatherMap client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenWeatherSettings {
    pub api_key: String,
    pub base_url: String,
    pub icon_url: String,
    pub timeout: Duration,
}

impl OpenWeatherSettings {
    pub fn has_placeholder_key(&self) -> bool {
        self.api_key.is_empty() || self.api_key == PLACEHOLDER_API_KEY
    }
}

/// Resolved dashboard limits and defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    pub default_city: String,
    pub default_unit: String,
    pub max_recent: usize,
    pub max_favorites: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        AppConfig::default().dashboard_settings()
    }
}

impl AppConfig {
    /// Load configuration from WXDASH_CONFIG path (TOML) if present, with reasonable defaults
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("WXDASH_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        Self::from_path(path)
    }

    /// Read a TOML file; a missing file yields the defaults
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let cfg = if path.exists() {
            let s = fs::read_to_string(path)?;
            Self::from_toml_str(&s)?
        } else {
            AppConfig::default()
        };
        Ok(cfg)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str::<AppConfig>(s)?)
    }

    /// OpenWeatherMap settings; OPENWEATHER_API_KEY overrides the configured key
    pub fn openweather(&self) -> OpenWeatherSettings {
        self.openweather_with_key(std::env::var("OPENWEATHER_API_KEY").ok())
    }

    pub fn openweather_with_key(&self, key_override: Option<String>) -> OpenWeatherSettings {
        let ow = self.openweather.as_ref();
        let api_key = key_override
            .filter(|k| !k.trim().is_empty())
            .or_else(|| ow.and_then(|o| o.api_key.clone()))
            .unwrap_or_else(|| PLACEHOLDER_API_KEY.to_string());
        OpenWeatherSettings {
            api_key,
            base_url: ow
                .and_then(|o| o.base_url.clone())
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            icon_url: ow
                .and_then(|o| o.icon_url.clone())
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_ICON_URL.to_string()),
            timeout: Duration::from_secs(ow.and_then(|o| o.timeout_secs).unwrap_or(10)),
        }
    }

    pub fn dashboard_settings(&self) -> DashboardSettings {
        let d = self.dashboard.as_ref();
        DashboardSettings {
            default_city: d
                .and_then(|d| d.default_city.clone())
                .unwrap_or_else(|| "London".to_string()),
            default_unit: d
                .and_then(|d| d.default_unit.clone())
                .unwrap_or_else(|| "C".to_string()),
            max_recent: d.and_then(|d| d.max_recent).unwrap_or(5),
            max_favorites: d.and_then(|d| d.max_favorites).unwrap_or(10),
        }
    }

    /// Get HTTP bind address (default 0.0.0.0:8080)
    pub fn http_bind(&self) -> String {
        self.server
            .as_ref()
            .and_then(|s| s.bind.clone())
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
    }
}
