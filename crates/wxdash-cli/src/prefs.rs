//! Dashboard preferences: display unit, favorites and recent searches
//!
//! Held in memory for the lifetime of the process.

use serde::{Deserialize, Serialize};
use wxdash_core::TemperatureUnit;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PreferencesError {
    #[error("Maximum {0} favorites allowed")]
    FavoritesFull(usize),

    #[error("Please enter a city name")]
    EmptyCity,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub unit: TemperatureUnit,
    pub favorites: Vec<String>,

    /// Most recent first
    pub recent_searches: Vec<String>,
    pub last_city: Option<String>,
}

/// Partial update of [`Preferences`]
///
/// A field that is present replaces the stored value; an absent field
/// leaves it untouched. Lists are managed through the dedicated methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreferencesUpdate {
    pub unit: Option<TemperatureUnit>,
    pub last_city: Option<String>,
}

fn normalize_city(city: &str) -> Result<String, PreferencesError> {
    let city = city.trim();
    if city.is_empty() {
        return Err(PreferencesError::EmptyCity);
    }
    Ok(city.to_string())
}

impl Preferences {
    pub fn with_unit(unit: TemperatureUnit) -> Self {
        Self {
            unit,
            ..Self::default()
        }
    }

    pub fn apply(&mut self, update: PreferencesUpdate) {
        if let Some(unit) = update.unit {
            self.unit = unit;
        }
        if let Some(city) = update.last_city {
            self.last_city = Some(city);
        }
    }

    /// Move `city` to the front of the recent list and remember it as the last city
    pub fn record_search(&mut self, city: &str, max_recent: usize) -> Result<(), PreferencesError> {
        let city = normalize_city(city)?;
        self.recent_searches.retain(|c| c != &city);
        self.recent_searches.insert(0, city.clone());
        self.recent_searches.truncate(max_recent);
        self.last_city = Some(city);
        Ok(())
    }

    pub fn is_favorite(&self, city: &str) -> bool {
        self.favorites.iter().any(|c| c == city.trim())
    }

    /// Returns `true` when the city was not already a favorite
    pub fn add_favorite(&mut self, city: &str, max_favorites: usize) -> Result<bool, PreferencesError> {
        let city = normalize_city(city)?;
        if self.favorites.contains(&city) {
            return Ok(false);
        }
        if self.favorites.len() >= max_favorites {
            return Err(PreferencesError::FavoritesFull(max_favorites));
        }
        self.favorites.push(city);
        Ok(true)
    }

    /// Returns `true` when the city was present
    pub fn remove_favorite(&mut self, city: &str) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|c| c != city.trim());
        self.favorites.len() != before
    }

    /// Add or remove; returns whether the city is a favorite afterwards
    pub fn toggle_favorite(&mut self, city: &str, max_favorites: usize) -> Result<bool, PreferencesError> {
        if self.remove_favorite(city) {
            return Ok(false);
        }
        self.add_favorite(city, max_favorites)
    }
}
