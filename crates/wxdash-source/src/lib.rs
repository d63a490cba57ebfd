//! Weather source adapters
//!
//! Maps the OpenWeatherMap REST API onto the `WeatherSource` trait and
//! assembles full reports from it. Upstream payloads are normalised to
//! Celsius, m/s, mm and UTC epoch seconds before they reach the core.

pub mod client;
pub mod payload;
pub mod report;

pub use client::*;
pub use payload::{current_from_payload, samples_from_payload};
pub use report::*;
