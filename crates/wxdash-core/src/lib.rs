//! Core data types, units, and forecast rollups for wxdash
//!
//! This crate holds the weather data model, the daily forecast
//! aggregation, and the `WeatherSource` seam implemented by adapters.

pub mod conditions;
pub mod pipeline;
pub mod rollups;
pub mod types;
pub mod units;

pub use conditions::*;
pub use pipeline::*;
pub use rollups::*;
pub use types::*;
pub use units::*;
