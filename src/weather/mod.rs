//! Weather integration.
//!
//! The temperature at the user's location adjusts the daily goal: one cup per
//! 5°C above or below 20°C, between -1 and +4 cups.
//!
//! # Modules
//!
//! - `requester` - HTTP client for the OpenWeatherMap current weather endpoint
//! - `response_structs` - Internal data structures for API responses
//! - `service` - Caching, fallback weather and goal recommendation

mod requester;
mod response_structs;
mod service;

#[cfg(test)]
pub use crate::weather::requester::MockWeatherRequester;
pub use crate::weather::requester::{OpenWeatherRequester, WeatherRequester};
pub use crate::weather::service::{WaterRecommendation, WeatherService, recommendation};
