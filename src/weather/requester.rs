//! HTTP client for the OpenWeatherMap API.
//!
//! This module provides the [`OpenWeatherRequester`] struct for fetching the
//! current weather at a fixed location.

use log::{debug, info};
use mockall::automock;
use reqwest::{Client, Error};

use crate::weather::response_structs::CurrentWeatherResponse;

/// HTTP client requesting the current weather at a configured location.
///
/// # Examples
///
/// ```no_run
/// let requester = OpenWeatherRequester::new(
///     "https://api.openweathermap.org/data/2.5/weather",
///     "your-api-key",
///     48.85,
///     2.35,
/// );
/// let weather = requester.current_weather().await.unwrap();
/// println!("Weather: {}", weather);
/// ```
pub struct OpenWeatherRequester {
    /// Full url of the current weather endpoint
    url: String,
    /// OpenWeatherMap api key
    api_key: String,
    latitude: f64,
    longitude: f64,
    /// HTTP client
    client: Client,
}

/// Trait for requesting the current weather.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
#[automock]
pub trait WeatherRequester {
    /// Fetches the current weather.
    async fn current_weather(&self) -> Result<CurrentWeatherResponse, Error>;
}

impl OpenWeatherRequester {
    /// Create a new [OpenWeatherRequester].
    ///
    /// # Arguments
    ///
    /// * `url` - The url of the current weather endpoint.
    /// * `api_key` - The OpenWeatherMap api key.
    /// * `latitude` - Latitude of the location.
    /// * `longitude` - Longitude of the location.
    pub fn new(url: &str, api_key: &str, latitude: f64, longitude: f64) -> Self {
        OpenWeatherRequester {
            url: url.to_string(),
            api_key: api_key.to_string(),
            latitude,
            longitude,
            client: Client::new(),
        }
    }
}

impl WeatherRequester for OpenWeatherRequester {
    /// Request the current weather in metric units.
    ///
    /// Non success statuses are turned into errors so the caller can fall back
    /// to cached data.
    async fn current_weather(&self) -> Result<CurrentWeatherResponse, Error> {
        info!("request current weather");
        debug!(
            "request {}?lat={}&lon={}&units=metric",
            &self.url, self.latitude, self.longitude
        );

        let response: CurrentWeatherResponse = self
            .client
            .get(&self.url)
            .query(&[
                ("lat", self.latitude.to_string()),
                ("lon", self.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!("response from {} -> {}", &self.url, &response);

        Ok(response)
    }
}
