//! Weather fetching, caching and goal recommendation.

use chrono::{DateTime, Local};
use log::{debug, info, warn};
use std::fmt;
use tokio::time::{Duration, Instant};

use crate::{
    config::WeatherConfig,
    records::adjusted_goal,
    weather::{WeatherRequester, response_structs::CurrentWeatherResponse},
};

/// Reference temperature in °C, at which the goal is not adjusted.
pub const BASE_TEMPERATURE: f64 = 20.0;
/// Temperature step in °C worth one cup.
pub const DEGREES_PER_CUP: f64 = 5.0;
pub const MIN_ADJUSTMENT: i32 = -1;
pub const MAX_ADJUSTMENT: i32 = 4;

/// Weather as used by the application.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherData {
    /// Temperature in °C, rounded to the unit.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: u32,
    pub condition: String,
    pub location: String,
    pub feels_like: Option<f64>,
    pub icon: Option<String>,
    pub timestamp: DateTime<Local>,
}

impl From<CurrentWeatherResponse> for WeatherData {
    fn from(response: CurrentWeatherResponse) -> Self {
        let primary = response.weather.into_iter().next();
        WeatherData {
            temperature: response.main.temp.round(),
            humidity: response.main.humidity,
            condition: primary
                .as_ref()
                .map(|c| c.description.clone())
                .unwrap_or_default(),
            location: response.name,
            feels_like: Some(response.main.feels_like.round()),
            icon: primary.map(|c| c.icon),
            timestamp: Local::now(),
        }
    }
}

impl fmt::Display for WeatherData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}, {}°C, humidity {}% in {}",
            self.condition, self.temperature, self.humidity, self.location
        )
    }
}

/// Goal adjustment suggested by the weather.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterRecommendation {
    /// Cups to add to the base goal, may be negative.
    pub adjustment: i32,
    /// Base goal with the adjustment applied.
    pub adjusted_goal: u32,
    /// Human readable explanation.
    pub reason: String,
    pub weather: WeatherData,
}

struct CachedWeather {
    data: WeatherData,
    fetched_at: Instant,
}

/// Fetches the weather and keeps the last result for `cache_duration`.
///
/// The service never fails: when the request fails the last fetched weather is
/// returned even if stale, then the configured fallback weather. Without an
/// api key no request is made at all.
pub struct WeatherService<R: WeatherRequester> {
    requester: R,
    config: WeatherConfig,
    cache: Option<CachedWeather>,
    last_error: Option<String>,
}

impl<R: WeatherRequester> WeatherService<R> {
    pub fn new(requester: R, config: WeatherConfig) -> Self {
        WeatherService {
            requester,
            config,
            cache: None,
            last_error: None,
        }
    }

    /// Returns the current weather.
    ///
    /// # Arguments
    ///
    /// * `force_refresh` - Ignore a fresh cached value and request again.
    pub async fn get_weather(&mut self, force_refresh: bool) -> WeatherData {
        if !force_refresh {
            if let Some(data) = self.fresh_cache() {
                debug!("using cached weather");
                return data;
            }
        }

        if self.config.api_key.trim().is_empty() {
            warn!("no weather api key configured, using fallback weather");
            return self.fallback_data();
        }

        match self.requester.current_weather().await {
            Ok(response) => {
                let data = WeatherData::from(response);
                info!("weather updated: {}", data);
                self.cache = Some(CachedWeather {
                    data: data.clone(),
                    fetched_at: Instant::now(),
                });
                self.last_error = None;
                data
            }
            Err(e) => {
                warn!("failed to fetch weather: {}", e);
                self.last_error = Some(e.to_string());
                match &self.cache {
                    Some(cached) => cached.data.clone(),
                    None => self.fallback_data(),
                }
            }
        }
    }

    /// Returns the last fetched weather, stale or not, without any request.
    ///
    /// Falls back to the configured weather when nothing was fetched yet.
    pub fn last_known(&self) -> WeatherData {
        match &self.cache {
            Some(cached) => cached.data.clone(),
            None => self.fallback_data(),
        }
    }

    /// Error of the last failed request, cleared by a successful one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn fresh_cache(&self) -> Option<WeatherData> {
        let cached = self.cache.as_ref()?;
        let max_age = Duration::from_secs(self.config.cache_duration);
        (cached.fetched_at.elapsed() < max_age).then(|| cached.data.clone())
    }

    fn fallback_data(&self) -> WeatherData {
        let fallback = &self.config.fallback;
        WeatherData {
            temperature: fallback.temperature,
            humidity: fallback.humidity,
            condition: fallback.condition.clone(),
            location: fallback.location.clone(),
            feels_like: None,
            icon: None,
            timestamp: Local::now(),
        }
    }
}

/// Maps a temperature to a goal adjustment in cups.
///
/// One cup per 5°C away from 20°C, rounded half up, clamped to `[-1, 4]`.
///
/// # Examples
///
/// ```no_run
/// assert_eq!(calculate_adjustment(30.0), 2);
/// assert_eq!(calculate_adjustment(0.0), -1);
/// ```
pub fn calculate_adjustment(temperature: f64) -> i32 {
    let steps = ((temperature - BASE_TEMPERATURE) / DEGREES_PER_CUP + 0.5).floor() as i32;
    let adjustment = steps.clamp(MIN_ADJUSTMENT, MAX_ADJUSTMENT);
    debug!(
        "temperature {}°C (base {}°C) gives adjustment {}",
        temperature, BASE_TEMPERATURE, adjustment
    );
    adjustment
}

/// Builds the recommendation for `weather` on top of `base_goal`.
pub fn recommendation(weather: &WeatherData, base_goal: u32) -> WaterRecommendation {
    let adjustment = calculate_adjustment(weather.temperature);
    let reason = match adjustment {
        a if a > 0 => format!(
            "It is hot ({}°C), drink {} more cup{} today",
            weather.temperature,
            a,
            if a > 1 { "s" } else { "" }
        ),
        a if a < 0 => format!(
            "It is cool ({}°C), you can drink {} cup less today",
            weather.temperature, -a
        ),
        _ => format!(
            "The temperature is mild ({}°C), keep your goal of {} cups",
            weather.temperature, base_goal
        ),
    };

    WaterRecommendation {
        adjustment,
        adjusted_goal: adjusted_goal(base_goal, adjustment),
        reason,
        weather: weather.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::{
        MockWeatherRequester, OpenWeatherRequester,
        response_structs::{ConditionResponse, MainReadings},
    };

    fn response(temp: f64) -> CurrentWeatherResponse {
        CurrentWeatherResponse {
            name: "Paris".to_string(),
            main: MainReadings {
                temp,
                feels_like: temp + 1.0,
                humidity: 55,
            },
            weather: vec![ConditionResponse {
                description: "clear sky".to_string(),
                icon: "01d".to_string(),
            }],
        }
    }

    fn config_with_key() -> WeatherConfig {
        WeatherConfig {
            api_key: "key".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_calculate_adjustment() {
        assert_eq!(calculate_adjustment(20.0), 0);
        assert_eq!(calculate_adjustment(22.4), 0);
        assert_eq!(calculate_adjustment(22.5), 1);
        assert_eq!(calculate_adjustment(25.0), 1);
        assert_eq!(calculate_adjustment(30.0), 2);
        assert_eq!(calculate_adjustment(17.5), 0);
        assert_eq!(calculate_adjustment(12.0), -1);
        assert_eq!(calculate_adjustment(-10.0), -1);
        assert_eq!(calculate_adjustment(45.0), 4);
    }

    #[test]
    fn test_recommendation() {
        let hot = WeatherData::from(response(31.0));
        let rec = recommendation(&hot, 8);
        assert_eq!(rec.adjustment, 2);
        assert_eq!(rec.adjusted_goal, 10);
        assert!(rec.reason.contains("31°C"));

        let cold = WeatherData::from(response(5.0));
        let rec = recommendation(&cold, 8);
        assert_eq!(rec.adjustment, -1);
        assert_eq!(rec.adjusted_goal, 7);

        let mild = WeatherData::from(response(19.0));
        assert_eq!(recommendation(&mild, 8).adjusted_goal, 8);
    }

    #[test]
    fn test_weather_data_from_response() {
        let data = WeatherData::from(response(27.6));

        assert_eq!(data.temperature, 28.0);
        assert_eq!(data.feels_like, Some(29.0));
        assert_eq!(data.condition, "clear sky");
        assert_eq!(data.icon.as_deref(), Some("01d"));
        assert_eq!(data.location, "Paris");
    }

    #[tokio::test]
    async fn test_no_api_key_uses_fallback_without_request() {
        let mut requester = MockWeatherRequester::new();
        requester.expect_current_weather().times(0);

        let mut service = WeatherService::new(requester, WeatherConfig::default());
        let data = service.get_weather(false).await;

        assert_eq!(data.temperature, 25.0);
        assert_eq!(data.location, "Beijing");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_is_reused_until_expired() {
        let mut requester = MockWeatherRequester::new();
        requester
            .expect_current_weather()
            .times(2)
            .returning(|| Ok(response(24.0)));

        let mut service = WeatherService::new(requester, config_with_key());
        service.get_weather(false).await;
        tokio::time::advance(Duration::from_secs(60 * 60)).await;
        service.get_weather(false).await;
        tokio::time::advance(Duration::from_secs(60 * 60)).await;
        let data = service.get_weather(false).await;

        assert_eq!(data.temperature, 24.0);
    }

    #[tokio::test]
    async fn test_force_refresh_ignores_cache() {
        let mut requester = MockWeatherRequester::new();
        requester
            .expect_current_weather()
            .times(2)
            .returning(|| Ok(response(24.0)));

        let mut service = WeatherService::new(requester, config_with_key());
        service.get_weather(false).await;
        service.get_weather(true).await;
    }

    #[tokio::test]
    async fn test_failed_request_falls_back() {
        let mut server = mockito::Server::new_async().await;
        let url = format!("{}/weather", server.url());
        server
            .mock("GET", "/weather")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let requester = OpenWeatherRequester::new(&url, "key", 0.0, 0.0);
        let mut service = WeatherService::new(requester, config_with_key());

        let data = service.get_weather(false).await;

        assert_eq!(data.temperature, 25.0);
        assert!(service.last_error().is_some());
    }

    #[tokio::test]
    async fn test_failed_refresh_returns_stale_cache() {
        let mut server = mockito::Server::new_async().await;
        let url = format!("{}/weather", server.url());
        let ok = server
            .mock("GET", "/weather")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"name": "Oslo", "main": {"temp": 3.2, "feels_like": 0.0, "humidity": 90}, "weather": [{"description": "snow", "icon": "13d"}]}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let requester = OpenWeatherRequester::new(&url, "key", 0.0, 0.0);
        let mut service = WeatherService::new(requester, config_with_key());
        service.get_weather(false).await;
        ok.assert_async().await;
        ok.remove_async().await;

        server
            .mock("GET", "/weather")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;
        let data = service.get_weather(true).await;

        assert_eq!(data.location, "Oslo");
        assert_eq!(data.temperature, 3.0);
        assert!(service.last_error().is_some());
    }

    #[tokio::test]
    async fn test_last_known_does_not_request() {
        let mut requester = MockWeatherRequester::new();
        requester
            .expect_current_weather()
            .times(1)
            .returning(|| Ok(response(31.0)));

        let mut service = WeatherService::new(requester, config_with_key());
        assert_eq!(service.last_known().location, "Beijing");

        service.get_weather(false).await;

        assert_eq!(service.last_known().temperature, 31.0);
        assert_eq!(service.last_known().location, "Paris");
    }
}
