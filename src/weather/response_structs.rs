//! Response structures for the OpenWeatherMap current weather endpoint.

use serde::Deserialize;
use std::fmt;

/// Response from `/data/2.5/weather?lat={lat}&lon={lon}&appid={key}&units=metric`.
///
/// Only the fields used to adjust the daily goal are kept.
#[derive(Deserialize, Debug, Clone)]
pub struct CurrentWeatherResponse {
    /// City name of the requested location.
    pub name: String,
    /// Main readings.
    pub main: MainReadings,
    /// Weather conditions, the first one is the primary condition.
    pub weather: Vec<ConditionResponse>,
}

impl fmt::Display for CurrentWeatherResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "name={}, temp={}, humidity={}, conditions={}",
            self.name,
            self.main.temp,
            self.main.humidity,
            self.weather.len()
        )
    }
}

/// Temperature and humidity readings.
#[derive(Deserialize, Debug, Clone)]
pub struct MainReadings {
    /// Temperature in °C.
    pub temp: f64,
    /// Perceived temperature in °C.
    pub feels_like: f64,
    /// Relative humidity in percent.
    pub humidity: u32,
}

/// A weather condition.
#[derive(Deserialize, Debug, Clone)]
pub struct ConditionResponse {
    /// Human readable condition, e.g. `clear sky`.
    pub description: String,
    /// Icon code, e.g. `01d`.
    pub icon: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_weather_deserialization_ignores_extra_fields() {
        let json = r#"{
            "coord": {"lon": 2.35, "lat": 48.85},
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
            "main": {"temp": 27.4, "feels_like": 28.1, "temp_min": 25.0, "temp_max": 29.0, "pressure": 1015, "humidity": 48},
            "name": "Paris"
        }"#;

        let response: CurrentWeatherResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.name, "Paris");
        assert_eq!(response.main.temp, 27.4);
        assert_eq!(response.main.humidity, 48);
        assert_eq!(response.weather[0].description, "clear sky");
        assert_eq!(response.weather[0].icon, "01d");
    }

    #[test]
    fn test_current_weather_display() {
        let response = CurrentWeatherResponse {
            name: "Lyon".to_string(),
            main: MainReadings {
                temp: 12.0,
                feels_like: 10.5,
                humidity: 80,
            },
            weather: vec![],
        };

        assert_eq!(
            format!("{}", response),
            "name=Lyon, temp=12, humidity=80, conditions=0"
        );
    }
}
