//! Configuration file structures for WaterBuddy.
//!
//! This module defines the configuration file format using YAML. The
//! configuration is split into two sections: weather settings and reminder
//! settings. Every field has a default, so an empty file is a valid
//! configuration.
//!
//! User preferences such as the reminder interval or the daily goal are not
//! part of this file: they are settings stored next to the records and changed
//! from the console.
//!
//! # Configuration File Format
//!
//! ```yaml
//! weather:
//!   # OpenWeatherMap api key, weather falls back to static data when empty
//!   api_key: "your-api-key"
//!   base_url: "https://api.openweathermap.org/data/2.5/weather"
//!   latitude: 48.8566
//!   longitude: 2.3522
//!   # How long fetched weather is reused, in seconds
//!   cache_duration: 7200
//!   fallback:
//!     temperature: 25.0
//!     humidity: 60
//!     condition: "clear sky"
//!     location: "Paris"
//!
//! reminder:
//!   # Default delay of the snooze command, in minutes
//!   snooze_minutes: 10
//! ```
//!
//! # Environment Variable Overrides
//!
//! Any value can be overridden with the `WATERBUDDY_` prefix, sections being
//! separated by `__`:
//!
//! ```bash
//! export WATERBUDDY_WEATHER__API_KEY="your-api-key"
//! export WATERBUDDY_REMINDER__SNOOZE_MINUTES=15
//! ```

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

/// Root configuration structure.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Weather configuration
    pub weather: WeatherConfig,
    /// Reminder configuration
    pub reminder: ReminderConfig,
}

impl Config {
    /// Loads the configuration from a YAML file with environment overrides.
    ///
    /// A missing file is not an error: figment treats it as empty, so the
    /// defaults and environment variables still apply.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the YAML configuration file.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// let config = Config::load("config.yaml")?;
    /// println!("Snooze: {} minutes", config.reminder.snooze_minutes);
    /// ```
    pub fn load(path: &str) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("WATERBUDDY_").split("__"))
            .extract()
    }
}

/// OpenWeatherMap configuration.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WeatherConfig {
    /// OpenWeatherMap api key.
    ///
    /// When empty, no request is made and the fallback weather is used.
    pub api_key: String,

    /// Url of the current weather endpoint.
    pub base_url: String,

    /// Latitude of the location.
    pub latitude: f64,

    /// Longitude of the location.
    pub longitude: f64,

    /// Number of seconds a fetched weather stays fresh.
    pub cache_duration: u64,

    /// Weather used when nothing better is available.
    pub fallback: FallbackWeather,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        WeatherConfig {
            api_key: String::new(),
            base_url: "https://api.openweathermap.org/data/2.5/weather".to_string(),
            latitude: 39.9042,
            longitude: 116.4074,
            cache_duration: 2 * 60 * 60,
            fallback: FallbackWeather::default(),
        }
    }
}

/// Static weather data.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FallbackWeather {
    /// Temperature in °C
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: u32,
    pub condition: String,
    pub location: String,
}

impl Default for FallbackWeather {
    fn default() -> Self {
        FallbackWeather {
            temperature: 25.0,
            humidity: 60,
            condition: "clear sky".to_string(),
            location: "Beijing".to_string(),
        }
    }
}

/// Reminder configuration.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ReminderConfig {
    /// Delay used by `snooze` when no duration is given, in minutes.
    pub snooze_minutes: u32,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        ReminderConfig { snooze_minutes: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_yaml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "weather:\n  api_key: abc\n  latitude: 48.85\n  fallback:\n    temperature: 18.5\nreminder:\n  snooze_minutes: 5"
        )
        .unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.weather.api_key, "abc");
        assert_eq!(config.weather.latitude, 48.85);
        assert_eq!(config.weather.fallback.temperature, 18.5);
        assert_eq!(config.weather.fallback.humidity, 60);
        assert_eq!(config.weather.cache_duration, 7200);
        assert_eq!(config.reminder.snooze_minutes, 5);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = NamedTempFile::new().unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_environment_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "reminder:\n  snooze_minutes: 5")?;
            jail.set_env("WATERBUDDY_REMINDER__SNOOZE_MINUTES", "20");
            jail.set_env("WATERBUDDY_WEATHER__API_KEY", "from-env");

            let config = Config::load("config.yaml")?;

            assert_eq!(config.reminder.snooze_minutes, 20);
            assert_eq!(config.weather.api_key, "from-env");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "reminder:\n  snooze_minutes: soon").unwrap();

        assert!(Config::load(file.path().to_str().unwrap()).is_err());
    }
}
