//! Waterbuddy - A terminal hydration tracker.
//!
//! This is the main entry point for waterbuddy, which records the cups of water
//! drunk during the day, reminds the user to drink at a regular interval and
//! adapts the daily goal to the weather.
//!
//! # Overview
//!
//! Waterbuddy runs in a terminal. The user types commands to record drinks and
//! tune the reminders, while a background timer prints a hydration message
//! every reminder interval.
//!
//! # Features
//!
//! - **Daily Tracking**: Record, undo or correct the cups drunk today
//! - **Reminders**: Periodic reminders with snooze and skip, sound and on/off toggles
//! - **Weather Adjustment**: Daily goal adjusted to the current temperature
//! - **Achievements**: Eight achievements unlocked by streaks, totals and goals
//! - **Weekly Report**: Statistics and suggestions for the last seven days
//! - **Varied Messages**: Reminder messages matched to the time of day, weather and progress
//! - **JSON Persistence**: All data kept in a single JSON file
//! - **YAML Configuration**: Simple configuration file format with environment variable support
//!
//! # Configuration
//!
//! Create a `config.yaml` file with your settings, every key is optional:
//!
//! ```yaml
//! weather:
//!   api_key: "your-openweathermap-key"
//!   latitude: 48.8566
//!   longitude: 2.3522
//!   cache_duration: 7200
//!
//! reminder:
//!   snooze_minutes: 10
//! ```
//!
//! # Environment Variable Overrides
//!
//! Override any configuration value using environment variables with the `WATERBUDDY_` prefix:
//!
//! ```bash
//! export WATERBUDDY_WEATHER__API_KEY="your-openweathermap-key"
//! export WATERBUDDY_REMINDER__SNOOZE_MINUTES=15
//! ```
//!
//! # Usage
//!
//! ```bash
//! waterbuddy --config config.yaml --data ./waterbuddy-data
//! ```
//!
//! # Console Commands
//!
//! Once running, type commands with or without the `!water` prefix:
//!
//! - `drink` - Record a cup of water
//! - `status` - Show today's progress and the next reminder
//! - `goal <cups>` - Change the daily goal
//! - `snooze [minutes]` - Delay the next reminder
//! - `report` - Show the weekly report
//! - `help` - Display every command
//! - `quit` - Exit
//!
//! # Architecture
//!
//! The application consists of several modules:
//!
//! - [`achievements`] - Achievement catalog, streaks and unlocking
//! - [`app`] - Console loop wiring the services together
//! - [`commands`] - Command parsing and execution with validation
//! - [`config`] - YAML configuration file structures and loading with environment variable support
//! - [`error`] - Error types shared by the services
//! - [`events`] - In-app event channel
//! - [`messages`] - Reminder message generation
//! - [`records`] - Today's record and its statistics
//! - [`reminders`] - Reminder scheduler and notification surface
//! - [`report`] - Weekly report
//! - [`store`] - JSON persistence
//! - [`utils`] - Utility functions for paths and dates
//! - [`validation`] - Range checks of user inputs
//! - [`weather`] - OpenWeatherMap client and goal recommendation
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)
//!   - Set to `debug` for verbose output
//!   - Set to `warn` or `error` for minimal logging

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{app::App, config::Config};

mod achievements;
mod app;
mod commands;
mod config;
mod error;
mod events;
mod messages;
mod records;
mod reminders;
mod report;
mod store;
mod utils;
mod validation;
mod weather;

/// Command-line arguments of waterbuddy.
///
/// Two command-line arguments are required:
/// - A path to the YAML configuration file
/// - A path to the directory storing the hydration data
///
/// # Examples
///
/// ```bash
/// waterbuddy --config config.yaml --data ./waterbuddy-data
/// ```
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML configuration file.
    ///
    /// See the [`config`] module for the expected format. A missing key takes
    /// its default value.
    #[arg(short, long)]
    config: String,

    /// Path to the directory for storing persistent data.
    ///
    /// The directory is created when missing. It contains `waterbuddy.json`
    /// with the daily records, the achievements and the settings.
    #[arg(short, long)]
    data: String,
}

/// Main entry point of waterbuddy.
///
/// This function initializes the application with the following steps:
///
/// 1. **Logging Setup**: Configures the logger with `info` level by default
///    (can be overridden with the `RUST_LOG` environment variable)
/// 2. **Argument Parsing**: Parses command-line arguments using `clap`
/// 3. **Configuration Loading**: Reads the YAML configuration file with environment variable overrides
/// 4. **Initialization**: Opens the store and loads today's record
/// 5. **Execution**: Starts the reminders and the console loop
///
/// # Error Handling
///
/// Configuration, initialization and console errors are logged and end the
/// program without panicking.
///
/// # Examples
///
/// Run with debug logging to troubleshoot issues:
///
/// ```bash
/// RUST_LOG=debug waterbuddy --config config.yaml --data ./waterbuddy-data
/// ```
#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting waterbuddy {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let mut config = match Config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            return;
        }
    };

    // Normalize the weather URL by removing trailing slash if present
    if config.weather.base_url.ends_with('/') {
        config.weather.base_url.pop();
    }

    let app = match App::new(config, &args).await {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize waterbuddy: {}", e);
            return;
        }
    };

    if let Err(e) = app.start().await {
        error!("Console stopped: {}", e);
    }
}
