//! Console application wiring the hydration services together.
//!
//! This module provides the [`App`] that owns every service, reads commands
//! from the standard input and prints the responses and the reminders.
//!
//! # Architecture
//!
//! The application runs two concurrent flows:
//!
//! 1. **Console Loop** (main task): reads lines from the standard input, parses
//!    them into commands, executes them and prints the responses.
//!
//! 2. **Reminder Task** (background): owned by the
//!    [`ReminderScheduler`], it fires reminders and publishes them on the
//!    event channel. The console loop prints them as they arrive.
//!
//! # Command Processing Flow
//!
//! ```text
//! Console line → Roll over the day → Parse Command → Execute → Refresh message context → Print
//! ```
//!
//! # Example
//!
//! ```no_run
//! let config = Config::load("config.yaml")?;
//! let args = Args::parse();
//!
//! let app = App::new(config, &args).await?;
//! app.start().await?; // Runs until the input ends
//! ```

use std::sync::Arc;

use chrono::{Local, Timelike};
use log::{debug, info, warn};
use tokio::{
    fs,
    io::{AsyncBufReadExt, BufReader},
    sync::{Mutex, broadcast, broadcast::error::RecvError},
};

use crate::{
    Args,
    achievements::AchievementSystem,
    commands::{
        COMMAND_NAME, CommandContext, CommandParseError, Commander, format_error, format_progress,
        format_reminder,
    },
    config::Config,
    events::{self, AppEvent},
    messages::{MessageContext, TimeSegment},
    records::WaterRecorder,
    reminders::{ReminderScheduler, TerminalNotifier},
    store::JsonStore,
    utils::{get_path, today},
    weather::{OpenWeatherRequester, WeatherService},
};

/// Name of the store file inside the data directory.
const STORE_FILE_NAME: &str = "waterbuddy.json";

/// Lines ending the console loop.
const QUIT_COMMANDS: [&str; 2] = ["quit", "exit"];

/// Terminal hydration tracker.
///
/// The `App` owns the services and the event channel. Only the reminder task
/// runs outside of the console loop; it shares the settings and the
/// [`MessageContext`] snapshot with the scheduler through `Arc<Mutex<_>>`.
pub struct App {
    /// Persistent store shared by the services.
    store: Arc<JsonStore>,

    /// Today's record.
    recorder: WaterRecorder<JsonStore>,

    achievements: AchievementSystem<JsonStore>,

    /// Reminder timer, displaying reminders on the terminal.
    scheduler: ReminderScheduler<JsonStore, TerminalNotifier>,

    weather: WeatherService<OpenWeatherRequester>,

    /// Latest inputs of the message generator.
    ///
    /// Refreshed after every command and read by the reminder task when a
    /// reminder fires.
    message_context: Arc<Mutex<MessageContext>>,

    /// Channel on which the services publish their events.
    events: broadcast::Sender<AppEvent>,

    /// Command parser and executor.
    commander: Commander,

    /// Snooze duration when the command gives none.
    snooze_minutes: u32,
}

impl App {
    /// Creates the application from the configuration and the command line arguments.
    ///
    /// Opens the store in the data directory, creating the directory when
    /// needed, loads today's record and seeds the achievement catalog.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration loaded from file containing:
    ///   - `weather`: OpenWeatherMap access, location, cache duration and fallback weather
    ///   - `reminder.snooze_minutes`: Default snooze duration
    ///
    /// * `args` - Command line arguments containing:
    ///   - `data`: Directory path for storing the hydration data
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The data directory cannot be created
    /// - The store file cannot be read or is corrupted
    /// - Today's record or the achievement catalog cannot be written
    pub async fn new(config: Config, args: &Args) -> Result<Self, anyhow::Error> {
        fs::create_dir_all(&args.data).await?;

        let store = Arc::new(JsonStore::open(get_path(&args.data, STORE_FILE_NAME)).await?);
        let events = events::channel();

        let recorder = WaterRecorder::new(Arc::clone(&store), events.clone(), today()).await?;

        let achievements = AchievementSystem::new(Arc::clone(&store));
        achievements.init().await?;

        let weather_config = config.weather;
        let requester = OpenWeatherRequester::new(
            &weather_config.base_url,
            &weather_config.api_key,
            weather_config.latitude,
            weather_config.longitude,
        );
        let weather = WeatherService::new(requester, weather_config);

        let message_context = Arc::new(Mutex::new(MessageContext::default()));
        let scheduler = ReminderScheduler::new(
            Arc::clone(&store),
            Arc::new(TerminalNotifier),
            events.clone(),
            Arc::clone(&message_context),
        );

        Ok(App {
            store,
            recorder,
            achievements,
            scheduler,
            weather,
            message_context,
            events,
            commander: Commander::new(),
            snooze_minutes: config.reminder.snooze_minutes,
        })
    }

    /// Starts the reminders and runs the console loop.
    ///
    /// This method consumes `self` and returns when the standard input ends or
    /// when the user types `quit`. The reminder timer is stopped before
    /// returning.
    ///
    /// # Errors
    ///
    /// Returns an error when the standard input cannot be read.
    pub async fn start(mut self) -> Result<(), anyhow::Error> {
        let mut events = self.events.subscribe();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        self.refresh_message_context().await;
        self.scheduler.init().await;

        println!(
            "Welcome to waterbuddy! Type `help` to list the commands.\n{}",
            format_progress(&self.recorder.state())
        );

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        info!("end of input");
                        break;
                    };
                    if QUIT_COMMANDS.contains(&line.trim()) {
                        break;
                    }
                    if let Some(response) = self.handle_line(&line).await {
                        println!("{}", response);
                    }
                }
                event = events.recv() => match event {
                    Ok(AppEvent::ReminderTriggered { timestamp, message }) => {
                        println!("{}", format_reminder(&timestamp, &message));
                    }
                    Ok(event) => debug!("app event: {:?}", event),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("console lagged behind, {} events skipped", skipped);
                    }
                    // The app holds a sender, the channel cannot close while running
                    Err(RecvError::Closed) => break,
                },
            }
        }

        self.scheduler.stop().await;
        info!("goodbye");
        Ok(())
    }

    /// Processes one console line and returns the response to print.
    ///
    /// Lines typed without a `!` prefix are read as `!water` subcommands.
    /// Returns `None` for blank lines and lines that are not `!water`
    /// commands.
    async fn handle_line(&mut self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let body = if line.starts_with('!') {
            line.to_string()
        } else {
            format!("!{} {}", COMMAND_NAME, line)
        };

        let command = match self.commander.parse(&body) {
            Ok(command) => command,
            Err(CommandParseError::NotForBot) => {
                debug!("ignoring line {}", line);
                return None;
            }
            Err(CommandParseError::InvalidCommand(message)) => return Some(message),
        };

        let now = Local::now();
        if let Err(e) = self.recorder.ensure_today(now.date_naive()).await {
            warn!("failed to load today's record: {}", e);
            return Some(format_error(&e));
        }

        let mut context = CommandContext {
            store: self.store.as_ref(),
            recorder: &mut self.recorder,
            achievements: &self.achievements,
            scheduler: &mut self.scheduler,
            weather: &mut self.weather,
            message_context: self.message_context.as_ref(),
            snooze_minutes: self.snooze_minutes,
            now,
        };
        let result = self.commander.execute(&command, &mut context).await;

        for achievement in &result.unlocked {
            info!("unlocked {} {}", achievement.icon, achievement.name);
        }

        self.refresh_message_context().await;
        Some(result.response)
    }

    /// Rebuilds the message generator inputs from today's progress.
    async fn refresh_message_context(&self) {
        let state = self.recorder.state();

        let unlocked_count = match self.achievements.unlocked().await {
            Ok(unlocked) => unlocked.len(),
            Err(e) => {
                warn!("failed to count unlocked achievements: {}", e);
                0
            }
        };
        let streak_days = match self.achievements.user_stats(state.record.date).await {
            Ok(stats) => stats.streak_days,
            Err(e) => {
                warn!("failed to compute the streak: {}", e);
                0
            }
        };

        let context = MessageContext {
            time_segment: TimeSegment::from_hour(Local::now().hour()),
            temperature: self.weather.last_known().temperature,
            unlocked_count,
            streak_days,
            daily_goal_progress: state.record.cups_drunk as f64 / state.stats.adjusted_goal as f64,
            adjusted_goal: state.stats.adjusted_goal,
            forced_style: None,
        };
        debug!("message context: {:?}", context);

        *self.message_context.lock().await = context;
    }
}
