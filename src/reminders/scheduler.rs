//! Reminder scheduler for periodic hydration notifications.
//!
//! This module provides the [`ReminderScheduler`] which keeps a single pending
//! timer task. The task sleeps for the reminder interval, fires the reminder
//! and re-arms itself with the interval in force at that moment. Stopping,
//! snoozing and every settings change abort that task and arm a new one.

use std::{fmt, sync::Arc, time::Duration};

use chrono::{DateTime, Local, Timelike};
use log::{debug, info, warn};
use tokio::{
    sync::{Mutex, broadcast},
    task::JoinHandle,
    time,
};

use crate::{
    error::Result,
    events::{AppEvent, publish},
    messages::{MessageContext, TimeSegment, generate},
    reminders::{Notification, Notifier, Permission},
    store::{SettingKey, SettingValue, Settings, Store},
    validation::{validate_interval, validate_snooze},
};

/// Lifecycle of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No pending timer.
    Stopped,
    /// A timer is pending.
    Scheduled,
    /// A reminder is being delivered.
    Firing,
}

impl fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SchedulerState::Stopped => write!(f, "stopped"),
            SchedulerState::Scheduled => write!(f, "scheduled"),
            SchedulerState::Firing => write!(f, "firing"),
        }
    }
}

/// State shared with the timer task.
#[derive(Debug, Clone, Copy)]
struct TimerState {
    state: SchedulerState,
    next_fire_time: Option<DateTime<Local>>,
}

/// Snapshot returned by [`ReminderScheduler::status`].
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerStatus {
    pub state: SchedulerState,
    pub is_running: bool,
    pub next_fire_time: Option<DateTime<Local>>,
    pub settings: Settings,
    /// Whether the settings could not be loaded and defaults are in use.
    pub settings_warning: bool,
    pub permission: Permission,
}

/// Schedules reminders according to the stored settings.
///
/// Only the reminder task runs outside the console task. It shares the
/// settings, the timer state and the latest [`MessageContext`] through
/// `Arc<Mutex<_>>`, so the store itself never crosses a task boundary.
///
/// # Examples
///
/// ```no_run
/// let mut scheduler = ReminderScheduler::new(store, Arc::new(TerminalNotifier), events, context);
/// scheduler.init().await;
/// scheduler.snooze(10).await?;
/// ```
pub struct ReminderScheduler<S: Store, N: Notifier + Send + Sync + 'static> {
    store: Arc<S>,
    notifier: Arc<N>,
    events: broadcast::Sender<AppEvent>,
    /// Context of the next generated message, refreshed by the console
    message_context: Arc<Mutex<MessageContext>>,
    settings: Arc<Mutex<Settings>>,
    timer_state: Arc<Mutex<TimerState>>,
    /// Handle of the pending timer task
    timer: Option<JoinHandle<()>>,
    settings_warning: bool,
    permission: Permission,
}

impl<S: Store, N: Notifier + Send + Sync + 'static> ReminderScheduler<S, N> {
    /// Creates a stopped scheduler with default settings.
    ///
    /// # Arguments
    ///
    /// * `store` - Store holding the reminder settings
    /// * `notifier` - Surface used to display reminders
    /// * `events` - Channel receiving `ReminderTriggered` events
    /// * `message_context` - Context used to generate reminder messages
    pub fn new(
        store: Arc<S>,
        notifier: Arc<N>,
        events: broadcast::Sender<AppEvent>,
        message_context: Arc<Mutex<MessageContext>>,
    ) -> Self {
        ReminderScheduler {
            store,
            notifier,
            events,
            message_context,
            settings: Arc::new(Mutex::new(Settings::default())),
            timer_state: Arc::new(Mutex::new(TimerState {
                state: SchedulerState::Stopped,
                next_fire_time: None,
            })),
            timer: None,
            settings_warning: false,
            permission: Permission::Default,
        }
    }

    /// Loads the settings, checks the notification permission and starts.
    ///
    /// The permission is requested when it was never decided.
    pub async fn init(&mut self) {
        self.load_settings().await;

        self.permission = match self.notifier.permission() {
            Permission::Default => self.notifier.request_permission(),
            permission => permission,
        };
        if self.permission != Permission::Granted {
            warn!("notifications are not permitted, reminders are in-app only");
        }

        self.start().await;
    }

    /// Loads the settings from the store.
    ///
    /// When the store fails the defaults are used and the warning flag is set.
    async fn load_settings(&mut self) {
        let settings = match self.store.get_settings().await {
            Ok(settings) => {
                self.settings_warning = false;
                settings
            }
            Err(e) => {
                warn!("failed to load reminder settings, using defaults: {}", e);
                self.settings_warning = true;
                Settings::default()
            }
        };
        debug!("reminder settings: {:?}", settings);
        *self.settings.lock().await = settings;
    }

    /// Arms the timer with the reminder interval.
    ///
    /// Does nothing when the scheduler is already running or when
    /// notifications are disabled.
    pub async fn start(&mut self) {
        if self.timer.is_some() {
            info!("reminder scheduler already running");
            return;
        }

        let settings = *self.settings.lock().await;
        if !settings.notifications_enabled {
            info!("notifications disabled, reminder scheduler not started");
            return;
        }

        info!(
            "starting reminders every {} minutes",
            settings.reminder_interval
        );
        self.arm(minutes(settings.reminder_interval)).await;
    }

    /// Cancels the pending timer.
    pub async fn stop(&mut self) {
        if self.cancel_timer().await {
            info!("reminder scheduler stopped");
        }

        let mut timer_state = self.timer_state.lock().await;
        timer_state.state = SchedulerState::Stopped;
        timer_state.next_fire_time = None;
    }

    /// Replaces the pending timer with a one-shot delay of `minutes`.
    ///
    /// The regular interval resumes after the snoozed reminder fired. Snoozing
    /// while notifications are disabled does nothing.
    ///
    /// # Errors
    ///
    /// A validation error when `minutes` is outside `1..=240`.
    pub async fn snooze(&mut self, minutes_to_wait: i64) -> Result<()> {
        let delay = validate_snooze(minutes_to_wait)?;

        if !self.settings.lock().await.notifications_enabled {
            info!("notifications disabled, snooze ignored");
            return Ok(());
        }

        self.cancel_timer().await;
        info!("reminder snoozed for {} minutes", delay);
        self.arm(minutes(delay)).await;
        Ok(())
    }

    /// Validates, persists and applies a new reminder interval.
    ///
    /// The scheduler is restarted so the next reminder is one full interval
    /// away.
    ///
    /// # Errors
    ///
    /// A validation error when `minutes` is outside `15..=240`, or the store
    /// error when persisting failed. Nothing changes in both cases.
    pub async fn update_interval(&mut self, minutes_between: i64) -> Result<()> {
        let interval = validate_interval(minutes_between)?;
        self.store
            .update_setting(
                SettingKey::ReminderInterval,
                SettingValue::Int(interval as i64),
            )
            .await?;
        self.settings.lock().await.reminder_interval = interval;
        info!("reminder interval set to {} minutes", interval);

        self.restart().await;
        Ok(())
    }

    /// Reloads the settings from the store and restarts the scheduler.
    pub async fn reload_settings(&mut self) {
        self.load_settings().await;
        self.restart().await;
    }

    /// Enables or disables notifications, starting or stopping the scheduler.
    pub async fn toggle_notifications(&mut self, enabled: bool) -> Result<()> {
        self.store
            .update_setting(
                SettingKey::NotificationsEnabled,
                SettingValue::Bool(enabled),
            )
            .await?;
        self.settings.lock().await.notifications_enabled = enabled;
        info!("notifications enabled: {}", enabled);

        if enabled {
            self.start().await;
        } else {
            self.stop().await;
        }
        Ok(())
    }

    /// Enables or disables the reminder sound.
    pub async fn toggle_sound(&mut self, enabled: bool) -> Result<()> {
        self.store
            .update_setting(SettingKey::SoundEnabled, SettingValue::Bool(enabled))
            .await?;
        self.settings.lock().await.sound_enabled = enabled;
        info!("reminder sound enabled: {}", enabled);
        Ok(())
    }

    /// Acknowledges a reminder without drinking. The cadence is unchanged.
    pub fn skip(&self) {
        info!("reminder skipped");
    }

    pub async fn status(&self) -> SchedulerStatus {
        let timer_state = *self.timer_state.lock().await;
        SchedulerStatus {
            state: timer_state.state,
            is_running: self.timer.is_some(),
            next_fire_time: timer_state.next_fire_time,
            settings: *self.settings.lock().await,
            settings_warning: self.settings_warning,
            permission: self.permission,
        }
    }

    async fn restart(&mut self) {
        self.stop().await;
        self.start().await;
    }

    /// Aborts the pending timer task and waits until it is gone.
    ///
    /// The task only stops at its next await point, so it is awaited before
    /// the caller writes the timer state. Returns whether a task was pending.
    async fn cancel_timer(&mut self) -> bool {
        let Some(handle) = self.timer.take() else {
            return false;
        };

        handle.abort();
        if let Err(e) = handle.await {
            if !e.is_cancelled() {
                warn!("reminder task failed: {}", e);
            }
        }
        true
    }

    /// Spawns the timer task, firing first after `first_delay`.
    async fn arm(&mut self, first_delay: Duration) {
        schedule(&self.timer_state, first_delay).await;

        let notifier = Arc::clone(&self.notifier);
        let settings = Arc::clone(&self.settings);
        let timer_state = Arc::clone(&self.timer_state);
        let message_context = Arc::clone(&self.message_context);
        let events = self.events.clone();
        let permission = self.permission;

        let handle = tokio::spawn(async move {
            let mut delay = first_delay;
            loop {
                debug!("next reminder in {} seconds", delay.as_secs());
                time::sleep(delay).await;

                timer_state.lock().await.state = SchedulerState::Firing;
                let current = *settings.lock().await;
                let mut context = message_context.lock().await.clone();
                context.time_segment = TimeSegment::from_hour(Local::now().hour());
                fire(notifier.as_ref(), &current, permission, &context, &events);

                delay = minutes(current.reminder_interval);
                schedule(&timer_state, delay).await;
            }
        });
        self.timer = Some(handle);
    }
}

fn minutes(count: u32) -> Duration {
    Duration::from_secs(count as u64 * 60)
}

async fn schedule(timer_state: &Mutex<TimerState>, delay: Duration) {
    let next_fire_time = chrono::Duration::from_std(delay)
        .ok()
        .and_then(|delay| Local::now().checked_add_signed(delay));

    let mut timer_state = timer_state.lock().await;
    timer_state.state = SchedulerState::Scheduled;
    timer_state.next_fire_time = next_fire_time;
}

/// Delivers a reminder: sound, notification when permitted, in-app event.
fn fire<N: Notifier>(
    notifier: &N,
    settings: &Settings,
    permission: Permission,
    context: &MessageContext,
    events: &broadcast::Sender<AppEvent>,
) {
    let message = generate(context);
    info!("reminder: {}", message);

    if settings.sound_enabled {
        if let Err(e) = notifier.play_sound() {
            debug!("reminder sound skipped: {}", e);
        }
    }
    if permission == Permission::Granted {
        notifier.show(&Notification::reminder(&message));
    } else {
        debug!("notification not permitted, in-app reminder only");
    }

    publish(
        events,
        AppEvent::ReminderTriggered {
            timestamp: Local::now(),
            message,
        },
    );
}
