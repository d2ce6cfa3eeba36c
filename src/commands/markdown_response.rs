//! Markdown response formatters for console commands.
//!
//! This module provides functions to format the console responses in Markdown.
//! All responses are designed to be short and readable in a terminal.

use chrono::{DateTime, Local};

use crate::{
    achievements::AchievementProgress,
    error::HydrationError,
    records::RecorderState,
    reminders::{SchedulerState, SchedulerStatus},
    store::Achievement,
    weather::WaterRecommendation,
};

/// Formats the help message showing available commands.
///
/// # Examples
///
/// ```
/// let help = format_help();
/// assert!(help.contains("Commands:"));
/// ```
pub fn format_help() -> String {
    let body = "Commands:\n\
        - `status`: show today's progress and the next reminder\n\
        - `drink`: record a cup of water\n\
        - `undo`: remove the last recorded cup\n\
        - `set <cups>`: set today's cup count\n\
        - `reset`: reset today's cup count\n\
        - `goal <cups>`: change your daily goal (1 to 20)\n\
        - `adjust up|down <cups>` or `adjust off`: adjust today's goal by hand\n\
        - `weather`: adjust today's goal to the weather\n\
        - `interval <minutes>`: change the reminder interval (15 to 240)\n\
        - `snooze [minutes]`: delay the next reminder\n\
        - `skip`: dismiss the current reminder\n\
        - `notifications on|off`, `sound on|off`: toggle reminders and their sound\n\
        - `reload`: reload the settings and restart the reminders\n\
        - `achievements`: list achievements and your progress\n\
        - `report`: show the report of the last seven days\n\
        - `message`: get a hydration tip now\n\
        - `help`: show this help message\n\n\
        Commands can be typed as `!water drink` or simply `drink`.";

    body.to_owned()
}

/// Formats a response for an unknown command.
pub fn format_unknown_command() -> String {
    "Unknown command. Type `help` for more information.".to_owned()
}

/// Formats the usage of a subcommand called with invalid arguments.
///
/// # Arguments
///
/// * `subcommand` - The name of the subcommand
///
/// # Examples
///
/// ```
/// let msg = format_invalid_usage("goal");
/// assert!(msg.contains("Usage:"));
/// ```
pub fn format_invalid_usage(subcommand: &str) -> String {
    let usage = match subcommand {
        "set" => "!water set <cups>",
        "goal" => "!water goal <cups>",
        "adjust" => "!water adjust up <cups> | !water adjust down <cups> | !water adjust off",
        "interval" => "!water interval <minutes>",
        "snooze" => "!water snooze [minutes]",
        "notifications" => "!water notifications on|off",
        "sound" => "!water sound on|off",
        _ => "!water help",
    };
    format!("Invalid {} command. Usage: `{}`", subcommand, usage)
}

/// Formats a service error.
pub fn format_error(error: &HydrationError) -> String {
    match error {
        HydrationError::Validation(e) => format!("⚠️ {}", e),
        HydrationError::Store(_) => {
            format!("❌ Your data could not be saved or loaded: {}", error)
        }
        HydrationError::NotFound { .. } | HydrationError::CapabilityUnavailable(_) => {
            format!("❌ {}", error)
        }
    }
}

/// Formats today's progress in one line.
///
/// # Examples
///
/// ```no_run
/// // 💧 **3/8** cups today (37.5%), 5 to go
/// println!("{}", format_progress(&recorder.state()));
/// ```
pub fn format_progress(state: &RecorderState) -> String {
    let stats = &state.stats;
    if stats.is_goal_reached() {
        return format!(
            "💧 **{}/{}** cups today ({}%), goal reached! 🎉",
            state.record.cups_drunk, stats.adjusted_goal, stats.completion_rate
        );
    }

    format!(
        "💧 **{}/{}** cups today ({}%), {} to go",
        state.record.cups_drunk, stats.adjusted_goal, stats.completion_rate, stats.remaining_cups
    )
}

/// Formats today's progress, the goal breakdown and the reminder status.
pub fn format_status(state: &RecorderState, status: &SchedulerStatus) -> String {
    let mut lines = vec![format_progress(state)];

    let adjustment = state.record.weather_adjustment;
    lines.push(match adjustment {
        0 => format!("- **Goal**: {} cups", state.record.goal),
        a => format!(
            "- **Goal**: {} cups {} {} for the weather",
            state.record.goal,
            if a > 0 { "+" } else { "-" },
            a.abs()
        ),
    });

    lines.push(match (status.state, status.next_fire_time) {
        (SchedulerState::Stopped, _) | (_, None) => "- **Reminders**: off".to_owned(),
        (_, Some(next)) => format!(
            "- **Reminders**: every {} minutes, next at {}",
            status.settings.reminder_interval,
            next.format("%H:%M")
        ),
    });
    lines.push(format!(
        "- **Sound**: {}",
        if status.settings.sound_enabled {
            "on"
        } else {
            "off"
        }
    ));

    if status.settings_warning {
        lines.push("⚠️ Settings could not be loaded, defaults are in use.".to_owned());
    }

    lines.join("\n")
}

/// Formats newly unlocked achievements, or an empty string.
pub fn format_unlocked(achievements: &[Achievement]) -> String {
    achievements
        .iter()
        .map(|a| {
            format!(
                "🏆 Achievement unlocked: {} **{}**, {}",
                a.icon, a.name, a.description
            )
        })
        .collect::<Vec<String>>()
        .join("\n")
}

/// Formats every achievement with its progress.
pub fn format_achievements(report: &[(Achievement, AchievementProgress)]) -> String {
    if report.is_empty() {
        return "No achievements available.".to_owned();
    }

    let unlocked = report.iter().filter(|(_, p)| p.unlocked).count();
    let lines = report
        .iter()
        .map(|(achievement, progress)| {
            if progress.unlocked {
                format!(
                    "- ✅ {} **{}**: {}",
                    achievement.icon, achievement.name, achievement.description
                )
            } else {
                format!(
                    "- 🔒 {} **{}**: {} ({}/{}, {}%)",
                    achievement.icon,
                    achievement.name,
                    achievement.description,
                    progress.current,
                    progress.target,
                    progress.percent
                )
            }
        })
        .collect::<Vec<String>>()
        .join("\n");

    format!(
        "Achievements ({}/{}):\n\n{}",
        unlocked,
        report.len(),
        lines
    )
}

/// Formats a weather recommendation.
///
/// # Arguments
///
/// * `recommendation` - The recommendation computed from the weather
/// * `applied` - Whether the adjustment was applied to today's goal
pub fn format_weather(recommendation: &WaterRecommendation, applied: bool) -> String {
    let weather = format!("🌤️ {}", recommendation.weather);
    if applied {
        format!(
            "{}\n{}. Today's goal is now **{}** cups.",
            weather, recommendation.reason, recommendation.adjusted_goal
        )
    } else {
        format!(
            "{}\nWeather adjustment is disabled, your goal is unchanged.",
            weather
        )
    }
}

pub fn format_interval(minutes: i64) -> String {
    format!("⏰ Reminders every **{}** minutes.", minutes)
}

pub fn format_snoozed(minutes: i64, running: bool) -> String {
    if running {
        format!("😴 Next reminder in **{}** minutes.", minutes)
    } else {
        "Reminders are off, nothing to snooze.".to_owned()
    }
}

pub fn format_skipped() -> String {
    "👌 Reminder skipped.".to_owned()
}

pub fn format_toggle(name: &str, enabled: bool) -> String {
    format!("{} {}.", name, if enabled { "on" } else { "off" })
}

pub fn format_reloaded(status: &SchedulerStatus) -> String {
    if status.settings_warning {
        return "⚠️ Settings could not be loaded, defaults are in use.".to_owned();
    }
    "🔄 Settings reloaded.".to_owned()
}

/// Formats a reminder fired by the scheduler.
pub fn format_reminder(timestamp: &DateTime<Local>, message: &str) -> String {
    format!("🔔 [{}] {}", timestamp.format("%H:%M"), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        achievements::catalog,
        error::ValidationError,
        records::compute_stats,
        store::{DailyRecord, Settings},
    };
    use chrono::NaiveDate;

    fn create_state(cups: u32, goal: u32, adjustment: i32) -> RecorderState {
        RecorderState {
            record: DailyRecord {
                id: 1,
                date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
                cups_drunk: cups,
                goal,
                weather_adjustment: adjustment,
                created_at: Local::now(),
                updated_at: Local::now(),
            },
            stats: compute_stats(cups, goal, adjustment),
        }
    }

    fn create_status(state: SchedulerState) -> SchedulerStatus {
        SchedulerStatus {
            state,
            is_running: state != SchedulerState::Stopped,
            next_fire_time: match state {
                SchedulerState::Stopped => None,
                _ => Some(Local::now()),
            },
            settings: Settings::default(),
            settings_warning: false,
            permission: crate::reminders::Permission::Granted,
        }
    }

    #[test]
    fn test_format_help() {
        let help = format_help();
        assert!(help.contains("Commands:"));
        assert!(help.contains("`snooze [minutes]`"));
    }

    #[test]
    fn test_format_progress() {
        assert_eq!(
            format_progress(&create_state(1, 8, 0)),
            "💧 **1/8** cups today (12.5%), 7 to go"
        );
        assert!(format_progress(&create_state(8, 8, 0)).contains("goal reached"));
        assert_eq!(
            format_progress(&create_state(8, 8, 2)),
            "💧 **8/10** cups today (80%), 2 to go"
        );
    }

    #[test]
    fn test_format_status() {
        let status = format_status(
            &create_state(2, 8, 1),
            &create_status(SchedulerState::Scheduled),
        );
        assert!(status.contains("**2/9**"));
        assert!(status.contains("8 cups + 1 for the weather"));
        assert!(status.contains("every 60 minutes"));

        let stopped = format_status(
            &create_state(0, 8, -1),
            &create_status(SchedulerState::Stopped),
        );
        assert!(stopped.contains("8 cups - 1"));
        assert!(stopped.contains("**Reminders**: off"));
    }

    #[test]
    fn test_format_error() {
        let error = HydrationError::from(ValidationError::NothingToUndo);
        assert_eq!(
            format_error(&error),
            "⚠️ no drink recorded today, nothing to undo"
        );
    }

    #[test]
    fn test_format_achievements() {
        let mut first = Achievement::from_definition(1, &catalog()[0]);
        first.unlocked_at = Some(Local::now());
        let collector = Achievement::from_definition(4, &catalog()[3]);
        let report = vec![
            (
                first,
                AchievementProgress {
                    current: 1,
                    target: 1,
                    percent: 100.0,
                    unlocked: true,
                },
            ),
            (
                collector,
                AchievementProgress {
                    current: 10,
                    target: 50,
                    percent: 20.0,
                    unlocked: false,
                },
            ),
        ];

        let output = format_achievements(&report);

        assert!(output.starts_with("Achievements (1/2):"));
        assert!(output.contains("✅"));
        assert!(output.contains("(10/50, 20%)"));
        assert_eq!(format_achievements(&[]), "No achievements available.");
    }

    #[test]
    fn test_format_unlocked() {
        assert_eq!(format_unlocked(&[]), "");
        let achievement = Achievement::from_definition(1, &catalog()[0]);
        assert!(format_unlocked(&[achievement]).contains("**First Sip**"));
    }

    #[test]
    fn test_format_snoozed() {
        assert_eq!(format_snoozed(10, true), "😴 Next reminder in **10** minutes.");
        assert!(format_snoozed(10, false).contains("nothing to snooze"));
    }
}
