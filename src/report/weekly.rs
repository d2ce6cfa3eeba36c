//! Weekly hydration report.
//!
//! The report covers the seven days ending at a given date. Days without a
//! record count as zero cups, so the average is always over seven days.

use chrono::{Days, NaiveDate};
use log::{debug, info};

use crate::{
    error::Result,
    records::{adjusted_goal, round_to_one_decimal},
    store::{Achievement, DailyRecord, Store},
    utils::date_range,
};

/// Number of days covered by a report.
pub const REPORT_DAYS: u64 = 7;

/// One line of the per-day breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub cups_drunk: u32,
    /// Zero when there is no record for the day.
    pub adjusted_goal: u32,
    pub goal_reached: bool,
    pub weather_adjustment: i32,
}

/// Aggregated statistics of a week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyStats {
    pub total_cups: u32,
    /// Rounded to one decimal.
    pub average_daily_cups: f64,
    pub goal_days: u32,
    pub total_days: u32,
    /// Percentage of days reaching the goal, rounded to the unit.
    pub goal_rate: u32,
    pub weather_adjusted_days: u32,
}

/// A personalised suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub title: &'static str,
    pub text: String,
}

/// The weekly report.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub stats: WeeklyStats,
    pub days: Vec<DaySummary>,
    /// Achievements unlocked between `start` and `end` included.
    pub achievements: Vec<Achievement>,
    pub suggestions: Vec<Suggestion>,
}

/// Loads the week ending at `end` from the store and builds its report.
pub async fn generate_weekly_report<S: Store>(store: &S, end: NaiveDate) -> Result<WeeklyReport> {
    let start = week_start(end);
    info!("generating weekly report from {} to {}", start, end);

    let records = store.get_records_in_range(start, end).await?;
    let achievements = store.get_achievements().await?;

    Ok(build_weekly_report(&records, &achievements, end))
}

fn week_start(end: NaiveDate) -> NaiveDate {
    end.checked_sub_days(Days::new(REPORT_DAYS - 1))
        .unwrap_or(NaiveDate::MIN)
}

/// Builds the report of the week ending at `end`.
///
/// # Arguments
///
/// * `records` - Records of the week, other dates are ignored
/// * `achievements` - Every achievement, filtered on their unlock date
/// * `end` - Last day of the report
pub fn build_weekly_report(
    records: &[DailyRecord],
    achievements: &[Achievement],
    end: NaiveDate,
) -> WeeklyReport {
    let start = week_start(end);

    let days: Vec<DaySummary> = date_range(start, end)
        .into_iter()
        .map(|date| match records.iter().rev().find(|r| r.date == date) {
            Some(record) => {
                let goal = adjusted_goal(record.goal, record.weather_adjustment);
                DaySummary {
                    date,
                    cups_drunk: record.cups_drunk,
                    adjusted_goal: goal,
                    goal_reached: record.cups_drunk >= goal,
                    weather_adjustment: record.weather_adjustment,
                }
            }
            None => DaySummary {
                date,
                cups_drunk: 0,
                adjusted_goal: 0,
                goal_reached: false,
                weather_adjustment: 0,
            },
        })
        .collect();

    let stats = weekly_stats(&days);

    let achievements: Vec<Achievement> = achievements
        .iter()
        .filter(|a| {
            a.unlocked_at
                .map(|at| {
                    let date = at.date_naive();
                    date >= start && date <= end
                })
                .unwrap_or(false)
        })
        .cloned()
        .collect();

    let suggestions = suggestions(&stats, achievements.len());
    debug!("weekly stats: {:?}", stats);

    WeeklyReport {
        start,
        end,
        stats,
        days,
        achievements,
        suggestions,
    }
}

fn weekly_stats(days: &[DaySummary]) -> WeeklyStats {
    let total_days = days.len() as u32;
    let total_cups: u32 = days.iter().map(|d| d.cups_drunk).sum();
    let goal_days = days.iter().filter(|d| d.goal_reached).count() as u32;

    let (average_daily_cups, goal_rate) = if total_days > 0 {
        (
            round_to_one_decimal(total_cups as f64 / total_days as f64),
            (goal_days as f64 / total_days as f64 * 100.0).round() as u32,
        )
    } else {
        (0.0, 0)
    };

    WeeklyStats {
        total_cups,
        average_daily_cups,
        goal_days,
        total_days,
        goal_rate,
        weather_adjusted_days: days.iter().filter(|d| d.weather_adjustment != 0).count() as u32,
    }
}

fn suggestions(stats: &WeeklyStats, unlocked_count: usize) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    suggestions.push(if stats.average_daily_cups < 6.0 {
        Suggestion {
            title: "Drink more",
            text: "Your average intake is low this week. Try a glass every 45 minutes of work, especially in the morning.".to_string(),
        }
    } else if stats.average_daily_cups < 8.0 {
        Suggestion {
            title: "Good volume",
            text: "Good drinking habits this week, keep it up! Try spreading your glasses evenly over the day.".to_string(),
        }
    } else {
        Suggestion {
            title: "Great volume",
            text: "You drank plenty this week. Keep this rhythm, your body will thank you.".to_string(),
        }
    });

    suggestions.push(if stats.goal_rate < 50 {
        Suggestion {
            title: "Goal rate",
            text: format!(
                "Only {}% of the days reached the goal. Set smaller intermediate goals that are easier to hit.",
                stats.goal_rate
            ),
        }
    } else if stats.goal_rate < 80 {
        Suggestion {
            title: "Goal rate",
            text: format!(
                "{}% of the days reached the goal, nice work! Keep pushing toward 100%.",
                stats.goal_rate
            ),
        }
    } else {
        Suggestion {
            title: "Goal rate",
            text: format!(
                "{}% of the days reached the goal, excellent! Drinking well is now a habit.",
                stats.goal_rate
            ),
        }
    });

    if stats.weather_adjusted_days > 0 {
        suggestions.push(Suggestion {
            title: "Weather",
            text: format!(
                "Your goal followed the weather on {} day{}, a great way to keep your fluid balance.",
                stats.weather_adjusted_days,
                if stats.weather_adjusted_days > 1 { "s" } else { "" }
            ),
        });
    }

    if unlocked_count > 0 {
        suggestions.push(Suggestion {
            title: "Achievements",
            text: format!(
                "You unlocked {} achievement{} this week. Keep the momentum going!",
                unlocked_count,
                if unlocked_count > 1 { "s" } else { "" }
            ),
        });
    }

    suggestions
}

/// Renders the report as Markdown.
pub fn render_markdown(report: &WeeklyReport) -> String {
    let stats = &report.stats;
    let mut lines = vec![
        format!(
            "# Weekly report {} to {}",
            report.start.format("%Y-%m-%d"),
            report.end.format("%Y-%m-%d")
        ),
        String::new(),
        "## Summary".to_string(),
        String::new(),
        format!("- **Total**: {} cups", stats.total_cups),
        format!("- **Average**: {} cups per day", stats.average_daily_cups),
        format!(
            "- **Goal reached**: {}/{} days ({}%)",
            stats.goal_days, stats.total_days, stats.goal_rate
        ),
        format!(
            "- **Weather adjusted days**: {}",
            stats.weather_adjusted_days
        ),
        String::new(),
        "## Days".to_string(),
        String::new(),
        "| Day | Cups | Goal | |".to_string(),
        "|-----|------|------|-|".to_string(),
    ];

    for day in &report.days {
        let goal = match day.adjusted_goal {
            0 => "-".to_string(),
            goal => goal.to_string(),
        };
        lines.push(format!(
            "| {} | {} | {} | {} |",
            day.date.format("%a %m/%d"),
            day.cups_drunk,
            goal,
            if day.goal_reached { "✅" } else { "" }
        ));
    }

    if !report.achievements.is_empty() {
        lines.push(String::new());
        lines.push("## Achievements".to_string());
        lines.push(String::new());
        for achievement in &report.achievements {
            lines.push(format!(
                "- {} **{}**: {}",
                achievement.icon, achievement.name, achievement.description
            ));
        }
    }

    lines.push(String::new());
    lines.push("## Suggestions".to_string());
    lines.push(String::new());
    for suggestion in &report.suggestions {
        lines.push(format!("- **{}**: {}", suggestion.title, suggestion.text));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{achievements::catalog, store::JsonStore};
    use chrono::{Local, TimeZone};
    use tempfile::TempDir;

    fn day(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn record(date: NaiveDate, cups: u32, goal: u32, adjustment: i32) -> DailyRecord {
        DailyRecord {
            id: 0,
            date,
            cups_drunk: cups,
            goal,
            weather_adjustment: adjustment,
            created_at: Local::now(),
            updated_at: Local::now(),
        }
    }

    fn unlocked_on(index: usize, date: NaiveDate) -> Achievement {
        let mut achievement = Achievement::from_definition(index as u64, &catalog()[index]);
        achievement.unlocked_at = Local
            .from_local_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
            .earliest();
        achievement
    }

    #[test]
    fn test_weekly_stats() {
        let records = vec![
            record(day(10), 8, 8, 0),
            record(day(11), 5, 8, 0),
            record(day(12), 10, 8, 2),
            record(day(14), 9, 8, 1),
            record(day(16), 3, 8, 0),
        ];

        let report = build_weekly_report(&records, &[], day(16));

        assert_eq!(report.start, day(10));
        assert_eq!(report.days.len(), 7);
        assert_eq!(report.stats.total_cups, 35);
        assert_eq!(report.stats.average_daily_cups, 5.0);
        assert_eq!(report.stats.goal_days, 3);
        assert_eq!(report.stats.goal_rate, 43);
        assert_eq!(report.stats.weather_adjusted_days, 2);
        assert_eq!(report.days[3].cups_drunk, 0);
        assert_eq!(report.days[3].adjusted_goal, 0);
    }

    #[test]
    fn test_records_outside_the_week_are_ignored() {
        let records = vec![record(day(2), 8, 8, 0), record(day(16), 8, 8, 0)];

        let report = build_weekly_report(&records, &[], day(16));

        assert_eq!(report.stats.total_cups, 8);
        assert_eq!(report.stats.goal_days, 1);
    }

    #[test]
    fn test_achievements_of_the_week() {
        let achievements = vec![
            unlocked_on(0, day(1)),
            unlocked_on(1, day(10)),
            unlocked_on(2, day(16)),
            Achievement::from_definition(3, &catalog()[3]),
        ];

        let report = build_weekly_report(&[], &achievements, day(16));

        let names: Vec<&str> = report.achievements.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Goal Getter", "On a Roll"]);
    }

    #[test]
    fn test_suggestions_follow_thresholds() {
        let low = build_weekly_report(&[], &[], day(16));
        assert_eq!(low.suggestions.len(), 2);
        assert_eq!(low.suggestions[0].title, "Drink more");
        assert!(low.suggestions[1].text.starts_with("Only 0%"));

        let records: Vec<DailyRecord> = (10..=16).map(|d| record(day(d), 9, 8, 1)).collect();
        let achievements = vec![unlocked_on(0, day(12))];
        let high = build_weekly_report(&records, &achievements, day(16));

        let titles: Vec<&str> = high.suggestions.iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec!["Great volume", "Goal rate", "Weather", "Achievements"]
        );
        assert!(high.suggestions[1].text.starts_with("100%"));
    }

    #[test]
    fn test_render_markdown() {
        let records = vec![record(day(15), 8, 8, 0)];
        let achievements = vec![unlocked_on(1, day(15))];
        let report = build_weekly_report(&records, &achievements, day(16));

        let markdown = render_markdown(&report);

        assert!(markdown.starts_with("# Weekly report 2024-06-10 to 2024-06-16"));
        assert!(markdown.contains("- **Total**: 8 cups"));
        assert!(markdown.contains("- **Goal reached**: 1/7 days (14%)"));
        assert!(markdown.contains("| 8 | 8 | ✅ |"));
        assert!(markdown.contains("**Goal Getter**"));
        assert!(markdown.contains("## Suggestions"));
    }

    #[tokio::test]
    async fn test_generate_from_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json").to_str().unwrap().to_string();
        let store = JsonStore::open(path).await.unwrap();
        let record = store.add_record(day(15), 8).await.unwrap();
        store
            .update_record(&DailyRecord {
                cups_drunk: 6,
                ..record
            })
            .await
            .unwrap();

        let report = generate_weekly_report(&store, day(16)).await.unwrap();

        assert_eq!(report.stats.total_cups, 6);
        assert_eq!(report.stats.average_daily_cups, 0.9);
    }
}
