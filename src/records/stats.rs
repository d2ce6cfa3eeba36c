//! Daily completion statistics.

use serde::Serialize;

/// Progress of a day against its weather adjusted goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HydrationStats {
    /// Percentage of the adjusted goal reached, capped at 100 and rounded to
    /// one decimal.
    pub completion_rate: f64,
    /// Cups still needed to reach the adjusted goal.
    pub remaining_cups: u32,
    /// Daily goal after the weather adjustment, at least 1.
    pub adjusted_goal: u32,
}

impl HydrationStats {
    pub fn is_goal_reached(&self) -> bool {
        self.remaining_cups == 0
    }
}

/// Returns the goal after weather adjustment, never below one cup.
pub fn adjusted_goal(goal: u32, weather_adjustment: i32) -> u32 {
    (goal as i64 + weather_adjustment as i64).max(1) as u32
}

/// Computes the statistics of a day.
///
/// # Arguments
///
/// * `cups_drunk` - Cups recorded today
/// * `goal` - Base daily goal
/// * `weather_adjustment` - Cups added or removed because of the weather
///
/// # Examples
///
/// ```
/// # use waterbuddy::records::compute_stats;
/// let stats = compute_stats(1, 8, 0);
/// assert_eq!(stats.completion_rate, 12.5);
/// assert_eq!(stats.remaining_cups, 7);
/// ```
pub fn compute_stats(cups_drunk: u32, goal: u32, weather_adjustment: i32) -> HydrationStats {
    let adjusted_goal = adjusted_goal(goal, weather_adjustment);
    let rate = (cups_drunk as f64 / adjusted_goal as f64 * 100.0).min(100.0);

    HydrationStats {
        completion_rate: round_to_one_decimal(rate),
        remaining_cups: adjusted_goal.saturating_sub(cups_drunk),
        adjusted_goal,
    }
}

pub fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_cup_of_eight() {
        let stats = compute_stats(1, 8, 0);
        assert_eq!(stats.completion_rate, 12.5);
        assert_eq!(stats.remaining_cups, 7);
        assert_eq!(stats.adjusted_goal, 8);
        assert!(!stats.is_goal_reached());
    }

    #[test]
    fn test_goal_reached() {
        let stats = compute_stats(8, 8, 0);
        assert_eq!(stats.completion_rate, 100.0);
        assert_eq!(stats.remaining_cups, 0);
        assert!(stats.is_goal_reached());
    }

    #[test]
    fn test_weather_adjustment_raises_goal() {
        let stats = compute_stats(8, 8, 2);
        assert_eq!(stats.adjusted_goal, 10);
        assert_eq!(stats.completion_rate, 80.0);
        assert_eq!(stats.remaining_cups, 2);
        assert!(!stats.is_goal_reached());
    }

    #[test]
    fn test_completion_rate_is_capped() {
        let stats = compute_stats(12, 8, 0);
        assert_eq!(stats.completion_rate, 100.0);
        assert_eq!(stats.remaining_cups, 0);
    }

    #[test]
    fn test_adjusted_goal_never_below_one() {
        assert_eq!(adjusted_goal(1, -5), 1);
        assert_eq!(compute_stats(0, 3, -5).adjusted_goal, 1);
        assert_eq!(compute_stats(1, 3, -5).completion_rate, 100.0);
    }

    #[test]
    fn test_rate_rounded_to_one_decimal() {
        // 1 / 3 = 33.333..%
        assert_eq!(compute_stats(1, 3, 0).completion_rate, 33.3);
        // 2 / 3 = 66.666..%
        assert_eq!(compute_stats(2, 3, 0).completion_rate, 66.7);
    }

    #[test]
    fn test_formula_holds_over_the_valid_domain() {
        for goal in 1..=20u32 {
            for adjustment in -5..=5i32 {
                let adjusted = goal as i32 + adjustment;
                if adjusted < 1 {
                    continue;
                }
                for cups in [0u32, 1, adjusted as u32, 50] {
                    let stats = compute_stats(cups, goal, adjustment);
                    let expected_rate = (cups as f64 / adjusted as f64 * 100.0).min(100.0);
                    assert!((stats.completion_rate - expected_rate).abs() <= 0.05);
                    assert_eq!(
                        stats.remaining_cups,
                        (adjusted - cups as i32).max(0) as u32
                    );
                }
            }
        }
    }
}
