//! Context aware reminder text.
//!
//! The generator is a pure function of a [`MessageContext`] and a random
//! source: the style is picked from the time of day, then the temperature, then
//! the user's achievements; a template is drawn uniformly among every
//! applicable category of that style.

use log::debug;
use rand::{Rng, seq::SliceRandom, thread_rng};

use crate::messages::templates::templates;

/// Message used when no template applies at all.
pub const FALLBACK_MESSAGE: &str = "Time for a glass of water! Stay hydrated.";

/// Part of the day, by local hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeSegment {
    /// 6:00 to 12:00
    Morning,
    /// 12:00 to 14:00
    Noon,
    /// 14:00 to 18:00
    Afternoon,
    /// 18:00 to 22:00
    Evening,
    /// 22:00 to 6:00
    Night,
}

impl TimeSegment {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => TimeSegment::Morning,
            12..=13 => TimeSegment::Noon,
            14..=17 => TimeSegment::Afternoon,
            18..=21 => TimeSegment::Evening,
            _ => TimeSegment::Night,
        }
    }
}

/// Temperature bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherCategory {
    /// 30°C and above
    Hot,
    /// 25°C to 30°C
    Warm,
    /// 18°C to 25°C
    Comfortable,
    /// 10°C to 18°C
    Cool,
    /// below 10°C
    Cold,
}

impl WeatherCategory {
    pub fn from_temperature(temperature: f64) -> Self {
        if temperature >= 30.0 {
            WeatherCategory::Hot
        } else if temperature >= 25.0 {
            WeatherCategory::Warm
        } else if temperature >= 18.0 {
            WeatherCategory::Comfortable
        } else if temperature >= 10.0 {
            WeatherCategory::Cool
        } else {
            WeatherCategory::Cold
        }
    }
}

/// Tone of a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Humorous,
    Scientific,
    Encouraging,
    Warm,
    Cute,
    Serious,
}

impl Style {
    pub const ALL: [Style; 6] = [
        Style::Humorous,
        Style::Scientific,
        Style::Encouraging,
        Style::Warm,
        Style::Cute,
        Style::Serious,
    ];
}

/// Group of templates within a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateCategory {
    Time(TimeSegment),
    Weather(WeatherCategory),
    Achievement,
    Progress,
    General,
}

/// Inputs of the generator.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageContext {
    pub time_segment: TimeSegment,
    /// Temperature in °C.
    pub temperature: f64,
    pub unlocked_count: usize,
    pub streak_days: u32,
    /// Cups drunk divided by the adjusted goal; may exceed 1.
    pub daily_goal_progress: f64,
    pub adjusted_goal: u32,
    /// Overrides the style selection.
    pub forced_style: Option<Style>,
}

impl Default for MessageContext {
    fn default() -> Self {
        MessageContext {
            time_segment: TimeSegment::Afternoon,
            temperature: 25.0,
            unlocked_count: 0,
            streak_days: 0,
            daily_goal_progress: 0.0,
            adjusted_goal: 8,
            forced_style: None,
        }
    }
}

/// Generates a reminder with the thread local random source.
pub fn generate(context: &MessageContext) -> String {
    generate_with_rng(context, &mut thread_rng())
}

/// Generates a reminder with the given random source.
///
/// When the selected style has no template for the context, generation is
/// retried once with [`Style::Warm`] before falling back to
/// [`FALLBACK_MESSAGE`].
pub fn generate_with_rng<R: Rng + ?Sized>(context: &MessageContext, rng: &mut R) -> String {
    if let Some(message) = pick(context, select_style(context, rng), rng) {
        return message;
    }

    debug!("no template for context {:?}, retrying with warm style", context);
    if let Some(message) = pick(context, Style::Warm, rng) {
        return message;
    }

    FALLBACK_MESSAGE.to_owned()
}

fn pick<R: Rng + ?Sized>(context: &MessageContext, style: Style, rng: &mut R) -> Option<String> {
    let candidates: Vec<&str> = applicable_categories(context)
        .into_iter()
        .flat_map(|category| templates(style, category).iter().copied())
        .collect();

    let template = candidates.choose(rng)?;
    debug!(
        "generated message with style {:?} for {:?} at {}°C",
        style, context.time_segment, context.temperature
    );
    Some(fill_variables(template, context))
}

/// Picks the style of a reminder.
///
/// Priority: forced style, time of day, temperature, achievements, then a
/// uniformly random style.
pub fn select_style<R: Rng + ?Sized>(context: &MessageContext, rng: &mut R) -> Style {
    if let Some(style) = context.forced_style {
        return style;
    }

    let either = |rng: &mut R, a: Style, b: Style| if rng.gen_bool(0.5) { a } else { b };

    match context.time_segment {
        TimeSegment::Morning => return either(rng, Style::Encouraging, Style::Cute),
        TimeSegment::Afternoon => return either(rng, Style::Humorous, Style::Warm),
        TimeSegment::Evening => return Style::Warm,
        TimeSegment::Night => return Style::Serious,
        TimeSegment::Noon => {}
    }

    if context.temperature >= 30.0 {
        return either(rng, Style::Scientific, Style::Humorous);
    }
    if context.temperature <= 10.0 {
        return Style::Warm;
    }

    if context.unlocked_count >= 5 || context.streak_days >= 7 {
        return Style::Encouraging;
    }

    Style::ALL[rng.gen_range(0..Style::ALL.len())]
}

/// Returns the categories whose templates fit the context.
pub fn applicable_categories(context: &MessageContext) -> Vec<TemplateCategory> {
    let mut categories = vec![
        TemplateCategory::Time(context.time_segment),
        TemplateCategory::Weather(WeatherCategory::from_temperature(context.temperature)),
    ];
    if context.unlocked_count > 0 {
        categories.push(TemplateCategory::Achievement);
    }
    if context.daily_goal_progress > 0.0 {
        categories.push(TemplateCategory::Progress);
    }
    categories.push(TemplateCategory::General);
    categories
}

/// Substitutes `{{progress}}`, `{{cups}}` and `{{remaining}}`.
pub fn fill_variables(template: &str, context: &MessageContext) -> String {
    let goal = context.adjusted_goal as f64;
    let cups = context.daily_goal_progress * goal;
    let progress = (context.daily_goal_progress * 100.0).min(100.0).round();
    let remaining = (goal - cups).max(0.0).round();

    template
        .replace("{{progress}}", &format!("{}", progress as u32))
        .replace("{{cups}}", &format!("{}", cups.round() as u32))
        .replace("{{remaining}}", &format!("{}", remaining as u32))
}
