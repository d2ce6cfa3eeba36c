//! Built-in reminder templates, indexed by style and category.

use crate::messages::{Style, TemplateCategory, TimeSegment as T, WeatherCategory as W};

/// Returns the templates of `style` in `category`, possibly empty.
pub fn templates(style: Style, category: TemplateCategory) -> &'static [&'static str] {
    use Style::*;
    use TemplateCategory::{Achievement, General, Progress, Time, Weather};

    match (style, category) {
        (Humorous, Time(T::Morning)) => &[
            "Good morning! Your cup has been waiting all night to be filled.",
            "The early bird gets the worm, the early cup gets the water. Time for the first one!",
            "A new day starts with a sip. Ready when you are!",
        ],
        (Humorous, Time(T::Afternoon)) => &[
            "Afternoon tea time! How about a nice cup of plain water tea?",
            "Tired of work? Your cup is waving at you from the desk.",
            "The sun is up, the cup is empty, and it says: drink me!",
        ],
        (Humorous, Time(T::Evening)) => &[
            "A glass before dinner keeps the snacks away and the cup happy all night.",
            "Did you hit your KPIs today? Your cup has one too!",
        ],
        (Humorous, Weather(W::Hot)) => &[
            "It's so hot even your cup is thirsty. Are you not?",
            "Temperature off the charts, hydration running low. Refill time!",
        ],
        (Humorous, Weather(W::Cold)) => &[
            "Cold outside, but drinking water never goes out of season. Try it warm!",
            "The weather is chilly but your cup is still warmly waiting for you.",
        ],

        (Scientific, Time(T::Morning)) => &[
            "After a night of sleep the body is mildly dehydrated. A morning glass kick-starts your metabolism.",
            "Drinking water early in the day helps the kidneys flush out waste.",
        ],
        (Scientific, Time(T::Afternoon)) => &[
            "Mid-afternoon is a natural energy dip. Hydration improves focus and reaction time.",
            "Breathing and skin evaporation cost about 50 ml of water per hour of work. Top it up.",
        ],
        (Scientific, Weather(W::Hot)) => &[
            "Above 30°C the body can sweat out more than 500 ml per hour. Drink more than usual.",
            "In hot weather, sip 100 to 200 ml every 30 minutes to keep up with evaporation.",
        ],
        (Scientific, Achievement) => &[
            "Consistent daily tracking builds habits: research suggests about 21 days to make one stick.",
            "Meeting your daily goal keeps your fluid balance steady and your cells working well.",
        ],

        (Encouraging, Time(T::Morning)) => &[
            "A new day, a fresh start! You've got this goal today.",
            "The first glass of the morning lays the foundation for a healthy day. Go for it!",
        ],
        (Encouraging, Time(T::Afternoon)) => &[
            "The afternoon is where goals are won. One more glass brings you closer!",
            "Busy or not, water first. Taking care of yourself is always worth it!",
        ],
        (Encouraging, Achievement) => &[
            "Your streak is going strong! Keep it up and make it a habit.",
            "You're almost at today's goal, one more push and it's yours!",
        ],
        (Encouraging, Progress) => &[
            "{{progress}}% of today's goal done, great job! Keep the momentum going!",
            "{{cups}} cups down, only {{remaining}} to go. You can do it!",
        ],

        (Warm, Time(T::Morning)) => &[
            "Good morning, a glass of warm water helps your body wake up gently.",
            "A new day begins. Start it with a glass of water, your body will thank you.",
        ],
        (Warm, Time(T::Afternoon)) => &[
            "You've been busy all morning. Take a short break with a glass of water.",
            "The afternoon sun is lovely, perfect moment for a refreshing glass.",
        ],
        (Warm, Time(T::Evening)) => &[
            "A glass of water before dinner helps with portions and feels good too.",
            "Remember to drink in the evening, just not so much that it disturbs your sleep.",
        ],
        (Warm, General) => &[
            "Water is the source of life. Take care of yourself and drink a little.",
            "However busy you are, don't forget to drink. Your health comes first.",
        ],

        (Cute, Time(T::Morning)) => &[
            "WaterBuddy is awake! Good morning, shall we start the day with a glass? (✧ω✧)",
            "Glug glug~ my cup is empty, please fill me up! (๑>ᴗ<๑)",
        ],
        (Cute, Time(T::Afternoon)) => &[
            "Tired? WaterBuddy is cheering for you! Have a glass and relax~ (•̀ω•́)✧",
            "The sun is shining and WaterBuddy is thirsty. Drink with me? (っ◕‿◕)っ",
        ],
        (Cute, Time(T::Evening)) => &[
            "Dinner time! WaterBuddy says: water first, food second~ ᕕ( ᐛ )ᕗ",
            "We drank so well together today! Let's do it again tomorrow! (๑•̀ㅂ•́)و✧",
        ],

        (Serious, Time(T::Morning)) => &[
            "Drinking water in the morning lowers blood viscosity and supports heart health.",
            "A glass on an empty stomach stimulates digestion and helps prevent constipation.",
        ],
        (Serious, Weather(W::Hot)) => &[
            "Dehydration in high heat can lead to heatstroke. Increase your water intake now.",
            "Your body cools itself through evaporation. Keep drinking while it is hot.",
        ],
        (Serious, General) => &[
            "Insufficient hydration causes fatigue, headaches and poor concentration.",
            "Adults should drink about 1.5 to 2 litres a day. Make sure you reach it.",
        ],

        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warm_style_always_has_a_general_template() {
        assert!(!templates(Style::Warm, TemplateCategory::General).is_empty());
    }

    #[test]
    fn test_missing_combination_is_empty() {
        assert!(templates(Style::Cute, TemplateCategory::Weather(W::Hot)).is_empty());
        assert!(templates(Style::Humorous, TemplateCategory::Time(T::Noon)).is_empty());
    }

    #[test]
    fn test_progress_templates_use_variables() {
        for template in templates(Style::Encouraging, TemplateCategory::Progress) {
            assert!(template.contains("{{"));
        }
    }
}
