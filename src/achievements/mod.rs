//! Achievements and streaks.
//!
//! The catalog is a closed list of [`AchievementDefinition`]s, each carrying an
//! [`AchievementCondition`] evaluated by exhaustive match. Evaluation is pure
//! (see `evaluator`); [`AchievementSystem`] adds persistence so each
//! achievement is unlocked at most once.
//!
//! # Modules
//!
//! - `condition` - Condition enum, evaluation context and catalog
//! - `evaluator` - Streak computation, user statistics and progress
//! - `system` - Store backed seeding and unlocking

mod condition;
mod evaluator;
mod system;

pub use crate::achievements::condition::{
    AchievementCondition, AchievementDefinition, AchievementKind, EvaluationContext, catalog,
};
pub use crate::achievements::evaluator::{
    AchievementProgress, UserStats, calculate_user_stats, evaluate, progress,
};
pub use crate::achievements::system::AchievementSystem;
