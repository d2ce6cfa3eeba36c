//! Daily hydration records.
//!
//! - `stats` - Completion rate, remaining cups and adjusted goal of a day
//! - `recorder` - Mutations of today's record (drink, undo, goal changes)

mod recorder;
mod stats;

pub use crate::records::recorder::{RecorderState, WaterRecorder};
pub use crate::records::stats::{HydrationStats, adjusted_goal, compute_stats, round_to_one_decimal};
